//! ProcessRunner trait: the seam between deciding what to run and running it.
//!
//! The bootstrapper and launcher build [`Invocation`] values; a runner turns
//! them into processes. [`SystemRunner`] spawns real children with inherited
//! stdio and blocks until they exit.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

/// One child process: program, arguments, working directory and env changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub cwd: Option<PathBuf>,
    /// Variables set on top of the inherited environment
    pub env: Vec<(String, OsString)>,
    /// Variables removed from the inherited environment
    pub env_remove: Vec<String>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            env_remove: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl AsRef<OsStr>) -> Self {
        self.env.push((key.into(), value.as_ref().to_os_string()));
        self
    }

    pub fn env_remove(mut self, key: impl Into<String>) -> Self {
        self.env_remove.push(key.into());
        self
    }

    /// Value this invocation sets for `key`, if any (last write wins).
    pub fn env_value(&self, key: &str) -> Option<&OsStr> {
        self.env
            .iter()
            .rev()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
    }

    pub fn program_name(&self) -> String {
        self.program.display().to_string()
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref cwd) = self.cwd {
            cmd.current_dir(cwd);
        }
        for key in &self.env_remove {
            cmd.env_remove(key);
        }
        for (key, value) in &self.env {
            cmd.env(key, value);
        }
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    Code(i32),
    /// Terminated by a signal (Unix only)
    Signal(i32),
}

impl ExitOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self::Code(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signal(signal);
            }
        }
        Self::Code(1)
    }

    pub fn success(&self) -> bool {
        matches!(self, Self::Code(0))
    }

    /// Shell convention: a signal-terminated child reports 128 + signal.
    pub fn exit_code(&self) -> i32 {
        match *self {
            Self::Code(code) => code,
            Self::Signal(signal) => 128 + signal,
        }
    }
}

impl fmt::Display for ExitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Code(code) => write!(f, "exit code {}", code),
            Self::Signal(signal) => write!(f, "terminated by signal {}", signal),
        }
    }
}

/// Extension point for process execution.
pub trait ProcessRunner {
    /// Runner name for logging and diagnostics.
    fn name(&self) -> &str;

    /// Run the invocation to completion. `Err` means the process never started.
    fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome>;
}

/// Spawns real processes with inherited stdin/stdout/stderr.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn name(&self) -> &str {
        "system"
    }

    fn run(&self, invocation: &Invocation) -> io::Result<ExitOutcome> {
        tracing::debug!(runner = self.name(), command = %invocation, "spawning");
        let status = invocation
            .to_command()
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()?;
        let outcome = ExitOutcome::from_status(status);
        tracing::debug!(runner = self.name(), %outcome, "child exited");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let inv = Invocation::new("python")
            .args(["-m", "venv"])
            .arg("venv")
            .current_dir("/work")
            .env("VIRTUAL_ENV", "/work/venv")
            .env_remove("PYTHONHOME");
        assert_eq!(inv.to_string(), "python -m venv venv");
        assert_eq!(inv.cwd.as_deref(), Some(Path::new("/work")));
        assert_eq!(inv.env_value("VIRTUAL_ENV"), Some(OsStr::new("/work/venv")));
        assert_eq!(inv.env_remove, vec!["PYTHONHOME".to_string()]);
    }

    #[test]
    fn test_exit_outcome_codes() {
        assert!(ExitOutcome::Code(0).success());
        assert!(!ExitOutcome::Code(2).success());
        assert_eq!(ExitOutcome::Code(2).exit_code(), 2);
        assert!(!ExitOutcome::Signal(9).success());
        assert_eq!(ExitOutcome::Signal(9).exit_code(), 137);
        assert_eq!(ExitOutcome::Signal(15).to_string(), "terminated by signal 15");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_propagates_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let inv = Invocation::new("sh")
            .args(["-c", "exit 7"])
            .current_dir(tmp.path());
        let outcome = SystemRunner.run(&inv).unwrap();
        assert_eq!(outcome, ExitOutcome::Code(7));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_applies_env() {
        let tmp = tempfile::tempdir().unwrap();
        let inv = Invocation::new("sh")
            .args(["-c", "test \"$ENVBOOT_PROCESS_TEST\" = on && test -z \"$ENVBOOT_PROCESS_GONE\""])
            .env("ENVBOOT_PROCESS_TEST", "on")
            .env_remove("ENVBOOT_PROCESS_GONE")
            .current_dir(tmp.path());
        assert!(SystemRunner.run(&inv).unwrap().success());
    }

    #[test]
    fn test_system_runner_missing_program() {
        let inv = Invocation::new("envboot-definitely-not-a-real-program");
        let err = SystemRunner.run(&inv).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
