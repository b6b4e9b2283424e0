use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::process::ExitOutcome;

/// Exit code shells use for "command not found".
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit code shells use for "found but not executable".
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Setup or delegation failure. Nothing is retried or rolled back.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("No Python interpreter found (tried: {tried}); set ENVBOOT_PYTHON or pass --python")]
    InterpreterNotFound { tried: String },

    #[error("Creating virtual environment at {} failed ({outcome})", .venv_dir.display())]
    CreateFailed {
        venv_dir: PathBuf,
        outcome: ExitOutcome,
    },

    #[error("Environment setup finished but {} is missing", .sentinel.display())]
    SentinelMissing { sentinel: PathBuf },

    #[error("Installing {} failed ({outcome})", .requirements.display())]
    InstallFailed {
        requirements: PathBuf,
        outcome: ExitOutcome,
    },

    #[error("Failed to launch {program}: {source}")]
    LaunchFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl BootstrapError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Process exit code reported to the invoking shell.
    ///
    /// A failed child passes its own code through; launch errors follow the
    /// shell conventions (127 not found, 126 not executable).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::CreateFailed { outcome, .. } | Self::InstallFailed { outcome, .. } => {
                match outcome.exit_code() {
                    0 => 1,
                    code => code,
                }
            }
            Self::LaunchFailed { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => EXIT_NOT_FOUND,
                io::ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
                _ => 1,
            },
            Self::InterpreterNotFound { .. } => EXIT_NOT_FOUND,
            Self::SentinelMissing { .. } | Self::Io { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_passes_child_code_through() {
        let err = BootstrapError::CreateFailed {
            venv_dir: PathBuf::from("venv"),
            outcome: ExitOutcome::Code(3),
        };
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().contains("exit code 3"));
    }

    #[test]
    fn test_exit_code_launch_not_found() {
        let err = BootstrapError::LaunchFailed {
            program: "nvim".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        assert_eq!(err.exit_code(), EXIT_NOT_FOUND);
        assert!(err.to_string().starts_with("Failed to launch nvim"));
    }

    #[test]
    fn test_exit_code_never_zero() {
        let err = BootstrapError::InstallFailed {
            requirements: PathBuf::from("requirements.txt"),
            outcome: ExitOutcome::Code(0),
        };
        assert_eq!(err.exit_code(), 1);
        assert_eq!(
            BootstrapError::io("Read requirements", io::Error::other("boom")).exit_code(),
            1
        );
    }
}
