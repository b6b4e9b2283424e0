//! Delegation: run the application or the editor inside the environment.
//!
//! Activation mirrors what `source venv/bin/activate` does for a shell, but
//! scoped to the child process only: `VIRTUAL_ENV` is set, the environment's
//! bin directory goes first on `PATH`, and `PYTHONHOME` is dropped.

use std::env;
use std::ffi::{OsStr, OsString};
use std::io;

use envboot_core::config::BootstrapConfig;
use envboot_core::layout::EnvLayout;

use crate::error::BootstrapError;
use crate::info_log;
use crate::process::{ExitOutcome, Invocation, ProcessRunner};

pub const VIRTUAL_ENV: &str = "VIRTUAL_ENV";
pub const PATH: &str = "PATH";
pub const PYTHONHOME: &str = "PYTHONHOME";

/// `PATH` with the environment's bin directory prepended.
pub fn activated_path(layout: &EnvLayout, current: Option<&OsStr>) -> Result<OsString, BootstrapError> {
    let mut entries = vec![layout.bin_dir()];
    if let Some(current) = current {
        entries.extend(env::split_paths(current));
    }
    env::join_paths(entries).map_err(|e| {
        BootstrapError::io(
            format!("Build PATH for {}", layout.bin_dir().display()),
            io::Error::new(io::ErrorKind::InvalidInput, e),
        )
    })
}

/// Apply activation to an invocation, based on this process's `PATH`.
pub fn activate(invocation: Invocation, layout: &EnvLayout) -> Result<Invocation, BootstrapError> {
    let path = activated_path(layout, env::var_os(PATH).as_deref())?;
    Ok(invocation
        .env(VIRTUAL_ENV, layout.venv_dir())
        .env(PATH, path)
        .env_remove(PYTHONHOME))
}

/// Run `<venv python> <entry_point> [args]` in the project root.
///
/// The environment must already be bootstrapped.
pub fn run_application(
    layout: &EnvLayout,
    config: &BootstrapConfig,
    args: &[OsString],
    runner: &dyn ProcessRunner,
) -> Result<ExitOutcome, BootstrapError> {
    let invocation = Invocation::new(layout.python())
        .arg(&config.entry_point)
        .args(args)
        .current_dir(layout.root());
    delegate(activate(invocation, layout)?, layout, runner)
}

/// Open the configured editor on the project root (`<editor> .`).
pub fn run_editor(
    layout: &EnvLayout,
    config: &BootstrapConfig,
    runner: &dyn ProcessRunner,
) -> Result<ExitOutcome, BootstrapError> {
    let invocation = Invocation::new(&config.editor)
        .arg(".")
        .current_dir(layout.root());
    delegate(activate(invocation, layout)?, layout, runner)
}

fn delegate(
    invocation: Invocation,
    layout: &EnvLayout,
    runner: &dyn ProcessRunner,
) -> Result<ExitOutcome, BootstrapError> {
    if !layout.is_bootstrapped() {
        return Err(BootstrapError::SentinelMissing {
            sentinel: layout.sentinel(),
        });
    }
    info_log!("Running {}", invocation);
    let outcome = runner
        .run(&invocation)
        .map_err(|source| BootstrapError::LaunchFailed {
            program: invocation.program_name(),
            source,
        })?;
    if !outcome.success() {
        tracing::debug!("{} ended with {}", invocation.program_name(), outcome);
    }
    Ok(outcome)
}
