//! Subcommand implementations. Each returns the process exit code.

pub mod delegate;
pub mod setup;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use envboot_core::config::BootstrapConfig;
use envboot_core::layout::EnvLayout;
use envboot_env::{BootstrapError, ProcessRunner};

use crate::cli::Commands;

/// Resolved configuration and layout for one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: BootstrapConfig,
    pub layout: EnvLayout,
}

impl Context {
    pub fn new(root: PathBuf, config: BootstrapConfig) -> Self {
        let layout = EnvLayout::from_config(root, &config);
        Self { config, layout }
    }

    /// Project root is the current directory.
    pub fn from_cli(venv_dir: Option<PathBuf>, python: Option<PathBuf>) -> Result<Self> {
        let root = std::env::current_dir().context("Resolve current directory")?;
        let config = BootstrapConfig::from_env().with_cli_overrides(venv_dir, python);
        tracing::debug!(?config, root = %root.display(), "resolved configuration");
        Ok(Self::new(root, config))
    }
}

pub fn dispatch(command: Commands, ctx: &Context, runner: &dyn ProcessRunner) -> Result<i32> {
    match command {
        Commands::Run { args } => delegate::run_app(ctx, &args, runner),
        Commands::Nvim => delegate::open_editor(ctx, runner),
        Commands::Setup => setup::setup(ctx, runner),
        Commands::Status { json } => status::status(ctx, json),
        Commands::Sync { force } => sync::sync(ctx, runner, force),
    }
}

/// Bootstrap failures keep their own exit code; anything else is 1.
pub fn error_exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<BootstrapError>()
        .map(BootstrapError::exit_code)
        .unwrap_or(1)
}


#[cfg(test)]
mod tests {
    use super::test_support::{bootstrapped_context, Recorder};
    use super::*;
    use std::path::Path;

    #[test]
    fn test_dispatch_nvim_launches_editor() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = bootstrapped_context(tmp.path());
        let runner = Recorder::exiting(0);

        let code = dispatch(Commands::Nvim, &ctx, &runner).unwrap();
        assert_eq!(code, 0);
        let calls = runner.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, Path::new("nvim"));
    }

    #[test]
    fn test_dispatch_run_propagates_exit_code() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = bootstrapped_context(tmp.path());
        let runner = Recorder::exiting(3);

        let code = dispatch(Commands::Run { args: Vec::new() }, &ctx, &runner).unwrap();
        assert_eq!(code, 3);
        assert_eq!(runner.calls.borrow().len(), 1);
    }

    #[test]
    fn test_creation_failure_launches_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let config = BootstrapConfig {
            python: Some(tmp.path().join("missing-python")),
            ..BootstrapConfig::default()
        };
        let ctx = Context::new(tmp.path().to_path_buf(), config);
        let runner = Recorder::exiting(0);

        let err = dispatch(Commands::Run { args: Vec::new() }, &ctx, &runner).unwrap_err();
        assert_ne!(error_exit_code(&err), 0);
        assert!(runner.calls.borrow().is_empty());
    }

    #[test]
    fn test_error_exit_code_for_other_errors() {
        let err = anyhow::anyhow!("unrelated");
        assert_eq!(error_exit_code(&err), 1);
    }
}
