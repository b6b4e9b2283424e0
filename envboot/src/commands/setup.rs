use anyhow::Result;
use envboot_env::{ensure_environment, EnsureOutcome, ProcessRunner};

use super::Context;

pub fn setup(ctx: &Context, runner: &dyn ProcessRunner) -> Result<i32> {
    let outcome = ensure_environment(&ctx.layout, &ctx.config, runner)?;
    let venv = ctx.layout.venv_dir().display();
    match outcome {
        EnsureOutcome::AlreadyPresent => println!("Environment already present at {}", venv),
        EnsureOutcome::Created {
            requirements_installed: true,
        } => println!("Created environment at {} and installed requirements", venv),
        EnsureOutcome::Created {
            requirements_installed: false,
        } => println!("Created environment at {}", venv),
    }
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{bootstrapped_context, Recorder};

    #[test]
    fn test_setup_is_noop_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = bootstrapped_context(tmp.path());
        let runner = Recorder::exiting(0);

        assert_eq!(setup(&ctx, &runner).unwrap(), 0);
        assert_eq!(setup(&ctx, &runner).unwrap(), 0);
        assert!(runner.calls.borrow().is_empty());
    }
}
