//! `run` and `nvim`: ensure the environment, then hand over to one child.

use std::ffi::OsString;

use anyhow::Result;
use envboot_env::{ensure_environment, run_application, run_editor, ProcessRunner};

use super::Context;

pub fn run_app(ctx: &Context, args: &[OsString], runner: &dyn ProcessRunner) -> Result<i32> {
    ensure_environment(&ctx.layout, &ctx.config, runner)?;
    let outcome = run_application(&ctx.layout, &ctx.config, args, runner)?;
    Ok(outcome.exit_code())
}

pub fn open_editor(ctx: &Context, runner: &dyn ProcessRunner) -> Result<i32> {
    ensure_environment(&ctx.layout, &ctx.config, runner)?;
    let outcome = run_editor(&ctx.layout, &ctx.config, runner)?;
    Ok(outcome.exit_code())
}
