use anyhow::Result;
use envboot_env::{sync_environment, ProcessRunner};

use super::Context;

pub fn sync(ctx: &Context, runner: &dyn ProcessRunner, force: bool) -> Result<i32> {
    let report = sync_environment(&ctx.layout, &ctx.config, runner, force)?;
    let created = if report.ensure.created() { "created, " } else { "" };
    if report.installed {
        println!("Environment {}requirements installed", created);
    } else {
        println!("Environment {}up to date", created);
    }
    Ok(0)
}
