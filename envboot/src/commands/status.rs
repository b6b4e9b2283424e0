use anyhow::{Context as _, Result};
use envboot_env::inspect;

use super::Context;

pub fn status(ctx: &Context, json: bool) -> Result<i32> {
    let status = inspect(&ctx.layout, &ctx.config)?;
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&status).context("Serialize status")?
        );
    } else {
        println!("{}", status);
    }
    Ok(0)
}
