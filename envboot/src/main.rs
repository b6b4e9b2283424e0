mod cli;
mod commands;
mod observability;

use std::process::ExitCode;

use clap::Parser;
use cli::Cli;
use envboot_env::SystemRunner;

fn main() -> ExitCode {
    observability::init_tracing();
    let cli = Cli::parse();

    let result = commands::Context::from_cli(cli.venv_dir, cli.python)
        .and_then(|ctx| commands::dispatch(cli.command, &ctx, &SystemRunner));
    match result {
        Ok(code) => to_exit_code(code),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            to_exit_code(commands::error_exit_code(&err))
        }
    }
}

fn to_exit_code(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(1))
}
