use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// envboot - bootstrap the project virtual environment, then run inside it
#[derive(Parser, Debug)]
#[command(name = "envboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Environment directory (default: from ENVBOOT_VENV_DIR or `venv`)
    #[arg(long, global = true, value_name = "DIR")]
    pub venv_dir: Option<PathBuf>,

    /// Interpreter used to create the environment (default: from ENVBOOT_PYTHON or PATH)
    #[arg(long, global = true, value_name = "PATH")]
    pub python: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ensure the environment exists, then run the application entry point
    Run {
        /// Arguments passed to the entry point (after `--`)
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<OsString>,
    },

    /// Ensure the environment exists, then open the editor on the current directory
    Nvim,

    /// Ensure the environment exists without launching anything
    Setup,

    /// Show environment state
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Ensure the environment, then reinstall requirements if they changed
    Sync {
        /// Reinstall even when requirements are unchanged
        #[arg(long)]
        force: bool,
    },
}
