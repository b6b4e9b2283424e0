//! Environment variable key constants.
//!
//! Every key carries the `ENVBOOT_` prefix; only prefixed keys are honoured
//! when read from a project `.env` file.

pub const PREFIX: &str = "ENVBOOT_";

/// Environment layout and delegated processes
pub mod bootstrap {
    /// Environment directory, relative to the working directory unless absolute
    pub const ENVBOOT_VENV_DIR: &str = "ENVBOOT_VENV_DIR";
    /// Base interpreter used to create the environment
    pub const ENVBOOT_PYTHON: &str = "ENVBOOT_PYTHON";
    /// Requirements file installed right after creation
    pub const ENVBOOT_REQUIREMENTS: &str = "ENVBOOT_REQUIREMENTS";
    /// Script started by `envboot run`
    pub const ENVBOOT_ENTRY_POINT: &str = "ENVBOOT_ENTRY_POINT";
    /// Program started by `envboot nvim`
    pub const ENVBOOT_EDITOR: &str = "ENVBOOT_EDITOR";
}

/// 可观测性与日志
pub mod observability {
    pub const ENVBOOT_QUIET: &str = "ENVBOOT_QUIET";
    pub const ENVBOOT_LOG_LEVEL: &str = "ENVBOOT_LOG_LEVEL";
    pub const ENVBOOT_LOG_JSON: &str = "ENVBOOT_LOG_JSON";
}
