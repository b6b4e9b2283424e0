//! Typed configuration built from an [`EnvSource`].

use std::path::PathBuf;

use serde::Serialize;

use super::env_keys::bootstrap as keys;
use super::env_keys::observability as obv_keys;
use super::loader::EnvSource;

pub const DEFAULT_VENV_DIR: &str = "venv";
pub const DEFAULT_REQUIREMENTS: &str = "requirements.txt";
pub const DEFAULT_ENTRY_POINT: &str = "main.py";
pub const DEFAULT_EDITOR: &str = "nvim";
pub const DEFAULT_LOG_LEVEL: &str = "envboot=info,envboot_env=info,envboot_core=info";

/// Where the environment lives and what gets launched inside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BootstrapConfig {
    /// Environment directory (relative paths resolve against the project root)
    pub venv_dir: PathBuf,
    /// Base interpreter for `-m venv`; `None` means search `PATH`
    pub python: Option<PathBuf>,
    /// Requirements file installed after creation
    pub requirements: PathBuf,
    /// Application entry point started by `run`
    pub entry_point: PathBuf,
    /// Editor program started by `nvim`
    pub editor: String,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self::from_source(&EnvSource::default())
    }
}

impl BootstrapConfig {
    pub fn from_env() -> Self {
        Self::from_source(&EnvSource::from_process())
    }

    pub fn from_source(src: &EnvSource) -> Self {
        Self {
            venv_dir: PathBuf::from(src.or(keys::ENVBOOT_VENV_DIR, || DEFAULT_VENV_DIR.to_string())),
            python: src.optional(keys::ENVBOOT_PYTHON).map(PathBuf::from),
            requirements: PathBuf::from(
                src.or(keys::ENVBOOT_REQUIREMENTS, || DEFAULT_REQUIREMENTS.to_string()),
            ),
            entry_point: PathBuf::from(
                src.or(keys::ENVBOOT_ENTRY_POINT, || DEFAULT_ENTRY_POINT.to_string()),
            ),
            editor: src.or(keys::ENVBOOT_EDITOR, || DEFAULT_EDITOR.to_string()),
        }
    }

    /// Priority: CLI > environment > `.env` > default.
    pub fn with_cli_overrides(mut self, venv_dir: Option<PathBuf>, python: Option<PathBuf>) -> Self {
        if let Some(dir) = venv_dir {
            self.venv_dir = dir;
        }
        if let Some(python) = python {
            self.python = Some(python);
        }
        self
    }
}

/// 可观测性配置：quiet、log_level、log_json
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub quiet: bool,
    pub log_level: String,
    pub log_json: bool,
}

impl ObservabilityConfig {
    pub fn from_env() -> &'static Self {
        use std::sync::OnceLock;
        static CACHE: OnceLock<ObservabilityConfig> = OnceLock::new();
        CACHE.get_or_init(|| Self::from_source(&EnvSource::from_process()))
    }

    pub fn from_source(src: &EnvSource) -> Self {
        Self {
            quiet: src.flag(obv_keys::ENVBOOT_QUIET, false),
            log_level: src.or(obv_keys::ENVBOOT_LOG_LEVEL, || DEFAULT_LOG_LEVEL.to_string()),
            log_json: src.flag(obv_keys::ENVBOOT_LOG_JSON, false),
        }
    }
}
