//! On-disk layout of a project virtual environment.
//!
//! The activation script doubles as the "already bootstrapped" sentinel:
//! `python -m venv` writes it last, so its presence means creation finished.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::BootstrapConfig;

/// Activation script name, inside [`EnvLayout::bin_dir`].
pub const SENTINEL_NAME: &str = "activate";

/// Hash of the requirements content last installed into the environment.
pub const REQUIREMENTS_STAMP: &str = ".envboot-requirements.sha256";

#[cfg(windows)]
const BIN_DIR: &str = "Scripts";
#[cfg(not(windows))]
const BIN_DIR: &str = "bin";

#[cfg(windows)]
const PYTHON_EXE: &str = "python.exe";
#[cfg(not(windows))]
const PYTHON_EXE: &str = "python";

/// Resolved paths for one project: root directory plus environment directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvLayout {
    root: PathBuf,
    venv_dir: PathBuf,
}

impl EnvLayout {
    /// `venv_dir` is joined onto `root` unless it is absolute.
    pub fn new(root: impl Into<PathBuf>, venv_dir: impl AsRef<Path>) -> Self {
        let root = root.into();
        let venv_dir = root.join(venv_dir);
        Self { root, venv_dir }
    }

    pub fn from_config(root: impl Into<PathBuf>, config: &BootstrapConfig) -> Self {
        Self::new(root, &config.venv_dir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn venv_dir(&self) -> &Path {
        &self.venv_dir
    }

    /// `bin` on Unix, `Scripts` on Windows.
    pub fn bin_dir(&self) -> PathBuf {
        self.venv_dir.join(BIN_DIR)
    }

    pub fn sentinel(&self) -> PathBuf {
        self.bin_dir().join(SENTINEL_NAME)
    }

    /// Interpreter inside the environment.
    pub fn python(&self) -> PathBuf {
        self.bin_dir().join(PYTHON_EXE)
    }

    pub fn requirements_stamp(&self) -> PathBuf {
        self.venv_dir.join(REQUIREMENTS_STAMP)
    }

    /// Resolve a project-relative path (requirements file, entry point).
    pub fn resolve(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.sentinel().is_file()
    }
}
