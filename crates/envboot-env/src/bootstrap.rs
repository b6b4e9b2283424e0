//! Ensure the project virtual environment exists; install requirements once.

use std::fs;
use std::path::Path;

use envboot_core::config::BootstrapConfig;
use envboot_core::layout::EnvLayout;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::BootstrapError;
use crate::info_log;
use crate::interpreter::resolve_base_python;
use crate::process::{Invocation, ProcessRunner};

/// What [`ensure_environment`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum EnsureOutcome {
    /// Sentinel was already there; nothing ran.
    AlreadyPresent,
    Created { requirements_installed: bool },
}

impl EnsureOutcome {
    pub fn created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}

/// Create the environment unless its sentinel already exists.
///
/// On creation, installs the requirements file when present. Any failing
/// step aborts immediately; a half-created directory is left as is.
pub fn ensure_environment(
    layout: &EnvLayout,
    config: &BootstrapConfig,
    runner: &dyn ProcessRunner,
) -> Result<EnsureOutcome, BootstrapError> {
    if layout.is_bootstrapped() {
        tracing::debug!("environment present at {}", layout.venv_dir().display());
        return Ok(EnsureOutcome::AlreadyPresent);
    }

    let python = resolve_base_python(config.python.as_deref())?;
    info_log!(
        "Creating virtual environment at {} ({})",
        layout.venv_dir().display(),
        python.display()
    );

    let create = Invocation::new(&python)
        .args(["-m", "venv"])
        .arg(layout.venv_dir())
        .current_dir(layout.root());
    let outcome = runner
        .run(&create)
        .map_err(|source| BootstrapError::LaunchFailed {
            program: create.program_name(),
            source,
        })?;
    if !outcome.success() {
        return Err(BootstrapError::CreateFailed {
            venv_dir: layout.venv_dir().to_path_buf(),
            outcome,
        });
    }
    if !layout.is_bootstrapped() {
        return Err(BootstrapError::SentinelMissing {
            sentinel: layout.sentinel(),
        });
    }

    let requirements_installed = install_requirements(layout, config, runner)?;
    Ok(EnsureOutcome::Created {
        requirements_installed,
    })
}

/// `pip install -r` the requirements file into the environment and record
/// its hash. Returns `false` when there is no requirements file.
pub fn install_requirements(
    layout: &EnvLayout,
    config: &BootstrapConfig,
    runner: &dyn ProcessRunner,
) -> Result<bool, BootstrapError> {
    let requirements = layout.resolve(&config.requirements);
    if !requirements.is_file() {
        tracing::debug!("no requirements file at {}", requirements.display());
        return Ok(false);
    }
    let content = fs::read(&requirements)
        .map_err(|e| BootstrapError::io(format!("Read {}", requirements.display()), e))?;

    info_log!("Installing {}", requirements.display());
    let install = Invocation::new(layout.python())
        .args(["-m", "pip", "install", "-r"])
        .arg(&requirements)
        .current_dir(layout.root());
    let outcome = runner
        .run(&install)
        .map_err(|source| BootstrapError::LaunchFailed {
            program: install.program_name(),
            source,
        })?;
    if !outcome.success() {
        return Err(BootstrapError::InstallFailed {
            requirements,
            outcome,
        });
    }

    let stamp = layout.requirements_stamp();
    fs::write(&stamp, requirements_fingerprint(&content))
        .map_err(|e| BootstrapError::io(format!("Write {}", stamp.display()), e))?;
    Ok(true)
}

/// Hex SHA-256 of the requirements content.
pub fn requirements_fingerprint(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    hex::encode(hasher.finalize())
}

pub fn read_stamp(layout: &EnvLayout) -> Option<String> {
    fs::read_to_string(layout.requirements_stamp())
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `None` when there is nothing to compare (no environment or no requirements
/// file); otherwise whether the file changed since the last install.
pub fn requirements_stale(
    layout: &EnvLayout,
    config: &BootstrapConfig,
) -> Result<Option<bool>, BootstrapError> {
    let requirements = layout.resolve(&config.requirements);
    if !layout.is_bootstrapped() || !requirements.is_file() {
        return Ok(None);
    }
    let current = fingerprint_file(&requirements)?;
    Ok(Some(read_stamp(layout).as_deref() != Some(current.as_str())))
}

fn fingerprint_file(path: &Path) -> Result<String, BootstrapError> {
    fs::read(path)
        .map(|c| requirements_fingerprint(&c))
        .map_err(|e| BootstrapError::io(format!("Read {}", path.display()), e))
}

/// Result of [`sync_environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub ensure: EnsureOutcome,
    /// Whether a `pip install` ran during this sync
    pub installed: bool,
}

/// Ensure the environment, then reinstall requirements if they changed
/// since the last install (or always, with `force`).
pub fn sync_environment(
    layout: &EnvLayout,
    config: &BootstrapConfig,
    runner: &dyn ProcessRunner,
    force: bool,
) -> Result<SyncReport, BootstrapError> {
    let ensure = ensure_environment(layout, config, runner)?;
    if let EnsureOutcome::Created {
        requirements_installed,
    } = ensure
    {
        return Ok(SyncReport {
            ensure,
            installed: requirements_installed,
        });
    }

    let installed = match requirements_stale(layout, config)? {
        Some(stale) if stale || force => install_requirements(layout, config, runner)?,
        Some(_) => {
            info_log!("Requirements unchanged; nothing to install");
            false
        }
        None => false,
    };
    Ok(SyncReport { ensure, installed })
}
