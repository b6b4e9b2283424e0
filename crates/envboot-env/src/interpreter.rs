//! Base interpreter lookup for `python -m venv`.

use std::path::{Path, PathBuf};

use crate::error::BootstrapError;

/// Searched on `PATH` when no interpreter is configured.
pub const PYTHON_CANDIDATES: &[&str] = &["python3", "python"];

/// Resolve the interpreter that creates the environment.
///
/// A configured path (or bare name) must resolve; otherwise the first
/// candidate found on `PATH` wins.
pub fn resolve_base_python(configured: Option<&Path>) -> Result<PathBuf, BootstrapError> {
    if let Some(python) = configured {
        return which::which(python).map_err(|e| {
            tracing::debug!("configured interpreter {} not usable: {}", python.display(), e);
            BootstrapError::InterpreterNotFound {
                tried: python.display().to_string(),
            }
        });
    }
    for name in PYTHON_CANDIDATES {
        if let Ok(path) = which::which(name) {
            tracing::debug!("using base interpreter {}", path.display());
            return Ok(path);
        }
    }
    Err(BootstrapError::InterpreterNotFound {
        tried: PYTHON_CANDIDATES.join(", "),
    })
}
