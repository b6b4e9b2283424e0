//! Read-only report on the project environment.

use std::fmt;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use envboot_core::config::BootstrapConfig;
use envboot_core::layout::EnvLayout;
use serde::Serialize;

use crate::bootstrap::requirements_stale;
use crate::error::BootstrapError;

#[derive(Debug, Clone, Serialize)]
pub struct EnvStatus {
    pub venv_dir: PathBuf,
    pub sentinel: PathBuf,
    pub python: PathBuf,
    pub bootstrapped: bool,
    /// Modification time of the sentinel
    pub created_at: Option<DateTime<Utc>>,
    pub requirements: PathBuf,
    pub requirements_present: bool,
    /// `None` when not bootstrapped or there is no requirements file
    pub requirements_stale: Option<bool>,
    pub entry_point: PathBuf,
    pub editor: String,
}

pub fn inspect(layout: &EnvLayout, config: &BootstrapConfig) -> Result<EnvStatus, BootstrapError> {
    let sentinel = layout.sentinel();
    let created_at = fs::metadata(&sentinel)
        .and_then(|m| m.modified())
        .ok()
        .map(DateTime::<Utc>::from);
    let requirements = layout.resolve(&config.requirements);
    Ok(EnvStatus {
        venv_dir: layout.venv_dir().to_path_buf(),
        python: layout.python(),
        bootstrapped: layout.is_bootstrapped(),
        created_at,
        requirements_present: requirements.is_file(),
        requirements_stale: requirements_stale(layout, config)?,
        requirements,
        entry_point: config.entry_point.clone(),
        editor: config.editor.clone(),
        sentinel,
    })
}

impl fmt::Display for EnvStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Environment:  {}", self.venv_dir.display())?;
        match (self.bootstrapped, self.created_at) {
            (true, Some(at)) => writeln!(f, "State:        ready (since {})", at.to_rfc3339())?,
            (true, None) => writeln!(f, "State:        ready")?,
            (false, _) => writeln!(f, "State:        not created")?,
        }
        writeln!(f, "Interpreter:  {}", self.python.display())?;
        let requirements = match (self.requirements_present, self.requirements_stale) {
            (false, _) => "absent",
            (true, Some(true)) => "changed since last install",
            (true, Some(false)) => "installed",
            (true, None) => "pending",
        };
        writeln!(
            f,
            "Requirements: {} ({})",
            self.requirements.display(),
            requirements
        )?;
        writeln!(f, "Entry point:  {}", self.entry_point.display())?;
        write!(f, "Editor:       {}", self.editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::requirements_fingerprint;

    #[test]
    fn test_inspect_fresh_checkout() {
        let tmp = tempfile::tempdir().unwrap();
        let config = BootstrapConfig::default();
        let layout = EnvLayout::from_config(tmp.path(), &config);

        let status = inspect(&layout, &config).unwrap();
        assert!(!status.bootstrapped);
        assert!(status.created_at.is_none());
        assert!(!status.requirements_present);
        assert_eq!(status.requirements_stale, None);
        assert!(status.to_string().contains("not created"));
    }

    #[test]
    fn test_inspect_bootstrapped() {
        let tmp = tempfile::tempdir().unwrap();
        let config = BootstrapConfig::default();
        let layout = EnvLayout::from_config(tmp.path(), &config);
        fs::create_dir_all(layout.bin_dir()).unwrap();
        fs::write(layout.sentinel(), "# activate\n").unwrap();
        fs::write(tmp.path().join("requirements.txt"), "qasync\n").unwrap();
        fs::write(
            layout.requirements_stamp(),
            requirements_fingerprint(b"qasync\n"),
        )
        .unwrap();

        let status = inspect(&layout, &config).unwrap();
        assert!(status.bootstrapped);
        assert!(status.created_at.is_some());
        assert_eq!(status.requirements_stale, Some(false));
        let text = status.to_string();
        assert!(text.contains("ready (since"));
        assert!(text.contains("(installed)"));
    }
}
