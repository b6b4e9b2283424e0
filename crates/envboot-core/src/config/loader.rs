//! 统一环境变量加载逻辑
//!
//! Lookup order: process environment, then `ENVBOOT_*` keys from `./.env`.
//! Empty values count as unset at every level.

use std::collections::HashMap;
use std::env;
use std::path::Path;
use std::sync::OnceLock;

use super::env_keys::PREFIX;

/// Parse `.env` content, keeping only `ENVBOOT_*` keys.
///
/// Other keys belong to the application and are left for it to load.
pub fn parse_dotenv(content: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some(eq_pos) = line.find('=') else {
            continue;
        };
        let key = line[..eq_pos].trim();
        let mut value = line[eq_pos + 1..].trim();
        // Strip inline comment (# not inside quotes)
        if let Some(hash_pos) = value.find('#') {
            let before_hash = value[..hash_pos].trim_end();
            if !before_hash.contains('"') && !before_hash.contains('\'') {
                value = before_hash;
            }
        }
        if value.len() >= 2
            && ((value.starts_with('"') && value.ends_with('"'))
                || (value.starts_with('\'') && value.ends_with('\'')))
        {
            value = &value[1..value.len() - 1];
        }
        if key.starts_with(PREFIX) && !values.contains_key(key) {
            values.insert(key.to_string(), value.to_string());
        }
    }
    values
}

/// Read `<dir>/.env`; a missing or unreadable file yields an empty map.
pub fn load_dotenv_from_dir(dir: &Path) -> HashMap<String, String> {
    let path = dir.join(".env");
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            let values = parse_dotenv(&content);
            tracing::debug!(path = %path.display(), keys = values.len(), "loaded .env");
            values
        }
        Err(_) => HashMap::new(),
    }
}

/// `.env` of the current directory, parsed once per process.
pub fn load_dotenv() -> &'static HashMap<String, String> {
    static DOTENV: OnceLock<HashMap<String, String>> = OnceLock::new();
    DOTENV.get_or_init(|| {
        env::current_dir()
            .map(|d| load_dotenv_from_dir(&d))
            .unwrap_or_default()
    })
}

/// A key/value lookup chain used to build config structs.
#[derive(Debug, Clone, Default)]
pub struct EnvSource {
    process: bool,
    overlay: HashMap<String, String>,
}

impl EnvSource {
    /// Process environment backed by the cwd `.env`.
    pub fn from_process() -> Self {
        Self {
            process: true,
            overlay: load_dotenv().clone(),
        }
    }

    /// Fixed values only; the process environment is ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            process: false,
            overlay: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Trimmed value, `None` when unset or empty.
    pub fn optional(&self, key: &str) -> Option<String> {
        let from_process = if self.process {
            env::var(key).ok().filter(|s| !s.trim().is_empty())
        } else {
            None
        };
        from_process
            .or_else(|| self.overlay.get(key).cloned())
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    pub fn or<F>(&self, key: &str, default: F) -> String
    where
        F: FnOnce() -> String,
    {
        self.optional(key).unwrap_or_else(default)
    }

    /// 1/true/yes/on are true, 0/false/no/off are false; anything else falls back to `default`.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        match self.optional(key).map(|s| s.to_lowercase()).as_deref() {
            Some("1" | "true" | "yes" | "on") => true,
            Some("0" | "false" | "no" | "off") => false,
            Some(other) => {
                tracing::warn!("Invalid boolean for {}: {}, using default ({})", key, other, default);
                default
            }
            None => default,
        }
    }
}
