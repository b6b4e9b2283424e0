//! Observability: tracing init.
//!
//! Uses config::ObservabilityConfig for ENVBOOT_QUIET, ENVBOOT_LOG_LEVEL, ENVBOOT_LOG_JSON.
//! Logs go to stderr; stdout belongs to the delegated process.

use envboot_core::config::ObservabilityConfig;
use tracing_subscriber::{prelude::*, EnvFilter};

/// Filter used in quiet mode: warnings and errors only.
const QUIET_LEVEL: &str = "envboot=warn,envboot_env=warn,envboot_core=warn";

/// Initialize tracing. Call at process startup.
/// `RUST_LOG` wins over the configured level when set.
pub fn init_tracing() {
    let cfg = ObservabilityConfig::from_env();
    let level = filter_directives(cfg);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .without_time()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
}

fn filter_directives(cfg: &ObservabilityConfig) -> &str {
    if cfg.quiet {
        QUIET_LEVEL
    } else {
        &cfg.log_level
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envboot_core::config::EnvSource;

    #[test]
    fn test_quiet_overrides_log_level() {
        let cfg = ObservabilityConfig::from_source(&EnvSource::from_pairs([
            ("ENVBOOT_QUIET", "1"),
            ("ENVBOOT_LOG_LEVEL", "debug"),
        ]));
        assert_eq!(filter_directives(&cfg), QUIET_LEVEL);
    }

    #[test]
    fn test_configured_level_used() {
        let cfg = ObservabilityConfig::from_source(&EnvSource::from_pairs([(
            "ENVBOOT_LOG_LEVEL",
            "envboot=debug",
        )]));
        assert_eq!(filter_directives(&cfg), "envboot=debug");
        assert!(EnvFilter::try_new(filter_directives(&cfg)).is_ok());
    }
}
