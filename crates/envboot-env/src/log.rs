//! Quiet-mode aware logging. When ENVBOOT_QUIET=1, suppress [INFO].
//! Uses `tracing::info!` so output is captured by the tracing subscriber.

#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{
        if !$crate::log::is_quiet() {
            tracing::info!($($arg)*);
        }
    }};
}

pub fn is_quiet() -> bool {
    envboot_core::config::ObservabilityConfig::from_env().quiet
}
