//! Structured logging setup.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` overrides the configured level. Returns `false` if a global
/// subscriber was already installed, in which case nothing changes.
pub fn init_tracing(config: &LoggingConfig) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.is_ok()
}
