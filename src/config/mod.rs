//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `DOCVAULT` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use docvault::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Mail relay at {}:{}", config.email.smtp_host, config.email.smtp_port);
//! ```

mod cold_storage;
mod email;
mod error;
mod logging;
mod notification;

pub use cold_storage::ColdStorageConfig;
pub use email::EmailConfig;
pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use notification::NotificationConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a usable
/// configuration pointing at a local SMTP relay.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration (filter, output format)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Email configuration (SMTP)
    #[serde(default)]
    pub email: EmailConfig,

    /// Cold storage configuration
    #[serde(default)]
    pub cold_storage: ColdStorageConfig,

    /// Notification configuration
    #[serde(default)]
    pub notification: NotificationConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DOCVAULT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Splits `notification.auto_subscribe` on commas
    ///
    /// # Environment Variable Format
    ///
    /// - `DOCVAULT__EMAIL__SMTP_PORT=2525` -> `email.smtp_port = 2525`
    /// - `DOCVAULT__NOTIFICATION__AUTO_SUBSCRIBE=CommentAdded,CommentUpdated`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("DOCVAULT")
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("notification.auto_subscribe")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first invalid section.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.logging.validate()?;
        self.email.validate()?;
        self.cold_storage.validate()?;
        self.notification.validate()?;
        Ok(())
    }
}
