//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid log filter: {0}")]
    InvalidLogLevel(String),

    #[error("Invalid from email address")]
    InvalidFromEmail,

    #[error("Base URL must start with http:// or https://")]
    InvalidBaseUrl,

    #[error("Maximum days of availability must be positive when set")]
    InvalidAvailabilityWindow,

    #[error("Auto-subscribe notification names cannot be empty")]
    EmptyNotificationName,
}
