//! Email configuration

use secrecy::SecretString;
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (SMTP)
#[derive(Debug, Deserialize)]
pub struct EmailConfig {
    /// SMTP server host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP server port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username; empty disables authentication
    #[serde(default)]
    pub smtp_user: String,

    /// SMTP password
    #[serde(default)]
    pub smtp_password: Option<SecretString>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Base URL for document links in notification mail
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.smtp_host.is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL__SMTP_HOST"));
        }
        if self.smtp_port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if !self.smtp_user.is_empty() && self.smtp_password.is_none() {
            return Err(ValidationError::MissingRequired("EMAIL__SMTP_PASSWORD"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        Ok(())
    }
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_user: String::new(),
            smtp_password: None,
            from_email: default_from_email(),
            from_name: default_from_name(),
            base_url: default_base_url(),
        }
    }
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_email() -> String {
    "noreply@docvault.local".to_string()
}

fn default_from_name() -> String {
    "Docvault".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}
