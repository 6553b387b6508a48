//! Notification configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Notification configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotificationConfig {
    /// Notifications an annotation author is subscribed to on the annotated
    /// document. Empty disables auto-subscription.
    #[serde(default)]
    pub auto_subscribe: Vec<String>,
}

impl NotificationConfig {
    /// Validate notification configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.auto_subscribe.iter().any(|n| n.trim().is_empty()) {
            return Err(ValidationError::EmptyNotificationName);
        }
        Ok(())
    }

    pub fn auto_subscribe_enabled(&self) -> bool {
        !self.auto_subscribe.is_empty()
    }
}
