//! Notification-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Errors raised by the notification manager and mail delivery.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("Unknown notification: {0}")]
    UnknownNotification(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Mail delivery failed: {0}")]
    MailDelivery(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl NotificationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            NotificationError::UnknownNotification(_) => ErrorCode::UnknownNotification,
            NotificationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            NotificationError::MailDelivery(_) => ErrorCode::MailDeliveryFailed,
            NotificationError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DomainError> for NotificationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UnknownNotification => NotificationError::UnknownNotification(
                err.details
                    .get("notification")
                    .cloned()
                    .unwrap_or(err.message),
            ),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => NotificationError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            ErrorCode::MailDeliveryFailed => NotificationError::MailDelivery(err.message),
            _ => NotificationError::Infrastructure(err.to_string()),
        }
    }
}
