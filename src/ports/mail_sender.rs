//! Mail sender port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::notification::MailMessage;

/// Delivers notification mail.
///
/// # Errors
///
/// - `MailDeliveryFailed` when the transport rejects the message
#[async_trait]
pub trait MailSender: Send + Sync {
    async fn send(&self, mail: &MailMessage) -> Result<(), DomainError>;
}
