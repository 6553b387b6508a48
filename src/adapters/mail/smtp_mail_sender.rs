//! SMTP mail delivery through `lettre`.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::config::EmailConfig;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::notification::MailMessage;
use crate::ports::MailSender;

/// Sends notification mail through an SMTP relay.
pub struct SmtpMailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailSender {
    /// Builds the transport from configuration.
    ///
    /// Without an SMTP user the connection is unauthenticated and
    /// unencrypted, which suits local relays such as MailHog.
    ///
    /// # Errors
    ///
    /// - `MailDeliveryFailed` if the relay host cannot be resolved into a
    ///   TLS transport
    pub fn new(config: &EmailConfig) -> Result<Self, DomainError> {
        let transport = if config.smtp_user.is_empty() {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            let password = config
                .smtp_password
                .as_ref()
                .map(|p| p.expose_secret().clone())
                .unwrap_or_default();
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| mail_error(format!("SMTP relay error: {}", e)))?
                .credentials(Credentials::new(config.smtp_user.clone(), password))
                .port(config.smtp_port)
                .build()
        };
        Ok(Self { transport })
    }
}

fn mail_error(message: String) -> DomainError {
    DomainError::new(ErrorCode::MailDeliveryFailed, message)
}

/// Converts a notification mail into a `lettre` message.
fn build_message(mail: &MailMessage) -> Result<Message, DomainError> {
    Message::builder()
        .from(
            mail.from
                .parse()
                .map_err(|e| mail_error(format!("Invalid from address: {}", e)))?,
        )
        .to(mail
            .to
            .parse()
            .map_err(|e| mail_error(format!("Invalid to address: {}", e)))?)
        .subject(mail.subject.clone())
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|e| mail_error(format!("Failed to build email: {}", e)))
}

#[async_trait]
impl MailSender for SmtpMailSender {
    async fn send(&self, mail: &MailMessage) -> Result<(), DomainError> {
        let message = build_message(mail)?;
        self.transport
            .send(message)
            .await
            .map_err(|e| mail_error(format!("Failed to send email: {}", e)))?;
        debug!(to = %mail.to, notification = %mail.notification, "notification mail sent");
        Ok(())
    }
}
