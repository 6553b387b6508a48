//! Mail sender that keeps every message instead of delivering it.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::notification::MailMessage;
use crate::ports::MailSender;

/// Records sent mail for assertions.
///
/// Callers that need only new mail keep the count they last saw and use
/// [`CapturingMailBox::mails_since`].
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned.
#[derive(Debug, Default)]
pub struct CapturingMailBox {
    sent: RwLock<Vec<MailMessage>>,
}

impl CapturingMailBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every mail sent so far, in send order.
    pub fn mails(&self) -> Vec<MailMessage> {
        self.sent
            .read()
            .expect("CapturingMailBox: sent lock poisoned")
            .clone()
    }

    /// Mail sent after the first `seen` messages.
    pub fn mails_since(&self, seen: usize) -> Vec<MailMessage> {
        self.sent
            .read()
            .expect("CapturingMailBox: sent lock poisoned")
            .iter()
            .skip(seen)
            .cloned()
            .collect()
    }

    pub fn sent_count(&self) -> usize {
        self.sent
            .read()
            .expect("CapturingMailBox: sent lock poisoned")
            .len()
    }

    pub fn mails_to(&self, recipient: &str) -> Vec<MailMessage> {
        self.mails().into_iter().filter(|m| m.to == recipient).collect()
    }
}

#[async_trait]
impl MailSender for CapturingMailBox {
    async fn send(&self, mail: &MailMessage) -> Result<(), DomainError> {
        self.sent
            .write()
            .expect("CapturingMailBox: sent lock poisoned")
            .push(mail.clone());
        Ok(())
    }
}
