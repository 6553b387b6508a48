//! Outbound notification mail.

use serde::{Deserialize, Serialize};

use super::definition::NotificationDefinition;
use super::matcher::EventTarget;
use crate::domain::foundation::{DocumentId, EventEnvelope};

/// A single mail produced by a notification, one per recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
    pub notification: String,
    pub event_type: String,
    pub document_id: DocumentId,
}

impl MailMessage {
    /// Renders the mail for one recipient of a matched notification.
    ///
    /// `document_title` names the target document in the subject; `base_url`
    /// prefixes the link to it.
    pub fn compose(
        from: &str,
        to: &str,
        definition: &NotificationDefinition,
        event: &EventEnvelope,
        target: &EventTarget,
        document_title: &str,
        base_url: &str,
    ) -> Self {
        let mut body = format!(
            "{}: {}\n\nEvent: {}\nDocument: {}/documents/{}\n",
            definition.label,
            document_title,
            event.event_type,
            base_url.trim_end_matches('/'),
            target.document_id,
        );
        if let Some(comment) = &target.comment {
            body.push_str(&format!("\n{} wrote:\n{}\n", comment.author, comment.text));
        }

        Self {
            from: from.to_string(),
            to: to.to_string(),
            subject: format!("{}: {}", definition.label, document_title),
            body,
            notification: definition.name.clone(),
            event_type: event.event_type.clone(),
            document_id: target.document_id,
        }
    }
}
