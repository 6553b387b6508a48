//! NotificationListener - Sends notification mail for committed events.
//!
//! Runs at commit time for comment and document events. Subscriptions on the
//! target document and its ancestors are matched, group subscribers are
//! expanded to their members, and one mail is sent per resolved recipient.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::EmailConfig;
use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::domain::notification::{
    match_notifications, EventTarget, MailMessage, NotificationMatch, NotificationRegistry,
    SubscriberKey,
};
use crate::ports::{DocumentRepository, EventHandler, MailSender, SubscriptionStore, UserDirectory};

/// Sender address and link prefix used in outgoing mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailSettings {
    pub from: String,
    pub base_url: String,
}

impl MailSettings {
    pub fn from_config(config: &EmailConfig) -> Self {
        Self {
            from: config.from_header(),
            base_url: config.base_url.clone(),
        }
    }
}

/// Event handler turning subscriptions into mail.
pub struct NotificationListener {
    subscriptions: Arc<dyn SubscriptionStore>,
    documents: Arc<dyn DocumentRepository>,
    directory: Arc<dyn UserDirectory>,
    mail_sender: Arc<dyn MailSender>,
    registry: Arc<NotificationRegistry>,
    settings: MailSettings,
}

impl NotificationListener {
    pub fn new(
        subscriptions: Arc<dyn SubscriptionStore>,
        documents: Arc<dyn DocumentRepository>,
        directory: Arc<dyn UserDirectory>,
        mail_sender: Arc<dyn MailSender>,
        registry: Arc<NotificationRegistry>,
        settings: MailSettings,
    ) -> Self {
        Self {
            subscriptions,
            documents,
            directory,
            mail_sender,
            registry,
            settings,
        }
    }

    /// Event types that trigger at least one registered notification.
    pub fn event_types(&self) -> Vec<String> {
        let mut types: Vec<String> = self
            .registry
            .names()
            .filter_map(|name| self.registry.get(name))
            .flat_map(|d| d.event_types.iter().cloned())
            .collect();
        types.sort();
        types.dedup();
        types
    }

    /// Expands matches into `(user, notification)` pairs, each at most once.
    async fn recipients(
        &self,
        matches: &[NotificationMatch],
    ) -> Result<Vec<(String, String)>, DomainError> {
        let mut seen = HashSet::new();
        let mut recipients = Vec::new();
        for m in matches {
            let users = match &m.subscriber {
                SubscriberKey::User(user) => vec![user.clone()],
                SubscriberKey::Group(group) => self.directory.members_of(group).await?,
            };
            for user in users {
                if seen.insert((user.clone(), m.notification.clone())) {
                    recipients.push((user, m.notification.clone()));
                }
            }
        }
        Ok(recipients)
    }
}

#[async_trait]
impl EventHandler for NotificationListener {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let Some(target) = EventTarget::of(&event) else {
            return Ok(());
        };
        if target.vetoed {
            return Ok(());
        }

        // A removed target has no ancestry left; only its own subscriptions apply
        let document = self.documents.find_by_id(&target.document_id).await?;
        let ancestors = match document {
            Some(_) => self
                .documents
                .ancestors(&target.document_id)
                .await?
                .iter()
                .map(|d| *d.id())
                .collect(),
            None => Vec::new(),
        };
        let target = target.with_ancestors(ancestors);
        let title = document
            .as_ref()
            .map(|d| d.title().to_string())
            .unwrap_or_else(|| target.document_id.to_string());

        let subscriptions = self.subscriptions.find_for_documents(&target.scope()).await?;
        let matches = match_notifications(&event, &target, &subscriptions, &self.registry);
        if matches.is_empty() {
            return Ok(());
        }

        for (user, notification) in self.recipients(&matches).await? {
            let Some(definition) = self.registry.get(&notification) else {
                continue;
            };
            let Some(address) = self.directory.email_of(&user).await? else {
                debug!(user = %user, notification = %notification, "no mail address, skipping");
                continue;
            };

            let mail = MailMessage::compose(
                &self.settings.from,
                &address,
                definition,
                &event,
                &target,
                &title,
                &self.settings.base_url,
            );
            match self.mail_sender.send(&mail).await {
                Ok(()) => debug!(
                    to = %address,
                    notification = %notification,
                    document_id = %target.document_id,
                    "notification sent"
                ),
                Err(e) => warn!(
                    to = %address,
                    notification = %notification,
                    error = %e,
                    "notification mail failed"
                ),
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "NotificationListener"
    }
}
