//! AutoSubscriptionHandler - Subscribes comment authors to the annotated document.
//!
//! Each `(author, notification, document)` triple is auto-subscribed at most
//! once. An author who removes the subscription afterwards is not
//! re-subscribed by later comments.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::NotificationManager;
use crate::domain::annotation::CommentAdded;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope, UserId};
use crate::domain::notification::{NotificationError, SubscriberKey};
use crate::ports::{EventHandler, SubscriptionStore};

/// Handles `comment.added` by subscribing the author to configured notifications.
pub struct AutoSubscriptionHandler {
    manager: Arc<NotificationManager>,
    store: Arc<dyn SubscriptionStore>,
    notifications: Vec<String>,
}

impl AutoSubscriptionHandler {
    pub fn new(
        manager: Arc<NotificationManager>,
        store: Arc<dyn SubscriptionStore>,
        notifications: Vec<String>,
    ) -> Self {
        Self {
            manager,
            store,
            notifications,
        }
    }
}

#[async_trait]
impl EventHandler for AutoSubscriptionHandler {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        let comment_added: CommentAdded = event
            .payload_as()
            .map_err(|e| DomainError::new(ErrorCode::ValidationFailed, e.to_string()))?;
        let context = comment_added.context;
        let author = UserId::new(context.author)?;
        let subscriber = SubscriberKey::user(&author);
        let document_id = context.top_level_document_id;

        for notification in &self.notifications {
            if !self
                .store
                .mark_auto_subscribed(&subscriber, notification, &document_id)
                .await?
            {
                continue;
            }
            match self
                .manager
                .add_subscription(
                    &subscriber,
                    notification,
                    &document_id,
                    false,
                    Some(author.clone()),
                    None,
                )
                .await
            {
                Ok(_) => debug!(
                    subscriber = %subscriber,
                    notification = %notification,
                    document_id = %document_id,
                    "author auto-subscribed"
                ),
                Err(NotificationError::UnknownNotification(name)) => {
                    warn!(notification = %name, "auto-subscribe names an unknown notification")
                }
                Err(e) => {
                    return Err(DomainError::new(e.code(), e.to_string())
                        .with_detail("event_id", event.event_id.as_str()))
                }
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "AutoSubscriptionHandler"
    }
}
