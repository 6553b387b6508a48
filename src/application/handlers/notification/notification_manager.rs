//! NotificationManager - Subscription commands and queries.

use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::{DocumentId, UserId};
use crate::domain::notification::{
    NotificationError, NotificationRegistry, SubscriberKey, Subscription,
};
use crate::ports::SubscriptionStore;

/// Subscription API over a [`SubscriptionStore`].
///
/// Only notifications known to the registry can be subscribed to.
pub struct NotificationManager {
    store: Arc<dyn SubscriptionStore>,
    registry: Arc<NotificationRegistry>,
}

impl NotificationManager {
    pub fn new(store: Arc<dyn SubscriptionStore>, registry: Arc<NotificationRegistry>) -> Self {
        Self { store, registry }
    }

    pub fn registry(&self) -> &NotificationRegistry {
        &self.registry
    }

    /// Subscribes `subscriber` to `notification` on a document.
    ///
    /// Returns `false` if the subscription already existed, in which case
    /// the stored one is kept as is.
    ///
    /// # Errors
    ///
    /// - `UnknownNotification` if the registry has no such notification
    pub async fn add_subscription(
        &self,
        subscriber: &SubscriberKey,
        notification: &str,
        document_id: &DocumentId,
        send_immediately: bool,
        actor: Option<UserId>,
        label: Option<String>,
    ) -> Result<bool, NotificationError> {
        if !self.registry.contains(notification) {
            return Err(NotificationError::UnknownNotification(
                notification.to_string(),
            ));
        }

        let mut subscription = Subscription::new(subscriber.clone(), notification, *document_id)
            .with_send_immediately(send_immediately);
        if let Some(actor) = actor {
            subscription = subscription.with_actor(actor);
        }
        if let Some(label) = label {
            subscription = subscription.with_label(label);
        }

        let added = self.store.add(subscription).await?;
        debug!(
            subscriber = %subscriber,
            notification,
            document_id = %document_id,
            added,
            "subscription added"
        );
        Ok(added)
    }

    /// Removes a subscription. Returns `false` if there was none.
    pub async fn remove_subscription(
        &self,
        subscriber: &SubscriberKey,
        notification: &str,
        document_id: &DocumentId,
    ) -> Result<bool, NotificationError> {
        let removed = self
            .store
            .remove(subscriber, notification, document_id)
            .await?;
        debug!(
            subscriber = %subscriber,
            notification,
            document_id = %document_id,
            removed,
            "subscription removed"
        );
        Ok(removed)
    }

    /// Names of the notifications a subscriber has on a document, sorted.
    pub async fn get_subscriptions_for_user_on_document(
        &self,
        subscriber: &SubscriberKey,
        document_id: &DocumentId,
    ) -> Result<Vec<String>, NotificationError> {
        let mut names: Vec<String> = self
            .store
            .find_for_subscriber(subscriber, document_id)
            .await?
            .into_iter()
            .map(|s| s.notification)
            .collect();
        names.sort();
        names.dedup();
        Ok(names)
    }

    /// Subscribers of a notification on a document, in subscription order.
    pub async fn get_subscribers(
        &self,
        notification: &str,
        document_id: &DocumentId,
    ) -> Result<Vec<SubscriberKey>, NotificationError> {
        Ok(self
            .store
            .find_for_documents(std::slice::from_ref(document_id))
            .await?
            .into_iter()
            .filter(|s| s.notification == notification)
            .map(|s| s.subscriber)
            .collect())
    }
}
