//! Subscription store port.

use async_trait::async_trait;

use crate::domain::foundation::{DocumentId, DomainError};
use crate::domain::notification::{SubscriberKey, Subscription};

/// Persistence for notification subscriptions.
///
/// Subscriptions are unique per `(subscriber, notification, document)`.
/// The store also remembers which of those triples were auto-subscribed, so
/// that an explicit removal is not undone later.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Adds a subscription.
    ///
    /// Returns `false` and keeps the existing entry if one with the same key
    /// is already stored.
    async fn add(&self, subscription: Subscription) -> Result<bool, DomainError>;

    /// Removes a subscription. Returns `false` if there was none.
    async fn remove(
        &self,
        subscriber: &SubscriberKey,
        notification: &str,
        document_id: &DocumentId,
    ) -> Result<bool, DomainError>;

    /// All subscriptions of one subscriber on one document.
    async fn find_for_subscriber(
        &self,
        subscriber: &SubscriberKey,
        document_id: &DocumentId,
    ) -> Result<Vec<Subscription>, DomainError>;

    /// All subscriptions on any of the given documents, in insertion order.
    async fn find_for_documents(
        &self,
        document_ids: &[DocumentId],
    ) -> Result<Vec<Subscription>, DomainError>;

    /// Records that a triple was auto-subscribed.
    ///
    /// Returns `true` the first time for a given triple, `false` afterwards.
    async fn mark_auto_subscribed(
        &self,
        subscriber: &SubscriberKey,
        notification: &str,
        document_id: &DocumentId,
    ) -> Result<bool, DomainError>;
}
