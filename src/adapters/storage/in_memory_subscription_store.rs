//! In-Memory Subscription Store

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DocumentId, DomainError};
use crate::domain::notification::{SubscriberKey, Subscription};
use crate::ports::SubscriptionStore;

type SubscriptionKey = (SubscriberKey, String, DocumentId);

/// In-memory subscriptions, kept in insertion order
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionStore {
    subscriptions: Arc<RwLock<Vec<Subscription>>>,
    auto_subscribed: Arc<RwLock<HashSet<SubscriptionKey>>>,
}

impl InMemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored subscription
    pub async fn all(&self) -> Vec<Subscription> {
        self.subscriptions.read().await.clone()
    }
}

#[async_trait]
impl SubscriptionStore for InMemorySubscriptionStore {
    async fn add(&self, subscription: Subscription) -> Result<bool, DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        if subscriptions.iter().any(|s| s.same_key(&subscription)) {
            return Ok(false);
        }
        subscriptions.push(subscription);
        Ok(true)
    }

    async fn remove(
        &self,
        subscriber: &SubscriberKey,
        notification: &str,
        document_id: &DocumentId,
    ) -> Result<bool, DomainError> {
        let mut subscriptions = self.subscriptions.write().await;
        let before = subscriptions.len();
        subscriptions.retain(|s| {
            !(&s.subscriber == subscriber
                && s.notification == notification
                && &s.document_id == document_id)
        });
        Ok(subscriptions.len() != before)
    }

    async fn find_for_subscriber(
        &self,
        subscriber: &SubscriberKey,
        document_id: &DocumentId,
    ) -> Result<Vec<Subscription>, DomainError> {
        Ok(self
            .subscriptions
            .read()
            .await
            .iter()
            .filter(|s| &s.subscriber == subscriber && &s.document_id == document_id)
            .cloned()
            .collect())
    }

    async fn find_for_documents(
        &self,
        document_ids: &[DocumentId],
    ) -> Result<Vec<Subscription>, DomainError> {
        Ok(self
            .subscriptions
            .read()
            .await
            .iter()
            .filter(|s| document_ids.contains(&s.document_id))
            .cloned()
            .collect())
    }

    async fn mark_auto_subscribed(
        &self,
        subscriber: &SubscriberKey,
        notification: &str,
        document_id: &DocumentId,
    ) -> Result<bool, DomainError> {
        Ok(self.auto_subscribed.write().await.insert((
            subscriber.clone(),
            notification.to_string(),
            *document_id,
        )))
    }
}
