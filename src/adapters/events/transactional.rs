//! Event bus that defers delivery until the transaction commits.
//!
//! Handlers only ever see the state of a committed transaction: events are
//! buffered on publish and delivered by [`TransactionalEventBus::commit`].
//! Events that handlers publish while a commit runs are delivered by the
//! same commit.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

use super::InMemoryEventBus;
use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// Rounds of handler-published events a single commit will deliver.
const MAX_COMMIT_ROUNDS: usize = 32;

/// Buffers published events until `commit`.
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned.
pub struct TransactionalEventBus {
    pending: Mutex<Vec<EventEnvelope>>,
    dispatcher: Arc<InMemoryEventBus>,
}

impl TransactionalEventBus {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(Vec::new()),
            dispatcher: Arc::new(InMemoryEventBus::new()),
        }
    }

    /// Delivers buffered events in publish order.
    ///
    /// A failing handler is logged and does not stop delivery. Returns the
    /// number of events delivered.
    ///
    /// # Errors
    ///
    /// - `InternalError` if handlers keep publishing for more than
    ///   `MAX_COMMIT_ROUNDS` rounds; undelivered events are dropped
    pub async fn commit(&self) -> Result<usize, DomainError> {
        let mut delivered = 0;
        for _ in 0..MAX_COMMIT_ROUNDS {
            let batch = self.take_pending();
            if batch.is_empty() {
                debug!(delivered, "transaction committed");
                return Ok(delivered);
            }
            for event in batch {
                delivered += 1;
                let event_type = event.event_type.clone();
                if let Err(e) = self.dispatcher.publish(event).await {
                    warn!(event_type = %event_type, error = %e, "event handler failed");
                }
            }
        }

        let dropped = self.take_pending().len();
        Err(DomainError::new(
            ErrorCode::InternalError,
            format!(
                "Commit did not settle after {} rounds, {} events dropped",
                MAX_COMMIT_ROUNDS, dropped
            ),
        ))
    }

    /// Discards buffered events.
    pub fn rollback(&self) -> usize {
        self.take_pending().len()
    }

    /// Number of events waiting for the next commit.
    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .expect("TransactionalEventBus: pending lock poisoned")
            .len()
    }

    /// Events delivered by previous commits.
    pub fn committed_events(&self) -> Vec<EventEnvelope> {
        self.dispatcher.published_events()
    }

    /// Committed events of a specific type.
    pub fn committed_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.dispatcher.events_of_type(event_type)
    }

    #[cfg(test)]
    pub(crate) fn handler_count(&self, event_type: &str) -> usize {
        self.dispatcher.handler_count(event_type)
    }

    fn take_pending(&self) -> Vec<EventEnvelope> {
        std::mem::take(
            &mut *self
                .pending
                .lock()
                .expect("TransactionalEventBus: pending lock poisoned"),
        )
    }
}

impl Default for TransactionalEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for TransactionalEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.pending
            .lock()
            .expect("TransactionalEventBus: pending lock poisoned")
            .push(event);
        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        self.pending
            .lock()
            .expect("TransactionalEventBus: pending lock poisoned")
            .extend(events);
        Ok(())
    }
}

impl EventSubscriber for TransactionalEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.dispatcher.subscribe(event_type, handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        self.dispatcher.subscribe_all(event_types, handler);
    }

    fn unsubscribe(&self, handler: &Arc<dyn EventHandler>) -> usize {
        self.dispatcher.unsubscribe(handler)
    }
}
