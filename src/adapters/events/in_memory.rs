//! Dispatcher behind the transactional bus.
//!
//! Hands every event to the handlers registered for its type before
//! `publish` returns, and keeps a log of what it delivered.
//! [`TransactionalEventBus`](super::TransactionalEventBus) feeds it at
//! commit time.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

type HandlerTable = HashMap<String, Vec<Arc<dyn EventHandler>>>;

/// Immediate-delivery event bus.
///
/// Handlers of one event type run in registration order. A failing handler
/// does not keep the others from running; the failures are reported together.
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned.
pub struct InMemoryEventBus {
    handlers: RwLock<HandlerTable>,
    delivered: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            delivered: RwLock::new(Vec::new()),
        }
    }

    /// Every event delivered so far, in delivery order.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.delivered
            .read()
            .expect("InMemoryEventBus: delivered lock poisoned")
            .clone()
    }

    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    #[cfg(test)]
    pub(crate) fn handler_count(&self, event_type: &str) -> usize {
        self.handlers
            .read()
            .expect("InMemoryEventBus: handlers lock poisoned")
            .get(event_type)
            .map_or(0, Vec::len)
    }

    fn handlers_for(&self, event_type: &str) -> Vec<Arc<dyn EventHandler>> {
        self.handlers
            .read()
            .expect("InMemoryEventBus: handlers lock poisoned")
            .get(event_type)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        self.delivered
            .write()
            .expect("InMemoryEventBus: delivered lock poisoned")
            .push(event.clone());

        // Snapshot so no lock is held across handler awaits
        let handlers = self.handlers_for(&event.event_type);

        let mut errors = Vec::new();
        for handler in handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            )
            .with_detail("event_type", event.event_type));
        }

        Ok(())
    }

    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError> {
        for event in events {
            self.publish(event).await?;
        }
        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>) {
        self.subscribe_all(&[event_type], handler);
    }

    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .expect("InMemoryEventBus: handlers lock poisoned");
        for event_type in event_types {
            handlers
                .entry(event_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }

    fn unsubscribe(&self, handler: &Arc<dyn EventHandler>) -> usize {
        let mut handlers = self
            .handlers
            .write()
            .expect("InMemoryEventBus: handlers lock poisoned");
        let mut removed = 0;
        handlers.retain(|_, registered| {
            let before = registered.len();
            registered.retain(|h| !Arc::ptr_eq(h, handler));
            removed += before - registered.len();
            !registered.is_empty()
        });
        removed
    }
}
