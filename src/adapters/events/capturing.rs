//! Listener that records events of selected types while it is open.
//!
//! ```ignore
//! let listener = CapturingListener::open(bus.clone(), &[COMMENT_ADDED, DOCUMENT_CREATED]);
//! handler.handle(cmd, metadata).await?;
//! bus.commit().await?;
//! assert!(listener.has_been_fired(COMMENT_ADDED));
//! ```

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, EventEnvelope};
use crate::ports::{EventHandler, EventSubscriber};

struct Capture {
    open: AtomicBool,
    events: RwLock<Vec<EventEnvelope>>,
}

#[async_trait]
impl EventHandler for Capture {
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
        if self.open.load(Ordering::SeqCst) {
            self.events
                .write()
                .expect("CapturingListener: events lock poisoned")
                .push(event);
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "CapturingListener"
    }
}

/// Scoped event recorder.
///
/// Closing or dropping the listener unregisters it from the bus. Events
/// already captured stay readable after `close`.
///
/// # Panics
///
/// Methods may panic if the internal lock is poisoned.
pub struct CapturingListener {
    capture: Arc<Capture>,
    subscriber: Arc<dyn EventSubscriber>,
}

impl CapturingListener {
    /// Registers a new listener for the given event types.
    pub fn open(subscriber: Arc<dyn EventSubscriber>, event_types: &[&str]) -> Self {
        let capture = Arc::new(Capture {
            open: AtomicBool::new(true),
            events: RwLock::new(Vec::new()),
        });
        subscriber.subscribe_all(event_types, capture.clone());
        Self {
            capture,
            subscriber,
        }
    }

    /// Stops capturing and unregisters from the bus.
    pub fn close(&self) {
        if self.capture.open.swap(false, Ordering::SeqCst) {
            let handler: Arc<dyn EventHandler> = self.capture.clone();
            self.subscriber.unsubscribe(&handler);
        }
    }

    pub fn is_open(&self) -> bool {
        self.capture.open.load(Ordering::SeqCst)
    }

    /// True if at least one event of this type was captured.
    pub fn has_been_fired(&self, event_type: &str) -> bool {
        self.capture
            .events
            .read()
            .expect("CapturingListener: events lock poisoned")
            .iter()
            .any(|e| e.event_type == event_type)
    }

    /// Every captured event, in delivery order.
    pub fn captured_events(&self) -> Vec<EventEnvelope> {
        self.capture
            .events
            .read()
            .expect("CapturingListener: events lock poisoned")
            .clone()
    }

    pub fn captured_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.captured_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }
}

impl Drop for CapturingListener {
    fn drop(&mut self) {
        self.close();
    }
}
