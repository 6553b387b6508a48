//! EventSubscriber port - Interface for subscribing to domain events.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Handler for processing domain events.
///
/// A failing handler does not stop delivery to the other handlers of the
/// same event.
///
/// # Example
///
/// ```ignore
/// struct MailNotifier { /* ... */ }
///
/// #[async_trait]
/// impl EventHandler for MailNotifier {
///     async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError> {
///         let payload: CommentAdded = event.payload_as()?;
///         // Send mail...
///         Ok(())
///     }
///
///     fn name(&self) -> &'static str {
///         "MailNotifier"
///     }
/// }
/// ```
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// Process an event.
    async fn handle(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Handler name for logging.
    fn name(&self) -> &'static str;
}

/// Port for subscribing to domain events.
///
/// ```ignore
/// subscriber.subscribe("comment.added", auto_subscriber);
/// subscriber.subscribe_all(&["comment.added", "document.created"], notifier);
/// ```
pub trait EventSubscriber: Send + Sync {
    /// Subscribe handler to a specific event type.
    fn subscribe(&self, event_type: &str, handler: Arc<dyn EventHandler>);

    /// Subscribe handler to multiple event types.
    ///
    /// The same handler instance is invoked for any matching event type.
    fn subscribe_all(&self, event_types: &[&str], handler: Arc<dyn EventHandler>);

    /// Removes every registration of this handler instance.
    ///
    /// Handlers are matched by identity. Returns the number of registrations
    /// removed.
    fn unsubscribe(&self, handler: &Arc<dyn EventHandler>) -> usize;
}

/// Combined trait for event bus implementations.
pub trait EventBus: super::EventPublisher + EventSubscriber {}

impl<T: super::EventPublisher + EventSubscriber> EventBus for T {}
