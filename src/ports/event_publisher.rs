//! EventPublisher port - Interface for publishing domain events.
//!
//! Handlers publish through this port without knowing whether events are
//! dispatched immediately or held until the transaction commits.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for publishing domain events.
///
/// Implementations must:
/// - Preserve publish order for a single caller
/// - Propagate transport errors to the caller
///
/// # Example
///
/// ```ignore
/// let event = CommentAdded::new(context).to_envelope();
/// publisher.publish(event).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;

    /// Publish multiple events, in order.
    ///
    /// Events published together belong to the same user action, so a
    /// transactional adapter delivers them in the same commit.
    async fn publish_all(&self, events: Vec<EventEnvelope>) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventPublisher) {}

    #[test]
    fn event_publisher_is_object_safe() {
        fn _accepts_dyn(_publisher: &dyn EventPublisher) {}
    }
}
