//! Notification handlers.
//!
//! The manager owns the subscription API. The listener and the
//! auto-subscription handler are event handlers registered on the bus.

mod auto_subscription;
mod notification_listener;
mod notification_manager;

pub use auto_subscription::AutoSubscriptionHandler;
pub use notification_listener::{MailSettings, NotificationListener};
pub use notification_manager::NotificationManager;
