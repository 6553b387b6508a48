//! Notification domain module.
//!
//! Subscriptions bind a subscriber to a named notification on a document.
//! Matching an event against subscriptions is a pure function; sending the
//! resulting mail is left to the application layer.

mod definition;
mod errors;
mod mail;
mod matcher;
mod subscription;

pub use definition::{
    NotificationDefinition, NotificationRegistry, COMMENT_ADDED_NOTIFICATION,
    COMMENT_REMOVED_NOTIFICATION, COMMENT_UPDATED_NOTIFICATION, CREATION_NOTIFICATION,
    MODIFICATION_NOTIFICATION,
};
pub use errors::NotificationError;
pub use mail::MailMessage;
pub use matcher::{match_notifications, EventTarget, NotificationMatch};
pub use subscription::{SubscriberKey, Subscription};
