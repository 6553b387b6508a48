//! Subscriptions and the keys naming who subscribed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DocumentId, Timestamp, UserId, ValidationError};

const USER_PREFIX: &str = "user:";
const GROUP_PREFIX: &str = "group:";

/// Prefixed subscriber identity: `user:john` or `group:members`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SubscriberKey {
    User(String),
    Group(String),
}

impl SubscriberKey {
    pub fn user(user_id: &UserId) -> Self {
        SubscriberKey::User(user_id.as_str().to_string())
    }

    pub fn group(name: impl Into<String>) -> Self {
        SubscriberKey::Group(name.into())
    }

    /// Unprefixed user or group name.
    pub fn name(&self) -> &str {
        match self {
            SubscriberKey::User(name) | SubscriberKey::Group(name) => name,
        }
    }
}

impl FromStr for SubscriberKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (ctor, name): (fn(String) -> Self, &str) =
            if let Some(name) = s.strip_prefix(USER_PREFIX) {
                (SubscriberKey::User, name)
            } else if let Some(name) = s.strip_prefix(GROUP_PREFIX) {
                (SubscriberKey::Group, name)
            } else {
                return Err(ValidationError::invalid_format(
                    "subscriber",
                    format!("`{}` must start with `{}` or `{}`", s, USER_PREFIX, GROUP_PREFIX),
                ));
            };
        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("subscriber"));
        }
        Ok(ctor(name.to_string()))
    }
}

impl TryFrom<String> for SubscriberKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SubscriberKey> for String {
    fn from(key: SubscriberKey) -> Self {
        key.to_string()
    }
}

impl fmt::Display for SubscriberKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriberKey::User(name) => write!(f, "{}{}", USER_PREFIX, name),
            SubscriberKey::Group(name) => write!(f, "{}{}", GROUP_PREFIX, name),
        }
    }
}

/// A subscriber's request to be notified of one notification on one document.
///
/// Subscriptions are identified by `(subscriber, notification, document_id)`;
/// the remaining fields describe who created it and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub subscriber: SubscriberKey,
    pub notification: String,
    pub document_id: DocumentId,
    pub send_immediately: bool,
    pub actor: Option<UserId>,
    pub label: Option<String>,
    pub created_at: Timestamp,
}

impl Subscription {
    pub fn new(
        subscriber: SubscriberKey,
        notification: impl Into<String>,
        document_id: DocumentId,
    ) -> Self {
        Self {
            subscriber,
            notification: notification.into(),
            document_id,
            send_immediately: false,
            actor: None,
            label: None,
            created_at: Timestamp::now(),
        }
    }

    pub fn with_send_immediately(mut self, send_immediately: bool) -> Self {
        self.send_immediately = send_immediately;
        self
    }

    pub fn with_actor(mut self, actor: UserId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// True if both subscriptions share the same identifying triple.
    pub fn same_key(&self, other: &Subscription) -> bool {
        self.subscriber == other.subscriber
            && self.notification == other.notification
            && self.document_id == other.document_id
    }
}
