//! Notification definitions and their registry.

use std::collections::BTreeMap;

use crate::domain::annotation::{COMMENT_ADDED, COMMENT_REMOVED, COMMENT_UPDATED};
use crate::domain::document::{DOCUMENT_CREATED, DOCUMENT_UPDATED};

pub const COMMENT_ADDED_NOTIFICATION: &str = "CommentAdded";
pub const COMMENT_UPDATED_NOTIFICATION: &str = "CommentUpdated";
pub const COMMENT_REMOVED_NOTIFICATION: &str = "CommentRemoved";
pub const CREATION_NOTIFICATION: &str = "Creation";
pub const MODIFICATION_NOTIFICATION: &str = "Modification";

/// A named notification triggered by one or more event types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationDefinition {
    pub name: String,
    pub event_types: Vec<String>,
    /// Prefix of the mail subject.
    pub label: String,
}

impl NotificationDefinition {
    pub fn new(name: impl Into<String>, event_types: &[&str], label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event_types: event_types.iter().map(|t| t.to_string()).collect(),
            label: label.into(),
        }
    }

    pub fn is_triggered_by(&self, event_type: &str) -> bool {
        self.event_types.iter().any(|t| t == event_type)
    }
}

/// Known notifications, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct NotificationRegistry {
    definitions: BTreeMap<String, NotificationDefinition>,
}

impl NotificationRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Registry with the comment and document notifications.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(NotificationDefinition::new(
            COMMENT_ADDED_NOTIFICATION,
            &[COMMENT_ADDED],
            "New comment",
        ));
        registry.register(NotificationDefinition::new(
            COMMENT_UPDATED_NOTIFICATION,
            &[COMMENT_UPDATED],
            "Comment updated",
        ));
        registry.register(NotificationDefinition::new(
            COMMENT_REMOVED_NOTIFICATION,
            &[COMMENT_REMOVED],
            "Comment removed",
        ));
        registry.register(NotificationDefinition::new(
            CREATION_NOTIFICATION,
            &[DOCUMENT_CREATED],
            "Document created",
        ));
        registry.register(NotificationDefinition::new(
            MODIFICATION_NOTIFICATION,
            &[DOCUMENT_UPDATED],
            "Document modified",
        ));
        registry
    }

    /// Adds or replaces a definition.
    pub fn register(&mut self, definition: NotificationDefinition) {
        self.definitions.insert(definition.name.clone(), definition);
    }

    pub fn get(&self, name: &str) -> Option<&NotificationDefinition> {
        self.definitions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn triggered_by<'a>(
        &'a self,
        event_type: &'a str,
    ) -> impl Iterator<Item = &'a NotificationDefinition> + 'a {
        self.definitions
            .values()
            .filter(move |d| d.is_triggered_by(event_type))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_comment_and_document_notifications() {
        let registry = NotificationRegistry::with_defaults();
        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "CommentAdded",
                "CommentRemoved",
                "CommentUpdated",
                "Creation",
                "Modification"
            ]
        );
    }

    #[test]
    fn triggered_by_matches_event_type() {
        let registry = NotificationRegistry::with_defaults();
        let triggered: Vec<_> = registry
            .triggered_by(COMMENT_ADDED)
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(triggered, vec![COMMENT_ADDED_NOTIFICATION]);
        assert_eq!(registry.triggered_by("unknown.event").count(), 0);
    }

    #[test]
    fn register_replaces_existing_definition() {
        let mut registry = NotificationRegistry::with_defaults();
        registry.register(NotificationDefinition::new(
            CREATION_NOTIFICATION,
            &[DOCUMENT_CREATED, COMMENT_ADDED],
            "Created",
        ));
        let creation = registry.get(CREATION_NOTIFICATION).unwrap();
        assert!(creation.is_triggered_by(COMMENT_ADDED));
        assert_eq!(creation.label, "Created");
    }
}
