//! Pure matching of events against subscriptions.
//!
//! Comment events target the top-level annotated document. Document events
//! target the document itself, except that document events about comment
//! documents are vetoed so that an annotation never produces `Creation` or
//! `Modification` mail on its own.

use serde::Deserialize;
use std::collections::HashSet;

use super::definition::NotificationRegistry;
use super::subscription::{SubscriberKey, Subscription};
use crate::domain::annotation::{
    CommentEventContext, COMMENT_ADDED, COMMENT_REMOVED, COMMENT_UPDATED,
};
use crate::domain::document::{
    ANNOTATION_TYPE, COMMENT_TYPE, DOCUMENT_CREATED, DOCUMENT_REMOVED, DOCUMENT_UPDATED,
};
use crate::domain::foundation::{DocumentId, EventEnvelope};

#[derive(Deserialize)]
struct CommentPayload {
    context: CommentEventContext,
}

#[derive(Deserialize)]
struct DocumentPayload {
    document_id: DocumentId,
    doc_type: String,
}

/// The document an event is about, for notification purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventTarget {
    pub document_id: DocumentId,
    /// Ancestors of the target; subscriptions on them also match.
    pub ancestors: Vec<DocumentId>,
    pub vetoed: bool,
    pub comment: Option<CommentEventContext>,
}

impl EventTarget {
    /// Resolves the target of a comment or document event.
    ///
    /// Returns `None` for event types that never notify or for payloads that
    /// do not have the expected shape.
    pub fn of(event: &EventEnvelope) -> Option<Self> {
        match event.event_type.as_str() {
            COMMENT_ADDED | COMMENT_UPDATED | COMMENT_REMOVED => {
                let payload: CommentPayload = event.payload_as().ok()?;
                Some(Self {
                    document_id: payload.context.top_level_document_id,
                    ancestors: Vec::new(),
                    vetoed: false,
                    comment: Some(payload.context),
                })
            }
            DOCUMENT_CREATED | DOCUMENT_UPDATED | DOCUMENT_REMOVED => {
                let payload: DocumentPayload = event.payload_as().ok()?;
                Some(Self {
                    document_id: payload.document_id,
                    ancestors: Vec::new(),
                    vetoed: payload.doc_type == COMMENT_TYPE || payload.doc_type == ANNOTATION_TYPE,
                    comment: None,
                })
            }
            _ => None,
        }
    }

    pub fn with_ancestors(mut self, ancestors: Vec<DocumentId>) -> Self {
        self.ancestors = ancestors;
        self
    }

    /// Target followed by its ancestors.
    pub fn scope(&self) -> Vec<DocumentId> {
        std::iter::once(self.document_id)
            .chain(self.ancestors.iter().copied())
            .collect()
    }

    fn covers(&self, document_id: &DocumentId) -> bool {
        &self.document_id == document_id || self.ancestors.contains(document_id)
    }
}

/// One subscriber to notify about one notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMatch {
    pub notification: String,
    pub subscriber: SubscriberKey,
    pub document_id: DocumentId,
}

/// Matches an event against subscriptions.
///
/// A subscription matches when its notification is triggered by the event
/// type and its document is the target or one of its ancestors. Each
/// `(subscriber, notification)` pair appears at most once, in subscription
/// order.
pub fn match_notifications(
    event: &EventEnvelope,
    target: &EventTarget,
    subscriptions: &[Subscription],
    registry: &NotificationRegistry,
) -> Vec<NotificationMatch> {
    if target.vetoed {
        return Vec::new();
    }
    let triggered: HashSet<&str> = registry
        .triggered_by(&event.event_type)
        .map(|d| d.name.as_str())
        .collect();
    if triggered.is_empty() {
        return Vec::new();
    }

    let mut seen = HashSet::new();
    subscriptions
        .iter()
        .filter(|s| triggered.contains(s.notification.as_str()))
        .filter(|s| target.covers(&s.document_id))
        .filter(|s| seen.insert((s.subscriber.clone(), s.notification.clone())))
        .map(|s| NotificationMatch {
            notification: s.notification.clone(),
            subscriber: s.subscriber.clone(),
            document_id: target.document_id,
        })
        .collect()
}
