//! Annotation domain events.
//!
//! Every event carries a [`CommentEventContext`] naming the comment document,
//! its direct parent and the top-level document being annotated. For a reply
//! the parent is another comment while the top-level document stays the
//! annotated one.

use serde::{Deserialize, Serialize};

use super::aggregate::Annotation;
use crate::domain::foundation::{domain_event, DocumentId, EventId, Timestamp};

pub const COMMENT_ADDED: &str = "comment.added";
pub const COMMENT_UPDATED: &str = "comment.updated";
pub const COMMENT_REMOVED: &str = "comment.removed";

/// Documents and author involved in a comment event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentEventContext {
    pub comment_id: DocumentId,
    pub parent_id: DocumentId,
    pub top_level_document_id: DocumentId,
    pub author: String,
    pub text: String,
}

impl CommentEventContext {
    pub fn new(annotation: &Annotation, top_level_document_id: DocumentId) -> Self {
        Self {
            comment_id: *annotation.id(),
            parent_id: *annotation.parent_id(),
            top_level_document_id,
            author: annotation.author().to_string(),
            text: annotation.text().to_string(),
        }
    }
}

/// Published when an annotation is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentAdded {
    pub event_id: EventId,
    pub comment_id: DocumentId,
    pub context: CommentEventContext,
    pub added_at: Timestamp,
}

impl CommentAdded {
    pub fn new(context: CommentEventContext) -> Self {
        Self {
            event_id: EventId::new(),
            comment_id: context.comment_id,
            context,
            added_at: Timestamp::now(),
        }
    }
}

domain_event!(
    CommentAdded,
    event_type = COMMENT_ADDED,
    aggregate_id = comment_id,
    aggregate_type = "Annotation",
    occurred_at = added_at,
    event_id = event_id
);

/// Published when an annotation's text or metadata changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentUpdated {
    pub event_id: EventId,
    pub comment_id: DocumentId,
    pub context: CommentEventContext,
    pub updated_at: Timestamp,
}

impl CommentUpdated {
    pub fn new(context: CommentEventContext) -> Self {
        Self {
            event_id: EventId::new(),
            comment_id: context.comment_id,
            context,
            updated_at: Timestamp::now(),
        }
    }
}

domain_event!(
    CommentUpdated,
    event_type = COMMENT_UPDATED,
    aggregate_id = comment_id,
    aggregate_type = "Annotation",
    occurred_at = updated_at,
    event_id = event_id
);

/// Published when an annotation is removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRemoved {
    pub event_id: EventId,
    pub comment_id: DocumentId,
    pub context: CommentEventContext,
    pub removed_at: Timestamp,
}

impl CommentRemoved {
    pub fn new(context: CommentEventContext) -> Self {
        Self {
            event_id: EventId::new(),
            comment_id: context.comment_id,
            context,
            removed_at: Timestamp::now(),
        }
    }
}

domain_event!(
    CommentRemoved,
    event_type = COMMENT_REMOVED,
    aggregate_id = comment_id,
    aggregate_type = "Annotation",
    occurred_at = removed_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::annotation::AnnotationDraft;
    use crate::domain::foundation::SerializableDomainEvent;

    fn context() -> CommentEventContext {
        let parent = DocumentId::new();
        let annotation = Annotation::create(
            DocumentId::new(),
            AnnotationDraft::new(parent, "john", "nice", "file:content"),
        )
        .unwrap();
        CommentEventContext::new(&annotation, parent)
    }

    #[test]
    fn comment_added_envelope_carries_context() {
        let ctx = context();
        let envelope = CommentAdded::new(ctx.clone()).to_envelope();

        assert_eq!(envelope.event_type, COMMENT_ADDED);
        assert_eq!(envelope.aggregate_type, "Annotation");
        assert_eq!(envelope.aggregate_id, ctx.comment_id.to_string());

        let restored: CommentAdded = envelope.payload_as().unwrap();
        assert_eq!(restored.context, ctx);
    }

    #[test]
    fn each_event_has_its_own_type() {
        let ctx = context();
        assert_eq!(CommentUpdated::new(ctx.clone()).to_envelope().event_type, COMMENT_UPDATED);
        assert_eq!(CommentRemoved::new(ctx).to_envelope().event_type, COMMENT_REMOVED);
    }
}
