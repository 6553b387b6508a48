//! Annotation domain module.
//!
//! Annotations are comments anchored to a location inside a document's
//! content. Replies are annotations whose parent is another comment.
//!
//! # Events
//!
//! - `CommentAdded`, `CommentUpdated`, `CommentRemoved`

mod aggregate;
mod errors;
mod events;
mod locator;

pub use aggregate::{
    Annotation, AnnotationDraft, AnnotationLifecycle, AnnotationUpdate, ExternalEntity,
    ANNOTATION_LIFECYCLE_PROPERTY, ANNOTATION_XPATH_PROPERTY, COMMENT_AUTHOR_PROPERTY,
    COMMENT_CREATION_DATE_PROPERTY, COMMENT_MODIFICATION_DATE_PROPERTY, COMMENT_PARENT_ID_PROPERTY,
    COMMENT_TEXT_PROPERTY, EXTERNAL_ENTITY_ID_PROPERTY, EXTERNAL_ENTITY_ORIGIN_PROPERTY,
    EXTERNAL_ENTITY_PROPERTY,
};
pub use errors::AnnotationError;
pub use events::{
    CommentAdded, CommentEventContext, CommentRemoved, CommentUpdated, COMMENT_ADDED,
    COMMENT_REMOVED, COMMENT_UPDATED,
};
pub use locator::Locator;
