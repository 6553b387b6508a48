//! Application handlers.
//!
//! Command handlers that orchestrate domain operations, and event handlers
//! that react to committed events.

pub mod annotation;
pub mod cold_storage;
pub mod document;
pub mod notification;

pub use annotation::{
    CreateAnnotationCommand, CreateAnnotationHandler, DeleteAnnotationCommand,
    DeleteAnnotationHandler, UpdateAnnotationCommand, UpdateAnnotationHandler,
};
pub use cold_storage::{
    MoveToColdStorageCommand, MoveToColdStorageHandler, RetrieveFromColdStorageCommand,
    RetrieveFromColdStorageHandler, MOVE_TO_COLD_STORAGE_OPERATION,
    RETRIEVE_FROM_COLD_STORAGE_OPERATION,
};
pub use document::{
    CreateDocumentCommand, CreateDocumentHandler, UpdateDocumentCommand, UpdateDocumentHandler,
};
pub use notification::{
    AutoSubscriptionHandler, MailSettings, NotificationListener, NotificationManager,
};

use crate::domain::foundation::{CommandMetadata, EventEnvelope};

/// Tags an envelope with the command's correlation and user ids.
pub(crate) fn stamp(
    envelope: EventEnvelope,
    correlation_id: &str,
    metadata: &CommandMetadata,
) -> EventEnvelope {
    envelope
        .with_correlation_id(correlation_id)
        .with_user_id(metadata.user_id.to_string())
}
