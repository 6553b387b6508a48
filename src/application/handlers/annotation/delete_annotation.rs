//! DeleteAnnotationHandler - Command handler for removing an annotation.

use std::sync::Arc;
use tracing::info;

use super::top_level_document_id;
use crate::application::handlers::stamp;
use crate::domain::annotation::{Annotation, AnnotationError, CommentEventContext, CommentRemoved};
use crate::domain::document::DocumentRemoved;
use crate::domain::foundation::{CommandMetadata, DocumentId, SerializableDomainEvent};
use crate::ports::{DocumentRepository, EventPublisher};

/// Command to delete an annotation. Replies to it are removed with it.
#[derive(Debug, Clone)]
pub struct DeleteAnnotationCommand {
    pub annotation_id: DocumentId,
}

/// Handler for deleting annotations.
pub struct DeleteAnnotationHandler {
    repository: Arc<dyn DocumentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl DeleteAnnotationHandler {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteAnnotationCommand,
        metadata: CommandMetadata,
    ) -> Result<(), AnnotationError> {
        let document = self
            .repository
            .find_by_id(&cmd.annotation_id)
            .await?
            .ok_or(AnnotationError::NotFound(cmd.annotation_id))?;
        let mut annotation = Annotation::from_document(&document)?;

        // Resolve while the ancestry still exists
        let top_level_id = top_level_document_id(self.repository.as_ref(), document.id()).await?;

        annotation.mark_removed()?;
        let removed = self.repository.delete(document.id()).await?;

        let correlation_id = metadata.correlation_id();
        let comment_removed =
            CommentRemoved::new(CommentEventContext::new(&annotation, top_level_id));
        self.event_publisher
            .publish_all(vec![
                stamp(comment_removed.to_envelope(), &correlation_id, &metadata),
                stamp(
                    DocumentRemoved::from_document(&removed).to_envelope(),
                    &correlation_id,
                    &metadata,
                ),
            ])
            .await?;

        info!(annotation_id = %annotation.id(), "annotation removed");
        Ok(())
    }
}
