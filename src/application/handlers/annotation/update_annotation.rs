//! UpdateAnnotationHandler - Command handler for editing an annotation.

use std::sync::Arc;
use tracing::info;

use super::top_level_document_id;
use crate::application::handlers::stamp;
use crate::domain::annotation::{
    Annotation, AnnotationError, AnnotationUpdate, CommentEventContext, CommentUpdated,
};
use crate::domain::document::DocumentUpdated;
use crate::domain::foundation::{CommandMetadata, DocumentId, SerializableDomainEvent};
use crate::ports::{DocumentRepository, EventPublisher};

/// Command to update an annotation.
#[derive(Debug, Clone)]
pub struct UpdateAnnotationCommand {
    pub annotation_id: DocumentId,
    pub update: AnnotationUpdate,
}

/// Handler for updating annotations.
pub struct UpdateAnnotationHandler {
    repository: Arc<dyn DocumentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateAnnotationHandler {
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
        cmd: UpdateAnnotationCommand,
        metadata: CommandMetadata,
    ) -> Result<Annotation, AnnotationError> {
        let mut document = self
            .repository
            .find_by_id(&cmd.annotation_id)
            .await?
            .ok_or(AnnotationError::NotFound(cmd.annotation_id))?;
        let mut annotation = Annotation::from_document(&document)?;

        annotation.apply_update(cmd.update)?;
        annotation.write_to(&mut document)?;
        self.repository.update(&document).await?;

        let top_level_id = top_level_document_id(self.repository.as_ref(), document.id()).await?;
        let correlation_id = metadata.correlation_id();
        let comment_updated =
            CommentUpdated::new(CommentEventContext::new(&annotation, top_level_id));
        self.event_publisher
            .publish_all(vec![
                stamp(comment_updated.to_envelope(), &correlation_id, &metadata),
                stamp(
                    DocumentUpdated::from_document(&document).to_envelope(),
                    &correlation_id,
                    &metadata,
                ),
            ])
            .await?;

        info!(annotation_id = %annotation.id(), "annotation updated");
        Ok(annotation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryDocumentRepository, TransactionalEventBus};
    use crate::application::handlers::annotation::test_support::{annotated_file, metadata};
    use crate::application::handlers::annotation::{
        CreateAnnotationCommand, CreateAnnotationHandler,
    };
    use crate::domain::annotation::{AnnotationDraft, AnnotationLifecycle, COMMENT_UPDATED};
    use crate::domain::document::DOCUMENT_UPDATED;

    async fn setup() -> (
        Arc<InMemoryDocumentRepository>,
        Arc<TransactionalEventBus>,
        Annotation,
    ) {
        let repo = Arc::new(InMemoryDocumentRepository::new());
        let bus = Arc::new(TransactionalEventBus::new());
        let file = annotated_file(&repo).await;
        let annotation = CreateAnnotationHandler::new(repo.clone(), bus.clone())
            .handle(
                CreateAnnotationCommand {
                    draft: AnnotationDraft::new(*file.id(), "john", "first", "file:content"),
                },
                metadata("john"),
            )
            .await
            .unwrap();
        bus.rollback();
        (repo, bus, annotation)
    }

    #[tokio::test]
    async fn updates_text_and_publishes_event_pair() {
        let (repo, bus, annotation) = setup().await;
        let handler = UpdateAnnotationHandler::new(repo.clone(), bus.clone());

        let updated = handler
            .handle(
                UpdateAnnotationCommand {
                    annotation_id: *annotation.id(),
                    update: AnnotationUpdate::text("second"),
                },
                metadata("john"),
            )
            .await
            .unwrap();

        assert_eq!(updated.text(), "second");
        assert_eq!(updated.lifecycle(), AnnotationLifecycle::Updated);
        let stored = repo.find_by_id(annotation.id()).await.unwrap().unwrap();
        assert_eq!(Annotation::from_document(&stored).unwrap().text(), "second");

        bus.commit().await.unwrap();
        assert_eq!(bus.committed_of_type(COMMENT_UPDATED).len(), 1);
        assert_eq!(bus.committed_of_type(DOCUMENT_UPDATED).len(), 1);
    }

    #[tokio::test]
    async fn unknown_annotation_is_not_found() {
        let (repo, bus, _) = setup().await;
        let handler = UpdateAnnotationHandler::new(repo, bus.clone());
        let missing = DocumentId::new();

        let err = handler
            .handle(
                UpdateAnnotationCommand {
                    annotation_id: missing,
                    update: AnnotationUpdate::text("second"),
                },
                metadata("john"),
            )
            .await
            .unwrap_err();

        assert_eq!(err, AnnotationError::NotFound(missing));
        assert_eq!(bus.pending_count(), 0);
    }

    #[tokio::test]
    async fn plain_document_is_not_an_annotation() {
        let repo = Arc::new(InMemoryDocumentRepository::new());
        let bus = Arc::new(TransactionalEventBus::new());
        let file = annotated_file(&repo).await;
        let handler = UpdateAnnotationHandler::new(repo, bus);

        let err = handler
            .handle(
                UpdateAnnotationCommand {
                    annotation_id: *file.id(),
                    update: AnnotationUpdate::text("second"),
                },
                metadata("john"),
            )
            .await
            .unwrap_err();

        assert_eq!(err, AnnotationError::NotFound(*file.id()));
    }

    #[tokio::test]
    async fn blank_text_leaves_annotation_untouched() {
        let (repo, bus, annotation) = setup().await;
        let handler = UpdateAnnotationHandler::new(repo.clone(), bus.clone());

        let err = handler
            .handle(
                UpdateAnnotationCommand {
                    annotation_id: *annotation.id(),
                    update: AnnotationUpdate::text("   "),
                },
                metadata("john"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AnnotationError::ValidationFailed { .. }));
        let stored = repo.find_by_id(annotation.id()).await.unwrap().unwrap();
        assert_eq!(Annotation::from_document(&stored).unwrap().text(), "first");
        assert_eq!(bus.pending_count(), 0);
    }
}
