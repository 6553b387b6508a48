//! CreateAnnotationHandler - Command handler for annotating a document.

use std::sync::Arc;
use tracing::info;

use super::top_level_document_id;
use crate::application::handlers::stamp;
use crate::domain::annotation::{
    Annotation, AnnotationDraft, AnnotationError, CommentAdded, CommentEventContext,
};
use crate::domain::document::{Document, DocumentCreated, ANNOTATION_TYPE};
use crate::domain::foundation::{CommandMetadata, DocumentId, SerializableDomainEvent};
use crate::ports::{DocumentRepository, EventPublisher};

/// Name of an annotation document, unique among its siblings.
fn annotation_document_name(id: &DocumentId) -> String {
    format!("annotation-{}", id)
}

/// Command to create an annotation.
///
/// The draft's `parent_id` is either the annotated document or, for a
/// reply, the comment being answered.
#[derive(Debug, Clone)]
pub struct CreateAnnotationCommand {
    pub draft: AnnotationDraft,
}

/// Handler for creating annotations.
pub struct CreateAnnotationHandler {
    repository: Arc<dyn DocumentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateAnnotationHandler {
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
        cmd: CreateAnnotationCommand,
        metadata: CommandMetadata,
    ) -> Result<Annotation, AnnotationError> {
        // 1. Load parent
        let parent_id = cmd.draft.parent_id;
        let parent = self
            .repository
            .find_by_id(&parent_id)
            .await?
            .ok_or(AnnotationError::ParentNotFound(parent_id))?;

        // 2. Build annotation and its backing document
        let id = DocumentId::new();
        let mut document = Document::new_with_id(
            id,
            Some(&parent),
            &annotation_document_name(&id),
            ANNOTATION_TYPE,
        )?;
        let annotation = Annotation::create(*document.id(), cmd.draft)?;
        annotation.write_to(&mut document)?;

        // 3. Persist
        self.repository.save(&document).await?;
        let top_level_id = top_level_document_id(self.repository.as_ref(), document.id()).await?;

        // 4. Publish events
        let correlation_id = metadata.correlation_id();
        let comment_added = CommentAdded::new(CommentEventContext::new(&annotation, top_level_id));
        self.event_publisher
            .publish_all(vec![
                stamp(comment_added.to_envelope(), &correlation_id, &metadata),
                stamp(
                    DocumentCreated::from_document(&document).to_envelope(),
                    &correlation_id,
                    &metadata,
                ),
            ])
            .await?;

        info!(
            annotation_id = %annotation.id(),
            document_id = %top_level_id,
            author = %annotation.author(),
            "annotation created"
        );
        Ok(annotation)
    }
}
