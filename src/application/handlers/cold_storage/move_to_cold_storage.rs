//! MoveToColdStorageHandler - Moves a document's main content to the cold tier.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::application::automation::{
    parse_params, Operation, OperationContext, OperationError, OperationParams,
};
use crate::application::handlers::stamp;
use crate::domain::document::{Document, DocumentError, DocumentMovedToColdStorage, DocumentUpdated};
use crate::domain::foundation::{
    CommandMetadata, DocumentId, EventId, SerializableDomainEvent, Timestamp,
};
use crate::ports::{ColdStorageBackend, DocumentRepository, EventPublisher};

pub const MOVE_TO_COLD_STORAGE_OPERATION: &str = "Document.MoveToColdStorage";

/// The operation takes no parameters.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MoveToColdStorageParams {}

/// Command to move a document's main content to cold storage.
#[derive(Debug, Clone)]
pub struct MoveToColdStorageCommand {
    pub document_id: DocumentId,
}

/// Handler for moving content to cold storage.
pub struct MoveToColdStorageHandler {
    repository: Arc<dyn DocumentRepository>,
    backend: Arc<dyn ColdStorageBackend>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl MoveToColdStorageHandler {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        backend: Arc<dyn ColdStorageBackend>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            repository,
            backend,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: MoveToColdStorageCommand,
        metadata: CommandMetadata,
    ) -> Result<Document, DocumentError> {
        // 1. Load document and check preconditions
        let mut document = self
            .repository
            .find_by_id(&cmd.document_id)
            .await?
            .ok_or_else(|| DocumentError::not_found(cmd.document_id))?;
        let content = document.content_to_move()?.clone();

        // 2. Hand the content to the cold tier
        let cold_content = self.backend.store(document.id(), &content).await?;
        let cold_content_key = cold_content.key.clone();
        document.move_to_cold_storage(cold_content)?;

        // 3. Persist
        self.repository.update(&document).await?;

        // 4. Publish events
        let correlation_id = metadata.correlation_id();
        let moved = DocumentMovedToColdStorage {
            event_id: EventId::new(),
            document_id: *document.id(),
            cold_content_key: cold_content_key.clone(),
            moved_at: Timestamp::now(),
        };
        self.event_publisher
            .publish_all(vec![
                stamp(moved.to_envelope(), &correlation_id, &metadata),
                stamp(
                    DocumentUpdated::from_document(&document).to_envelope(),
                    &correlation_id,
                    &metadata,
                ),
            ])
            .await?;

        info!(
            document_id = %document.id(),
            cold_content_key = %cold_content_key,
            "main content moved to cold storage"
        );
        Ok(document)
    }
}

#[async_trait]
impl Operation for MoveToColdStorageHandler {
    fn id(&self) -> &'static str {
        MOVE_TO_COLD_STORAGE_OPERATION
    }

    async fn run(
        &self,
        ctx: &OperationContext,
        params: OperationParams,
    ) -> Result<Document, OperationError> {
        let MoveToColdStorageParams {} = parse_params(self.id(), params)?;
        Ok(self
            .handle(
                MoveToColdStorageCommand {
                    document_id: ctx.input,
                },
                ctx.metadata.clone(),
            )
            .await?)
    }
}
