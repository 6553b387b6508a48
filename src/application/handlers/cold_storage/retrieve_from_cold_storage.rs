//! RetrieveFromColdStorageHandler - Requests retrieval of cold content.
//!
//! The backend restores content asynchronously. Until then the document is
//! flagged `coldstorage:beingRetrieved` and records the availability window.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::info;

use crate::application::automation::{
    parse_params, Operation, OperationContext, OperationError, OperationParams,
};
use crate::application::handlers::stamp;
use crate::domain::document::{
    ColdStorageRetrievalRequested, Document, DocumentError, DocumentUpdated,
};
use crate::domain::foundation::{
    CommandMetadata, DocumentId, EventId, SerializableDomainEvent, Timestamp,
};
use crate::ports::{ColdStorageBackend, DocumentRepository, EventPublisher};

pub const RETRIEVE_FROM_COLD_STORAGE_OPERATION: &str = "Document.RetrieveFromColdStorage";

const DAYS_PARAMETER: &str = "numberOfDaysOfAvailability";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RetrieveFromColdStorageParams {
    number_of_days_of_availability: u32,
}

/// Command to request retrieval of a document's cold content.
#[derive(Debug, Clone)]
pub struct RetrieveFromColdStorageCommand {
    pub document_id: DocumentId,
    pub number_of_days_of_availability: u32,
}

/// Handler for retrieval requests.
pub struct RetrieveFromColdStorageHandler {
    repository: Arc<dyn DocumentRepository>,
    backend: Arc<dyn ColdStorageBackend>,
    event_publisher: Arc<dyn EventPublisher>,
    max_days_of_availability: Option<u32>,
}

impl RetrieveFromColdStorageHandler {
    pub fn new(
        repository: Arc<dyn DocumentRepository>,
        backend: Arc<dyn ColdStorageBackend>,
        event_publisher: Arc<dyn EventPublisher>,
        max_days_of_availability: Option<u32>,
    ) -> Self {
        Self {
            repository,
            backend,
            event_publisher,
            max_days_of_availability,
        }
    }

    pub async fn handle(
        &self,
        cmd: RetrieveFromColdStorageCommand,
        metadata: CommandMetadata,
    ) -> Result<Document, DocumentError> {
        // 1. Validate input before touching anything
        let days = cmd.number_of_days_of_availability;
        self.check_window(days)?;

        // 2. Load document and check preconditions
        let mut document = self
            .repository
            .find_by_id(&cmd.document_id)
            .await?
            .ok_or_else(|| DocumentError::not_found(cmd.document_id))?;
        let cold_content = document.cold_content_to_retrieve()?.clone();

        // 3. Record the request, then start retrieval on the backend
        let request = document.request_retrieval(days, Timestamp::now())?;
        self.backend.request_retrieval(&cold_content, days).await?;

        // 4. Persist
        self.repository.update(&document).await?;

        // 5. Publish events
        let correlation_id = metadata.correlation_id();
        let requested = ColdStorageRetrievalRequested {
            event_id: EventId::new(),
            document_id: *document.id(),
            number_of_days_of_availability: request.number_of_days_of_availability,
            available_until: request.available_until,
            requested_at: request.requested_at,
        };
        self.event_publisher
            .publish_all(vec![
                stamp(requested.to_envelope(), &correlation_id, &metadata),
                stamp(
                    DocumentUpdated::from_document(&document).to_envelope(),
                    &correlation_id,
                    &metadata,
                ),
            ])
            .await?;

        info!(
            document_id = %document.id(),
            days,
            available_until = %request.available_until.as_datetime(),
            "cold storage retrieval requested"
        );
        Ok(document)
    }

    fn check_window(&self, days: u32) -> Result<(), DocumentError> {
        if days == 0 {
            return Err(DocumentError::validation(
                DAYS_PARAMETER,
                "must be a positive number of days",
            ));
        }
        match self.max_days_of_availability {
            Some(max) if days > max => Err(DocumentError::validation(
                DAYS_PARAMETER,
                format!("must be at most {}, got {}", max, days),
            )),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Operation for RetrieveFromColdStorageHandler {
    fn id(&self) -> &'static str {
        RETRIEVE_FROM_COLD_STORAGE_OPERATION
    }

    async fn run(
        &self,
        ctx: &OperationContext,
        params: OperationParams,
    ) -> Result<Document, OperationError> {
        let params: RetrieveFromColdStorageParams = parse_params(self.id(), params)?;
        Ok(self
            .handle(
                RetrieveFromColdStorageCommand {
                    document_id: ctx.input,
                    number_of_days_of_availability: params.number_of_days_of_availability,
                },
                ctx.metadata.clone(),
            )
            .await?)
    }
}
