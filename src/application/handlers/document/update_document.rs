//! UpdateDocumentHandler - Command handler for modifying documents.

use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

use crate::application::handlers::stamp;
use crate::domain::document::{Blob, Document, DocumentError, DocumentUpdated};
use crate::domain::foundation::{CommandMetadata, DocumentId, SerializableDomainEvent};
use crate::ports::{DocumentRepository, EventPublisher};

/// Command to modify a document. Unset fields are left untouched.
#[derive(Debug, Clone)]
pub struct UpdateDocumentCommand {
    pub document_id: DocumentId,
    pub title: Option<String>,
    pub content: Option<Blob>,
    pub properties: Vec<(String, JsonValue)>,
}

impl UpdateDocumentCommand {
    pub fn new(document_id: DocumentId) -> Self {
        Self {
            document_id,
            title: None,
            content: None,
            properties: Vec::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_content(mut self, content: Blob) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_property(mut self, name: impl Into<String>, value: JsonValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }
}

/// Handler for modifying documents.
pub struct UpdateDocumentHandler {
    repository: Arc<dyn DocumentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl UpdateDocumentHandler {
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
        cmd: UpdateDocumentCommand,
        metadata: CommandMetadata,
    ) -> Result<Document, DocumentError> {
        let mut document = self
            .repository
            .find_by_id(&cmd.document_id)
            .await?
            .ok_or_else(|| DocumentError::not_found(cmd.document_id))?;

        if let Some(title) = &cmd.title {
            document.set_title(title)?;
        }
        for (name, value) in cmd.properties {
            document.set_property(&name, value)?;
        }
        if let Some(content) = cmd.content {
            document.set_content(content)?;
        }

        self.repository.update(&document).await?;

        let envelope = stamp(
            DocumentUpdated::from_document(&document).to_envelope(),
            &metadata.correlation_id(),
            &metadata,
        );
        self.event_publisher.publish(envelope).await?;

        debug!(document_id = %document.id(), "document updated");
        Ok(document)
    }
}
