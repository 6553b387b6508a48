//! CreateDocumentHandler - Command handler for creating documents.

use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::debug;

use crate::application::handlers::stamp;
use crate::domain::document::{Blob, Document, DocumentCreated, DocumentError};
use crate::domain::foundation::{CommandMetadata, DocumentId, SerializableDomainEvent};
use crate::ports::{DocumentRepository, EventPublisher};

/// Command to create a document.
#[derive(Debug, Clone)]
pub struct CreateDocumentCommand {
    /// Parent document; `None` creates a root.
    pub parent_id: Option<DocumentId>,
    pub name: String,
    pub doc_type: String,
    pub title: Option<String>,
    pub content: Option<Blob>,
    pub properties: Vec<(String, JsonValue)>,
}

impl CreateDocumentCommand {
    pub fn new(
        parent_id: Option<DocumentId>,
        name: impl Into<String>,
        doc_type: impl Into<String>,
    ) -> Self {
        Self {
            parent_id,
            name: name.into(),
            doc_type: doc_type.into(),
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

/// Handler for creating documents.
pub struct CreateDocumentHandler {
    repository: Arc<dyn DocumentRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl CreateDocumentHandler {
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
        cmd: CreateDocumentCommand,
        metadata: CommandMetadata,
    ) -> Result<Document, DocumentError> {
        // 1. Load parent
        let parent = match cmd.parent_id {
            Some(parent_id) => Some(
                self.repository
                    .find_by_id(&parent_id)
                    .await?
                    .ok_or_else(|| DocumentError::not_found(parent_id))?,
            ),
            None => None,
        };

        // 2. Build document
        let mut document = Document::new(parent.as_ref(), &cmd.name, &cmd.doc_type)?;
        if let Some(title) = &cmd.title {
            document.set_title(title)?;
        }
        for (name, value) in cmd.properties {
            document.set_property(&name, value)?;
        }
        if let Some(content) = cmd.content {
            document.set_content(content)?;
        }

        // 3. Persist
        self.repository.save(&document).await?;

        // 4. Publish event
        let envelope = stamp(
            DocumentCreated::from_document(&document).to_envelope(),
            &metadata.correlation_id(),
            &metadata,
        );
        self.event_publisher.publish(envelope).await?;

        debug!(document_id = %document.id(), path = %document.path(), "document created");
        Ok(document)
    }
}
