//! Document domain events.
//!
//! - `DocumentCreated` / `DocumentUpdated` / `DocumentRemoved` - repository lifecycle
//! - `DocumentMovedToColdStorage` - main content relocated to the cold tier
//! - `ColdStorageRetrievalRequested` - retrieval of cold content requested

use serde::{Deserialize, Serialize};

use super::aggregate::Document;
use crate::domain::foundation::{domain_event, DocumentId, EventId, Timestamp};

pub const DOCUMENT_CREATED: &str = "document.created";
pub const DOCUMENT_UPDATED: &str = "document.updated";
pub const DOCUMENT_REMOVED: &str = "document.removed";
pub const DOCUMENT_MOVED_TO_COLD_STORAGE: &str = "coldstorage.moved";
pub const COLD_STORAGE_RETRIEVAL_REQUESTED: &str = "coldstorage.retrieval_requested";

// ════════════════════════════════════════════════════════════════════════════
// Repository lifecycle
// ════════════════════════════════════════════════════════════════════════════

/// Published when a document is created in the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentCreated {
    pub event_id: EventId,
    pub document_id: DocumentId,
    pub parent_id: Option<DocumentId>,
    pub path: String,
    pub doc_type: String,
    pub created_at: Timestamp,
}

impl DocumentCreated {
    pub fn from_document(document: &Document) -> Self {
        Self {
            event_id: EventId::new(),
            document_id: *document.id(),
            parent_id: document.parent_id().copied(),
            path: document.path().to_string(),
            doc_type: document.doc_type().to_string(),
            created_at: Timestamp::now(),
        }
    }
}

domain_event!(
    DocumentCreated,
    event_type = DOCUMENT_CREATED,
    aggregate_id = document_id,
    aggregate_type = "Document",
    occurred_at = created_at,
    event_id = event_id
);

/// Published when a document is modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentUpdated {
    pub event_id: EventId,
    pub document_id: DocumentId,
    pub parent_id: Option<DocumentId>,
    pub path: String,
    pub doc_type: String,
    pub updated_at: Timestamp,
}

impl DocumentUpdated {
    pub fn from_document(document: &Document) -> Self {
        Self {
            event_id: EventId::new(),
            document_id: *document.id(),
            parent_id: document.parent_id().copied(),
            path: document.path().to_string(),
            doc_type: document.doc_type().to_string(),
            updated_at: Timestamp::now(),
        }
    }
}

domain_event!(
    DocumentUpdated,
    event_type = DOCUMENT_UPDATED,
    aggregate_id = document_id,
    aggregate_type = "Document",
    occurred_at = updated_at,
    event_id = event_id
);

/// Published when a document is removed from the repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRemoved {
    pub event_id: EventId,
    pub document_id: DocumentId,
    pub parent_id: Option<DocumentId>,
    pub path: String,
    pub doc_type: String,
    pub removed_at: Timestamp,
}

impl DocumentRemoved {
    pub fn from_document(document: &Document) -> Self {
        Self {
            event_id: EventId::new(),
            document_id: *document.id(),
            parent_id: document.parent_id().copied(),
            path: document.path().to_string(),
            doc_type: document.doc_type().to_string(),
            removed_at: Timestamp::now(),
        }
    }
}

domain_event!(
    DocumentRemoved,
    event_type = DOCUMENT_REMOVED,
    aggregate_id = document_id,
    aggregate_type = "Document",
    occurred_at = removed_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// Cold storage
// ════════════════════════════════════════════════════════════════════════════

/// Published when a document's main content has been moved to the cold tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentMovedToColdStorage {
    pub event_id: EventId,
    pub document_id: DocumentId,
    pub cold_content_key: String,
    pub moved_at: Timestamp,
}

domain_event!(
    DocumentMovedToColdStorage,
    event_type = DOCUMENT_MOVED_TO_COLD_STORAGE,
    aggregate_id = document_id,
    aggregate_type = "Document",
    occurred_at = moved_at,
    event_id = event_id
);

/// Published when a retrieval from cold storage has been requested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColdStorageRetrievalRequested {
    pub event_id: EventId,
    pub document_id: DocumentId,
    pub number_of_days_of_availability: u32,
    pub available_until: Timestamp,
    pub requested_at: Timestamp,
}

domain_event!(
    ColdStorageRetrievalRequested,
    event_type = COLD_STORAGE_RETRIEVAL_REQUESTED,
    aggregate_id = document_id,
    aggregate_type = "Document",
    occurred_at = requested_at,
    event_id = event_id
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::FILE_TYPE;
    use crate::domain::foundation::SerializableDomainEvent;

    #[test]
    fn document_created_envelope_routes_by_type() {
        let doc = Document::new(None, "MyFile", FILE_TYPE).unwrap();
        let envelope = DocumentCreated::from_document(&doc).to_envelope();

        assert_eq!(envelope.event_type, DOCUMENT_CREATED);
        assert_eq!(envelope.aggregate_id, doc.id().to_string());
        assert_eq!(envelope.payload["doc_type"], FILE_TYPE);
        assert_eq!(envelope.payload["path"], "/MyFile");
    }

    #[test]
    fn retrieval_requested_payload_round_trips() {
        let now = Timestamp::now();
        let event = ColdStorageRetrievalRequested {
            event_id: EventId::new(),
            document_id: DocumentId::new(),
            number_of_days_of_availability: 7,
            available_until: now.add_days(7).unwrap(),
            requested_at: now,
        };

        let restored: ColdStorageRetrievalRequested = event.to_envelope().payload_as().unwrap();
        assert_eq!(restored, event);
    }
}
