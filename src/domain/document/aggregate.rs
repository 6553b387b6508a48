//! Document aggregate.
//!
//! A document is a node in the repository tree holding a property bag and an
//! optional main content blob. Its cold-storage facet tracks where that main
//! content currently lives.
//!
//! # Invariants
//!
//! - `path` is the parent's path plus `name`
//! - main content can only be replaced while the facet is `Active`
//! - `coldstorage:beingRetrieved` is derived from the facet and is never set directly

use serde_json::{json, Value as JsonValue};
use std::collections::BTreeMap;

use super::blob::Blob;
use super::cold_storage::{ColdContentRef, ColdStorage, ColdStorageState, RetrievalRequest};
use super::path::DocumentPath;
use crate::domain::foundation::{DocumentId, DomainError, ErrorCode, StateMachine, Timestamp};

/// Main content of a file document.
pub const FILE_CONTENT_PROPERTY: &str = "file:content";

/// Title of any document.
pub const TITLE_PROPERTY: &str = "dc:title";

/// Whether a retrieval from cold storage is in flight.
pub const COLD_STORAGE_BEING_RETRIEVED_PROPERTY: &str = "coldstorage:beingRetrieved";

/// Reference to the content held by the cold tier.
pub const COLD_STORAGE_CONTENT_PROPERTY: &str = "coldstorage:coldContent";

/// End of the availability window of a requested retrieval.
pub const COLD_STORAGE_AVAILABLE_UNTIL_PROPERTY: &str = "coldstorage:availableUntil";

const COLD_STORAGE_SCHEMA_PREFIX: &str = "coldstorage:";

pub const DOMAIN_TYPE: &str = "Domain";
pub const FOLDER_TYPE: &str = "Folder";
pub const FILE_TYPE: &str = "File";
pub const COMMENT_TYPE: &str = "Comment";
pub const ANNOTATION_TYPE: &str = "Annotation";

/// Document aggregate.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    id: DocumentId,
    name: String,
    parent_id: Option<DocumentId>,
    path: DocumentPath,
    doc_type: String,
    title: String,
    properties: BTreeMap<String, JsonValue>,
    content: Option<Blob>,
    cold_storage: ColdStorage,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Document {
    /// Create a document named `name` under `parent` (or under the root).
    ///
    /// The title defaults to the name.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the name or type is invalid
    pub fn new(parent: Option<&Document>, name: &str, doc_type: &str) -> Result<Self, DomainError> {
        Self::new_with_id(DocumentId::new(), parent, name, doc_type)
    }

    /// Like [`Document::new`], for callers that derive the name from the id.
    pub fn new_with_id(
        id: DocumentId,
        parent: Option<&Document>,
        name: &str,
        doc_type: &str,
    ) -> Result<Self, DomainError> {
        if doc_type.trim().is_empty() {
            return Err(DomainError::validation("doc_type", "Document type cannot be empty"));
        }
        let parent_path = parent.map(|p| p.path.clone()).unwrap_or_else(DocumentPath::root);
        let path = parent_path.child(name)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            name: name.to_string(),
            parent_id: parent.map(|p| p.id),
            path,
            doc_type: doc_type.to_string(),
            title: name.to_string(),
            properties: BTreeMap::new(),
            content: None,
            cold_storage: ColdStorage::default(),
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent_id(&self) -> Option<&DocumentId> {
        self.parent_id.as_ref()
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn doc_type(&self) -> &str {
        &self.doc_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> Option<&Blob> {
        self.content.as_ref()
    }

    pub fn cold_storage(&self) -> &ColdStorage {
        &self.cold_storage
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Comments and annotations are stored as documents of dedicated types.
    pub fn is_comment(&self) -> bool {
        self.doc_type == COMMENT_TYPE || self.doc_type == ANNOTATION_TYPE
    }

    /// Value of the `coldstorage:beingRetrieved` flag.
    pub fn is_being_retrieved(&self) -> bool {
        self.cold_storage.is_being_retrieved()
    }

    /// Reads a property by its schema-prefixed name.
    ///
    /// Main content, title and cold-storage values are computed from the
    /// aggregate; everything else comes from the property bag.
    pub fn property(&self, name: &str) -> Option<JsonValue> {
        match name {
            FILE_CONTENT_PROPERTY => self.content.as_ref().map(Blob::to_property),
            TITLE_PROPERTY => Some(JsonValue::String(self.title.clone())),
            COLD_STORAGE_BEING_RETRIEVED_PROPERTY => {
                Some(JsonValue::Bool(self.is_being_retrieved()))
            }
            COLD_STORAGE_CONTENT_PROPERTY => self.cold_storage.cold_content().map(|c| {
                json!({
                    "key": c.key,
                    "digest": c.digest,
                    "length": c.length,
                    "mime-type": c.mime_type,
                })
            }),
            COLD_STORAGE_AVAILABLE_UNTIL_PROPERTY => self
                .cold_storage
                .retrieval()
                .map(|r| JsonValue::String(r.available_until.as_datetime().to_rfc3339())),
            other => self.properties.get(other).cloned(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Sets a free-form property.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` for main-content or cold-storage names, which have
    ///   dedicated mutators
    pub fn set_property(&mut self, name: &str, value: JsonValue) -> Result<(), DomainError> {
        if name == FILE_CONTENT_PROPERTY || name.starts_with(COLD_STORAGE_SCHEMA_PREFIX) {
            return Err(DomainError::validation(
                name,
                format!("Property '{}' cannot be set directly", name),
            ));
        }
        if name == TITLE_PROPERTY {
            let title = value
                .as_str()
                .ok_or_else(|| DomainError::validation(name, "Title must be a string"))?;
            return self.set_title(title);
        }
        self.properties.insert(name.to_string(), value);
        self.touch();
        Ok(())
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), DomainError> {
        if title.trim().is_empty() {
            return Err(DomainError::validation(TITLE_PROPERTY, "Title cannot be empty"));
        }
        self.title = title.to_string();
        self.touch();
        Ok(())
    }

    /// Replaces the main content.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` while the content is cold or being retrieved
    pub fn set_content(&mut self, blob: Blob) -> Result<(), DomainError> {
        if self.cold_storage.state() != ColdStorageState::Active {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Main content cannot be replaced while it is in cold storage",
            )
            .with_detail("document_id", self.id.to_string()));
        }
        self.content = Some(blob);
        self.touch();
        Ok(())
    }

    /// Checks the move preconditions and returns the content to relocate.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the content is not in the hot tier
    /// - `NoMainContent` if there is nothing to move
    pub fn content_to_move(&self) -> Result<&Blob, DomainError> {
        self.cold_storage
            .state()
            .transition_to(ColdStorageState::InColdStorage)?;
        self.content.as_ref().ok_or_else(|| {
            DomainError::new(
                ErrorCode::NoMainContent,
                format!("Document {} has no main content to move", self.id),
            )
            .with_detail("document_id", self.id.to_string())
        })
    }

    /// Records that the main content now lives in the cold tier.
    pub fn move_to_cold_storage(
        &mut self,
        cold_content: ColdContentRef,
    ) -> Result<(), DomainError> {
        self.content_to_move()?;
        self.cold_storage.moved(cold_content)?;
        self.content = None;
        self.touch();
        Ok(())
    }

    /// Checks the retrieval preconditions and returns the cold content reference.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` unless the document is in cold storage
    pub fn cold_content_to_retrieve(&self) -> Result<&ColdContentRef, DomainError> {
        self.cold_storage
            .state()
            .transition_to(ColdStorageState::BeingRetrieved)
            .map_err(|e| e.with_detail("document_id", self.id.to_string()))?;
        self.cold_storage.cold_content().ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Document {} is in cold storage without a cold content reference", self.id),
            )
        })
    }

    /// Records a retrieval request and its availability window.
    ///
    /// # Errors
    ///
    /// - `OutOfRange` if `number_of_days_of_availability` is zero or the
    ///   window ends past the last representable date
    /// - `InvalidStateTransition` unless the document is in cold storage
    pub fn request_retrieval(
        &mut self,
        number_of_days_of_availability: u32,
        requested_at: Timestamp,
    ) -> Result<RetrievalRequest, DomainError> {
        if number_of_days_of_availability == 0 {
            return Err(DomainError::new(
                ErrorCode::OutOfRange,
                "numberOfDaysOfAvailability must be positive",
            )
            .with_detail("field", "numberOfDaysOfAvailability"));
        }
        self.cold_content_to_retrieve()?;
        let request = RetrievalRequest::new(number_of_days_of_availability, requested_at)?;
        self.cold_storage.retrieval_requested(request)?;
        self.touch();
        Ok(request)
    }

    /// Restores the main content once the cold tier has delivered it.
    pub fn complete_retrieval(&mut self, content: Blob) -> Result<(), DomainError> {
        self.cold_storage.retrieval_completed()?;
        self.content = Some(content);
        self.touch();
        Ok(())
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}
