//! Document repository port.
//!
//! Documents form a tree; every document except a root has a parent that
//! exists in the repository.

use async_trait::async_trait;

use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, DomainError};

/// Repository port for Document persistence.
///
/// Writes are visible to subsequent reads immediately. Events describing
/// them are published separately by the handlers.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Save a new document.
    ///
    /// # Errors
    ///
    /// - `DuplicateDocument` if a document with the same id exists
    /// - `DocumentNotFound` if the parent does not exist
    async fn save(&self, document: &Document) -> Result<(), DomainError>;

    /// Update an existing document.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if the document doesn't exist
    async fn update(&self, document: &Document) -> Result<(), DomainError>;

    /// Find a document by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError>;

    /// Check if a document exists.
    async fn exists(&self, id: &DocumentId) -> Result<bool, DomainError>;

    /// Direct children of a document, ordered by path.
    async fn children(&self, parent_id: &DocumentId) -> Result<Vec<Document>, DomainError>;

    /// Ancestors of a document, nearest first.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if the document doesn't exist
    async fn ancestors(&self, id: &DocumentId) -> Result<Vec<Document>, DomainError>;

    /// Delete a document together with its descendants.
    ///
    /// Returns the removed document.
    ///
    /// # Errors
    ///
    /// - `DocumentNotFound` if the document doesn't exist
    async fn delete(&self, id: &DocumentId) -> Result<Document, DomainError>;
}
