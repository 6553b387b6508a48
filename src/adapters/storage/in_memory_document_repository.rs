//! In-Memory Document Repository
//!
//! Keeps the document tree in a map keyed by id.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::Document;
use crate::domain::foundation::{DocumentId, DomainError, ErrorCode};
use crate::ports::DocumentRepository;

/// In-memory document tree
#[derive(Debug, Clone, Default)]
pub struct InMemoryDocumentRepository {
    documents: Arc<RwLock<HashMap<DocumentId, Document>>>,
}

impl InMemoryDocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents
    pub async fn count(&self) -> usize {
        self.documents.read().await.len()
    }
}

fn not_found(id: &DocumentId) -> DomainError {
    DomainError::new(ErrorCode::DocumentNotFound, format!("Document not found: {}", id))
        .with_detail("document_id", id.to_string())
}

#[async_trait]
impl DocumentRepository for InMemoryDocumentRepository {
    async fn save(&self, document: &Document) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        if documents.contains_key(document.id()) {
            return Err(DomainError::new(
                ErrorCode::DuplicateDocument,
                format!("Document already exists: {}", document.id()),
            )
            .with_detail("document_id", document.id().to_string()));
        }
        if let Some(parent_id) = document.parent_id() {
            if !documents.contains_key(parent_id) {
                return Err(not_found(parent_id));
            }
        }
        documents.insert(*document.id(), document.clone());
        Ok(())
    }

    async fn update(&self, document: &Document) -> Result<(), DomainError> {
        let mut documents = self.documents.write().await;
        match documents.get_mut(document.id()) {
            Some(stored) => {
                *stored = document.clone();
                Ok(())
            }
            None => Err(not_found(document.id())),
        }
    }

    async fn find_by_id(&self, id: &DocumentId) -> Result<Option<Document>, DomainError> {
        Ok(self.documents.read().await.get(id).cloned())
    }

    async fn exists(&self, id: &DocumentId) -> Result<bool, DomainError> {
        Ok(self.documents.read().await.contains_key(id))
    }

    async fn children(&self, parent_id: &DocumentId) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;
        let mut children: Vec<Document> = documents
            .values()
            .filter(|d| d.parent_id() == Some(parent_id))
            .cloned()
            .collect();
        children.sort_by(|a, b| a.path().as_str().cmp(b.path().as_str()));
        Ok(children)
    }

    async fn ancestors(&self, id: &DocumentId) -> Result<Vec<Document>, DomainError> {
        let documents = self.documents.read().await;
        let mut current = documents.get(id).ok_or_else(|| not_found(id))?;
        let mut ancestors = Vec::new();
        while let Some(parent) = current.parent_id().and_then(|p| documents.get(p)) {
            ancestors.push(parent.clone());
            current = parent;
        }
        Ok(ancestors)
    }

    async fn delete(&self, id: &DocumentId) -> Result<Document, DomainError> {
        let mut documents = self.documents.write().await;
        let removed = documents.remove(id).ok_or_else(|| not_found(id))?;

        let mut orphans = vec![*id];
        while let Some(parent) = orphans.pop() {
            let children: Vec<DocumentId> = documents
                .values()
                .filter(|d| d.parent_id() == Some(&parent))
                .map(|d| *d.id())
                .collect();
            for child in children {
                documents.remove(&child);
                orphans.push(child);
            }
        }
        Ok(removed)
    }
}
