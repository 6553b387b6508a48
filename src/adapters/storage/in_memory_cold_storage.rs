//! In-Memory Cold Storage
//!
//! Holds moved payloads in a map; retrieval is immediate once requested.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::document::{Blob, ColdContentRef};
use crate::domain::foundation::{DocumentId, DomainError, ErrorCode};
use crate::ports::ColdStorageBackend;

#[derive(Debug, Clone)]
struct StoredContent {
    blob: Blob,
    retrieval_days: Option<u32>,
}

/// In-memory cold tier
#[derive(Debug, Clone, Default)]
pub struct InMemoryColdStorage {
    contents: Arc<RwLock<HashMap<String, StoredContent>>>,
}

impl InMemoryColdStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of payloads held in the cold tier
    pub async fn stored_count(&self) -> usize {
        self.contents.read().await.len()
    }

    /// Days of availability of the last retrieval requested for a key
    pub async fn requested_days(&self, key: &str) -> Option<u32> {
        self.contents
            .read()
            .await
            .get(key)
            .and_then(|c| c.retrieval_days)
    }
}

#[async_trait]
impl ColdStorageBackend for InMemoryColdStorage {
    async fn store(
        &self,
        document_id: &DocumentId,
        content: &Blob,
    ) -> Result<ColdContentRef, DomainError> {
        let key = format!("cold/{}/{}", document_id, content.digest());
        self.contents.write().await.insert(
            key.clone(),
            StoredContent {
                blob: content.clone(),
                retrieval_days: None,
            },
        );
        Ok(ColdContentRef {
            key,
            digest: content.digest().to_string(),
            length: content.length(),
            mime_type: content.mime_type().to_string(),
        })
    }

    async fn request_retrieval(
        &self,
        cold_content: &ColdContentRef,
        number_of_days_of_availability: u32,
    ) -> Result<(), DomainError> {
        let mut contents = self.contents.write().await;
        let stored = contents.get_mut(&cold_content.key).ok_or_else(|| {
            DomainError::new(
                ErrorCode::StorageError,
                format!("Unknown cold storage key: {}", cold_content.key),
            )
        })?;
        stored.retrieval_days = Some(number_of_days_of_availability);
        Ok(())
    }

    async fn fetch(&self, cold_content: &ColdContentRef) -> Result<Option<Blob>, DomainError> {
        Ok(self
            .contents
            .read()
            .await
            .get(&cold_content.key)
            .filter(|c| c.retrieval_days.is_some())
            .map(|c| c.blob.clone()))
    }
}
