//! Cold storage backend port.
//!
//! The backend owns the payloads moved out of documents. Retrieval is
//! asynchronous on the backend side: a request only starts it, and an
//! external job restores the content once it is available.

use async_trait::async_trait;

use crate::domain::document::{Blob, ColdContentRef};
use crate::domain::foundation::{DocumentId, DomainError};

#[async_trait]
pub trait ColdStorageBackend: Send + Sync {
    /// Stores a document's main content in the cold tier.
    ///
    /// Returns the reference kept on the document in place of the content.
    async fn store(&self, document_id: &DocumentId, content: &Blob)
        -> Result<ColdContentRef, DomainError>;

    /// Starts retrieval of previously stored content.
    ///
    /// # Errors
    ///
    /// - `StorageError` if the key is unknown to the backend
    async fn request_retrieval(
        &self,
        cold_content: &ColdContentRef,
        number_of_days_of_availability: u32,
    ) -> Result<(), DomainError>;

    /// Returns the content once its retrieval has been requested.
    ///
    /// `None` if the key is unknown or no retrieval was requested.
    async fn fetch(&self, cold_content: &ColdContentRef) -> Result<Option<Blob>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_storage_backend_is_object_safe() {
        fn _accepts_dyn(_backend: &dyn ColdStorageBackend) {}
    }
}
