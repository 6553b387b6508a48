//! In-memory storage adapters.
//!
//! Each adapter keeps its state behind `Arc<tokio::sync::RwLock<..>>`, so
//! clones share the same underlying data.

mod in_memory_cold_storage;
mod in_memory_document_repository;
mod in_memory_subscription_store;

pub use in_memory_cold_storage::InMemoryColdStorage;
pub use in_memory_document_repository::InMemoryDocumentRepository;
pub use in_memory_subscription_store::InMemorySubscriptionStore;
