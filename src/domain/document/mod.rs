//! Document domain module.
//!
//! Documents are the repository nodes every other feature hangs off:
//! annotations are stored as documents under the document they annotate,
//! and the main content of a file document can be relocated to a cold tier.
//!
//! # Events
//!
//! - `DocumentCreated`, `DocumentUpdated`, `DocumentRemoved`
//! - `DocumentMovedToColdStorage`, `ColdStorageRetrievalRequested`

mod aggregate;
mod blob;
mod cold_storage;
mod errors;
mod events;
mod path;

pub use aggregate::{
    Document, ANNOTATION_TYPE, COLD_STORAGE_AVAILABLE_UNTIL_PROPERTY,
    COLD_STORAGE_BEING_RETRIEVED_PROPERTY, COLD_STORAGE_CONTENT_PROPERTY, COMMENT_TYPE,
    DOMAIN_TYPE, FILE_CONTENT_PROPERTY, FILE_TYPE, FOLDER_TYPE, TITLE_PROPERTY,
};
pub use blob::{Blob, OCTET_STREAM, TEXT_PLAIN};
pub use cold_storage::{ColdContentRef, ColdStorage, ColdStorageState, RetrievalRequest};
pub use errors::DocumentError;
pub use events::{
    ColdStorageRetrievalRequested, DocumentCreated, DocumentMovedToColdStorage, DocumentRemoved,
    DocumentUpdated, COLD_STORAGE_RETRIEVAL_REQUESTED, DOCUMENT_CREATED,
    DOCUMENT_MOVED_TO_COLD_STORAGE, DOCUMENT_REMOVED, DOCUMENT_UPDATED,
};
pub use path::DocumentPath;
