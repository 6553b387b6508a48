//! Document command handlers.

mod create_document;
mod update_document;

pub use create_document::{CreateDocumentCommand, CreateDocumentHandler};
pub use update_document::{UpdateDocumentCommand, UpdateDocumentHandler};
