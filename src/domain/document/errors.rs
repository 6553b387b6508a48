//! Document-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DocumentId, DomainError, ErrorCode};

/// Errors raised by document and cold-storage handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("Document not found: {0}")]
    NotFound(DocumentId),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Document has no main content: {0}")]
    NoMainContent(DocumentId),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl DocumentError {
    pub fn not_found(id: DocumentId) -> Self {
        DocumentError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DocumentError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            DocumentError::NotFound(_) => ErrorCode::DocumentNotFound,
            DocumentError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            DocumentError::NoMainContent(_) => ErrorCode::NoMainContent,
            DocumentError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            DocumentError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DomainError> for DocumentError {
    fn from(err: DomainError) -> Self {
        let detail_id = || {
            err.details
                .get("document_id")
                .and_then(|id| id.parse::<DocumentId>().ok())
        };
        match err.code {
            ErrorCode::DocumentNotFound => match detail_id() {
                Some(id) => DocumentError::NotFound(id),
                None => DocumentError::Infrastructure(err.to_string()),
            },
            ErrorCode::NoMainContent => match detail_id() {
                Some(id) => DocumentError::NoMainContent(id),
                None => DocumentError::InvalidState(err.message),
            },
            ErrorCode::InvalidStateTransition => DocumentError::InvalidState(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => DocumentError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => DocumentError::Infrastructure(err.to_string()),
        }
    }
}
