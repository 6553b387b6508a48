//! Annotation-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DocumentId, DomainError, ErrorCode};

/// Errors raised by annotation handlers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("Annotation not found: {0}")]
    NotFound(DocumentId),

    #[error("Annotated document not found: {0}")]
    ParentNotFound(DocumentId),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Validation failed for '{field}': {message}")]
    ValidationFailed { field: String, message: String },

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl AnnotationError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AnnotationError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AnnotationError::NotFound(_) => ErrorCode::AnnotationNotFound,
            AnnotationError::ParentNotFound(_) => ErrorCode::DocumentNotFound,
            AnnotationError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            AnnotationError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            AnnotationError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }
}

impl From<DomainError> for AnnotationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AnnotationNotFound => match err
                .details
                .get("annotation_id")
                .and_then(|id| id.parse().ok())
            {
                Some(id) => AnnotationError::NotFound(id),
                None => AnnotationError::Infrastructure(err.to_string()),
            },
            ErrorCode::InvalidStateTransition => AnnotationError::InvalidState(err.message),
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat => AnnotationError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AnnotationError::Infrastructure(err.to_string()),
        }
    }
}
