//! Annotation command handlers.
//!
//! Each handler publishes a pair of events for one change: the comment
//! event for notification listeners and the matching document event.

mod create_annotation;
mod delete_annotation;
mod update_annotation;

pub use create_annotation::{CreateAnnotationCommand, CreateAnnotationHandler};
pub use delete_annotation::{DeleteAnnotationCommand, DeleteAnnotationHandler};
pub use update_annotation::{UpdateAnnotationCommand, UpdateAnnotationHandler};

use crate::domain::annotation::AnnotationError;
use crate::domain::foundation::DocumentId;
use crate::ports::DocumentRepository;

/// Nearest ancestor of a comment document that is not itself a comment.
///
/// For a reply this skips the comments it answers and returns the
/// annotated document.
pub(crate) async fn top_level_document_id(
    repository: &dyn DocumentRepository,
    comment_id: &DocumentId,
) -> Result<DocumentId, AnnotationError> {
    repository
        .ancestors(comment_id)
        .await?
        .iter()
        .find(|doc| !doc.is_comment())
        .map(|doc| *doc.id())
        .ok_or_else(|| {
            AnnotationError::Infrastructure(format!(
                "Comment {} has no annotated document",
                comment_id
            ))
        })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use crate::adapters::InMemoryDocumentRepository;
    use crate::domain::document::{Blob, Document, FILE_TYPE, FOLDER_TYPE};
    use crate::domain::foundation::{CommandMetadata, UserId};
    use crate::ports::DocumentRepository;

    pub fn metadata(user: &str) -> CommandMetadata {
        CommandMetadata::new(UserId::new(user).unwrap()).with_correlation_id("corr-annotation")
    }

    /// Saves `/workspace/file` and returns the file.
    pub async fn annotated_file(repo: &Arc<InMemoryDocumentRepository>) -> Document {
        let folder = Document::new(None, "workspace", FOLDER_TYPE).unwrap();
        let mut file = Document::new(Some(&folder), "file", FILE_TYPE).unwrap();
        file.set_content(Blob::from_string("some text to annotate")).unwrap();
        repo.save(&folder).await.unwrap();
        repo.save(&file).await.unwrap();
        file
    }
}
