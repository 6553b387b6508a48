//! Hierarchical document path (`/domain/workspace/file`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Absolute, slash-separated path of a document in the repository tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentPath(String);

impl DocumentPath {
    /// The repository root.
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Path of a child named `name` under this path.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is blank
    /// - `InvalidFormat` if the name contains a `/`
    pub fn child(&self, name: &str) -> Result<Self, ValidationError> {
        validate_name(name)?;
        if self.is_root() {
            Ok(Self(format!("/{}", name)))
        } else {
            Ok(Self(format!("{}/{}", self.0, name)))
        }
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Last segment, `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.0.rsplit('/').find(|s| !s.is_empty())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validates a single document name (one path segment).
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if name.contains('/') {
        return Err(ValidationError::invalid_format(
            "name",
            "must not contain '/'",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_of_root_has_one_segment() {
        let path = DocumentPath::root().child("MyFile").unwrap();
        assert_eq!(path.as_str(), "/MyFile");
        assert_eq!(path.name(), Some("MyFile"));
    }

    #[test]
    fn nested_child_appends_segment() {
        let path = DocumentPath::root()
            .child("domain")
            .unwrap()
            .child("test")
            .unwrap();
        assert_eq!(path.as_str(), "/domain/test");
        assert_eq!(path.name(), Some("test"));
    }

    #[test]
    fn root_has_no_name() {
        assert!(DocumentPath::root().is_root());
        assert_eq!(DocumentPath::root().name(), None);
    }

    #[test]
    fn rejects_slash_in_name() {
        assert!(DocumentPath::root().child("a/b").is_err());
        assert!(DocumentPath::root().child(" ").is_err());
    }
}
