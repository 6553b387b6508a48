//! Binary content value object.

use serde_json::{json, Value as JsonValue};
use sha2::{Digest, Sha256};

/// Default mime type for blobs built from text.
pub const TEXT_PLAIN: &str = "text/plain";

/// Default mime type for opaque bytes.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Immutable binary payload with its metadata.
///
/// The digest is the lowercase hex SHA-256 of the bytes and is computed once
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    data: Vec<u8>,
    filename: Option<String>,
    mime_type: String,
    digest: String,
}

impl Blob {
    /// Creates a blob from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        let data = data.into();
        let digest = format!("{:x}", Sha256::digest(&data));
        Self {
            data,
            filename: None,
            mime_type: mime_type.into(),
            digest,
        }
    }

    /// Creates a `text/plain` blob from a string.
    pub fn from_string(text: impl Into<String>) -> Self {
        Self::new(text.into().into_bytes(), TEXT_PLAIN)
    }

    /// Builder: attach a filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn length(&self) -> usize {
        self.data.len()
    }

    /// Property representation exposed under `file:content`.
    pub fn to_property(&self) -> JsonValue {
        json!({
            "name": self.filename,
            "mime-type": self.mime_type,
            "digest": self.digest,
            "length": self.length(),
        })
    }
}
