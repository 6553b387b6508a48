//! XPath-like locator into a document's content (`files:files/0/file`).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

static XPATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z_][\w-]*:)?[A-Za-z_][\w-]*(?:/(?:\d+|[A-Za-z_][\w-]*))*$")
        .expect("valid xpath regex")
});

/// Property path addressing the annotated part of the parent document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locator(String);

impl Locator {
    /// Parses and validates a locator.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if blank
    /// - `InvalidFormat` if it is not `[prefix:]name(/index|/name)*`
    pub fn parse(xpath: impl Into<String>) -> Result<Self, ValidationError> {
        let xpath = xpath.into();
        if xpath.trim().is_empty() {
            return Err(ValidationError::empty_field("xpath"));
        }
        if !XPATH_RE.is_match(&xpath) {
            return Err(ValidationError::invalid_format(
                "xpath",
                format!("`{}` is not a property path", xpath),
            ));
        }
        Ok(Self(xpath))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
