//! Annotation aggregate.
//!
//! An annotation is a comment anchored to a location inside the content of
//! its parent document. It is persisted as a document of type `Annotation`
//! stored under that parent; the annotation id is the id of that document.
//!
//! # Invariants
//!
//! - `author` and `text` are non-empty
//! - `xpath` is a valid locator
//! - once `Removed`, an annotation accepts no further transition

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use super::locator::Locator;
use crate::domain::document::{Document, ANNOTATION_TYPE};
use crate::domain::foundation::{
    DocumentId, DomainError, ErrorCode, StateMachine, Timestamp, UserId, ValidationError,
};

pub const COMMENT_AUTHOR_PROPERTY: &str = "comment:author";
pub const COMMENT_TEXT_PROPERTY: &str = "comment:text";
pub const COMMENT_PARENT_ID_PROPERTY: &str = "comment:parentId";
pub const COMMENT_CREATION_DATE_PROPERTY: &str = "comment:creationDate";
pub const COMMENT_MODIFICATION_DATE_PROPERTY: &str = "comment:modificationDate";
pub const ANNOTATION_XPATH_PROPERTY: &str = "annotation:xpath";
pub const ANNOTATION_LIFECYCLE_PROPERTY: &str = "annotation:lifecycle";
pub const EXTERNAL_ENTITY_ID_PROPERTY: &str = "externalEntity:entityId";
pub const EXTERNAL_ENTITY_ORIGIN_PROPERTY: &str = "externalEntity:origin";
pub const EXTERNAL_ENTITY_PROPERTY: &str = "externalEntity:entity";

/// Lifecycle of an annotation: `Created → Updated* → Removed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationLifecycle {
    Created,
    Updated,
    Removed,
}

impl StateMachine for AnnotationLifecycle {
    fn can_transition_to(&self, target: &Self) -> bool {
        use AnnotationLifecycle::*;
        matches!(
            (self, target),
            (Created, Updated) | (Created, Removed) | (Updated, Updated) | (Updated, Removed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use AnnotationLifecycle::*;
        match self {
            Created | Updated => vec![Updated, Removed],
            Removed => vec![],
        }
    }
}

/// Marks an annotation as originating from a system outside the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalEntity {
    /// Identifier of the entity in the originating system.
    pub entity_id: String,
    /// Name of the originating system.
    pub origin: String,
    /// Serialized entity payload, opaque to the platform.
    pub entity: String,
}

impl ExternalEntity {
    pub fn new(
        entity_id: impl Into<String>,
        origin: impl Into<String>,
        entity: impl Into<String>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            origin: origin.into(),
            entity: entity.into(),
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.entity_id.trim().is_empty() {
            return Err(ValidationError::empty_field("entity_id"));
        }
        Ok(())
    }
}

/// Input for creating an annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationDraft {
    pub author: String,
    pub text: String,
    pub parent_id: DocumentId,
    pub xpath: String,
    pub creation_date: Option<Timestamp>,
    pub modification_date: Option<Timestamp>,
    pub external_entity: Option<ExternalEntity>,
}

impl AnnotationDraft {
    pub fn new(
        parent_id: DocumentId,
        author: impl Into<String>,
        text: impl Into<String>,
        xpath: impl Into<String>,
    ) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            parent_id,
            xpath: xpath.into(),
            creation_date: None,
            modification_date: None,
            external_entity: None,
        }
    }

    pub fn with_external_entity(mut self, external_entity: ExternalEntity) -> Self {
        self.external_entity = Some(external_entity);
        self
    }

    pub fn with_dates(mut self, creation_date: Timestamp, modification_date: Timestamp) -> Self {
        self.creation_date = Some(creation_date);
        self.modification_date = Some(modification_date);
        self
    }
}

/// Input for updating an annotation.
///
/// `None` leaves the corresponding field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationUpdate {
    pub text: Option<String>,
    pub xpath: Option<String>,
    pub external_entity: Option<ExternalEntity>,
}

impl AnnotationUpdate {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Annotation aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    id: DocumentId,
    author: UserId,
    text: String,
    parent_id: DocumentId,
    xpath: Locator,
    creation_date: Timestamp,
    modification_date: Timestamp,
    external_entity: Option<ExternalEntity>,
    lifecycle: AnnotationLifecycle,
}

impl Annotation {
    /// Builds a new annotation from a draft.
    ///
    /// `id` is the id of the document that will hold the annotation.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `InvalidFormat` for a blank author or text, a bad
    ///   locator, or an external entity without id
    pub fn create(id: DocumentId, draft: AnnotationDraft) -> Result<Self, DomainError> {
        let author = UserId::new(draft.author).map_err(|_| ValidationError::empty_field("author"))?;
        validate_text(&draft.text)?;
        let xpath = Locator::parse(draft.xpath)?;
        if let Some(external) = &draft.external_entity {
            external.validate()?;
        }

        let now = Timestamp::now();
        let creation_date = draft.creation_date.unwrap_or(now);
        Ok(Self {
            id,
            author,
            text: draft.text,
            parent_id: draft.parent_id,
            xpath,
            creation_date,
            modification_date: draft.modification_date.unwrap_or(creation_date),
            external_entity: draft.external_entity,
            lifecycle: AnnotationLifecycle::Created,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn author(&self) -> &UserId {
        &self.author
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent_id(&self) -> &DocumentId {
        &self.parent_id
    }

    pub fn xpath(&self) -> &Locator {
        &self.xpath
    }

    pub fn creation_date(&self) -> &Timestamp {
        &self.creation_date
    }

    pub fn modification_date(&self) -> &Timestamp {
        &self.modification_date
    }

    pub fn external_entity(&self) -> Option<&ExternalEntity> {
        self.external_entity.as_ref()
    }

    pub fn lifecycle(&self) -> AnnotationLifecycle {
        self.lifecycle
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Applies an update and moves the lifecycle to `Updated`.
    ///
    /// Nothing is changed if validation fails.
    pub fn apply_update(&mut self, update: AnnotationUpdate) -> Result<(), DomainError> {
        let lifecycle = self.lifecycle.transition_to(AnnotationLifecycle::Updated)?;
        if let Some(text) = &update.text {
            validate_text(text)?;
        }
        let xpath = update.xpath.map(Locator::parse).transpose()?;
        if let Some(external) = &update.external_entity {
            external.validate()?;
        }

        if let Some(text) = update.text {
            self.text = text;
        }
        if let Some(xpath) = xpath {
            self.xpath = xpath;
        }
        if let Some(external) = update.external_entity {
            self.external_entity = Some(external);
        }
        self.modification_date = Timestamp::now();
        self.lifecycle = lifecycle;
        Ok(())
    }

    /// Moves the lifecycle to the terminal `Removed` state.
    pub fn mark_removed(&mut self) -> Result<(), DomainError> {
        self.lifecycle = self.lifecycle.transition_to(AnnotationLifecycle::Removed)?;
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document mapping
    // ─────────────────────────────────────────────────────────────────────────

    /// Writes the annotation fields onto its backing document.
    pub fn write_to(&self, document: &mut Document) -> Result<(), DomainError> {
        if document.id() != &self.id {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "Annotation written to a document with a different id",
            ));
        }
        document.set_property(COMMENT_AUTHOR_PROPERTY, json!(self.author.as_str()))?;
        document.set_property(COMMENT_TEXT_PROPERTY, json!(self.text))?;
        document.set_property(COMMENT_PARENT_ID_PROPERTY, json!(self.parent_id.to_string()))?;
        document.set_property(ANNOTATION_XPATH_PROPERTY, json!(self.xpath.as_str()))?;
        document.set_property(COMMENT_CREATION_DATE_PROPERTY, to_json(&self.creation_date)?)?;
        document.set_property(
            COMMENT_MODIFICATION_DATE_PROPERTY,
            to_json(&self.modification_date)?,
        )?;
        document.set_property(ANNOTATION_LIFECYCLE_PROPERTY, to_json(&self.lifecycle)?)?;
        if let Some(external) = &self.external_entity {
            document.set_property(EXTERNAL_ENTITY_ID_PROPERTY, json!(external.entity_id))?;
            document.set_property(EXTERNAL_ENTITY_ORIGIN_PROPERTY, json!(external.origin))?;
            document.set_property(EXTERNAL_ENTITY_PROPERTY, json!(external.entity))?;
        }
        Ok(())
    }

    /// Reads an annotation back from its backing document.
    ///
    /// # Errors
    ///
    /// - `AnnotationNotFound` if the document is not an annotation
    /// - `InternalError` if a stored field is missing or malformed
    pub fn from_document(document: &Document) -> Result<Self, DomainError> {
        if document.doc_type() != ANNOTATION_TYPE {
            return Err(DomainError::new(
                ErrorCode::AnnotationNotFound,
                format!("Document {} is not an annotation", document.id()),
            )
            .with_detail("annotation_id", document.id().to_string()));
        }

        let external_entity = match document.property(EXTERNAL_ENTITY_ID_PROPERTY) {
            Some(entity_id) => Some(ExternalEntity {
                entity_id: from_json(document, EXTERNAL_ENTITY_ID_PROPERTY, Some(entity_id))?,
                origin: read(document, EXTERNAL_ENTITY_ORIGIN_PROPERTY)?,
                entity: read(document, EXTERNAL_ENTITY_PROPERTY)?,
            }),
            None => None,
        };
        let author: String = read(document, COMMENT_AUTHOR_PROPERTY)?;
        let parent_id: String = read(document, COMMENT_PARENT_ID_PROPERTY)?;
        let xpath: String = read(document, ANNOTATION_XPATH_PROPERTY)?;

        Ok(Self {
            id: *document.id(),
            author: UserId::new(author)?,
            text: read(document, COMMENT_TEXT_PROPERTY)?,
            parent_id: parent_id
                .parse()
                .map_err(|_| corrupt(document, COMMENT_PARENT_ID_PROPERTY))?,
            xpath: Locator::parse(xpath)?,
            creation_date: read(document, COMMENT_CREATION_DATE_PROPERTY)?,
            modification_date: read(document, COMMENT_MODIFICATION_DATE_PROPERTY)?,
            external_entity,
            lifecycle: read(document, ANNOTATION_LIFECYCLE_PROPERTY)?,
        })
    }
}

fn validate_text(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::empty_field("text"));
    }
    Ok(())
}

fn to_json<T: Serialize>(value: &T) -> Result<JsonValue, DomainError> {
    serde_json::to_value(value)
        .map_err(|e| DomainError::new(ErrorCode::InternalError, e.to_string()))
}

fn read<T: for<'de> Deserialize<'de>>(document: &Document, name: &str) -> Result<T, DomainError> {
    from_json(document, name, document.property(name))
}

fn from_json<T: for<'de> Deserialize<'de>>(
    document: &Document,
    name: &str,
    value: Option<JsonValue>,
) -> Result<T, DomainError> {
    let value = value.ok_or_else(|| corrupt(document, name))?;
    serde_json::from_value(value).map_err(|_| corrupt(document, name))
}

fn corrupt(document: &Document, name: &str) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("Annotation document {} has a malformed '{}'", document.id(), name),
    )
}
