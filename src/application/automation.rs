//! Automation operations.
//!
//! Operations are named entry points taking an input document and a JSON
//! object of parameters. The [`AutomationService`] dispatches by id.
//!
//! ```ignore
//! let doc = automation
//!     .run(&ctx, "Document.RetrieveFromColdStorage", params)
//!     .await?;
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use tracing::info;

use crate::domain::document::{Document, DocumentError};
use crate::domain::foundation::{CommandMetadata, DocumentId, DomainError, ErrorCode};

/// Raw operation parameters.
pub type OperationParams = Map<String, JsonValue>;

/// Input of an operation run.
#[derive(Debug, Clone)]
pub struct OperationContext {
    pub input: DocumentId,
    pub metadata: CommandMetadata,
}

impl OperationContext {
    pub fn new(input: DocumentId, metadata: CommandMetadata) -> Self {
        Self { input, metadata }
    }
}

/// Errors raised while resolving or running an operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("Operation not found: {0}")]
    NotFound(String),

    #[error("Invalid parameters for {operation}: {message}")]
    InvalidParameters { operation: String, message: String },

    #[error(transparent)]
    Document(#[from] DocumentError),
}

impl OperationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            OperationError::NotFound(_) => ErrorCode::OperationNotFound,
            OperationError::InvalidParameters { .. } => ErrorCode::ValidationFailed,
            OperationError::Document(e) => e.code(),
        }
    }
}

impl From<DomainError> for OperationError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::OperationNotFound => OperationError::NotFound(
                err.details
                    .get("operation")
                    .cloned()
                    .unwrap_or(err.message),
            ),
            _ => OperationError::Document(DocumentError::from(err)),
        }
    }
}

/// Deserializes operation parameters into their typed form.
///
/// # Errors
///
/// - `InvalidParameters` for unknown keys, missing keys or wrong types
pub fn parse_params<T: DeserializeOwned>(
    operation: &str,
    params: OperationParams,
) -> Result<T, OperationError> {
    serde_json::from_value(JsonValue::Object(params)).map_err(|e| {
        OperationError::InvalidParameters {
            operation: operation.to_string(),
            message: e.to_string(),
        }
    })
}

/// A named automation operation.
#[async_trait]
pub trait Operation: Send + Sync {
    /// Identifier used to invoke the operation.
    fn id(&self) -> &'static str;

    /// Runs the operation on `ctx.input` and returns the resulting document.
    async fn run(
        &self,
        ctx: &OperationContext,
        params: OperationParams,
    ) -> Result<Document, OperationError>;
}

/// Registry of operations keyed by id.
#[derive(Default)]
pub struct AutomationService {
    operations: HashMap<&'static str, Arc<dyn Operation>>,
}

impl AutomationService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an operation, replacing any other with the same id.
    pub fn register(&mut self, operation: Arc<dyn Operation>) {
        self.operations.insert(operation.id(), operation);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.operations.contains_key(id)
    }

    /// Registered ids, sorted.
    pub fn operation_ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<&'static str> = self.operations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Runs the operation registered under `id`.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no operation has this id
    /// - whatever the operation itself returns
    pub async fn run(
        &self,
        ctx: &OperationContext,
        id: &str,
        params: OperationParams,
    ) -> Result<Document, OperationError> {
        let operation = self
            .operations
            .get(id)
            .ok_or_else(|| OperationError::NotFound(id.to_string()))?;
        info!(
            operation = id,
            document_id = %ctx.input,
            user_id = %ctx.metadata.user_id,
            "running operation"
        );
        operation.run(ctx, params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::FILE_TYPE;
    use crate::domain::foundation::UserId;
    use serde::Deserialize;
    use serde_json::json;

    struct Echo;

    #[async_trait]
    impl Operation for Echo {
        fn id(&self) -> &'static str {
            "Test.Echo"
        }

        async fn run(
            &self,
            _ctx: &OperationContext,
            _params: OperationParams,
        ) -> Result<Document, OperationError> {
            Ok(Document::new(None, "echo", FILE_TYPE).map_err(DocumentError::from)?)
        }
    }

    fn ctx() -> OperationContext {
        OperationContext::new(
            DocumentId::new(),
            CommandMetadata::new(UserId::new("Administrator").unwrap()),
        )
    }

    fn params(value: JsonValue) -> OperationParams {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[tokio::test]
    async fn runs_registered_operation() {
        let mut service = AutomationService::new();
        service.register(Arc::new(Echo));

        let doc = service.run(&ctx(), "Test.Echo", OperationParams::new()).await.unwrap();

        assert_eq!(doc.name(), "echo");
        assert_eq!(service.operation_ids(), vec!["Test.Echo"]);
    }

    #[tokio::test]
    async fn unknown_operation_is_not_found() {
        let service = AutomationService::new();

        let err = service
            .run(&ctx(), "Document.Nope", OperationParams::new())
            .await
            .unwrap_err();

        assert_eq!(err, OperationError::NotFound("Document.Nope".into()));
        assert_eq!(err.code(), ErrorCode::OperationNotFound);
    }

    #[derive(Debug, Deserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    struct Days {
        number_of_days: u32,
    }

    #[test]
    fn parse_params_accepts_camel_case_keys() {
        let days: Days = parse_params("Test", params(json!({ "numberOfDays": 3 }))).unwrap();
        assert_eq!(days.number_of_days, 3);
    }

    #[test]
    fn parse_params_rejects_unknown_keys_and_bad_types() {
        let unknown = parse_params::<Days>("Test", params(json!({ "numberOfDays": 3, "x": 1 })));
        let negative = parse_params::<Days>("Test", params(json!({ "numberOfDays": -1 })));

        assert!(matches!(unknown, Err(OperationError::InvalidParameters { .. })));
        assert!(matches!(negative, Err(OperationError::InvalidParameters { .. })));
    }
}
