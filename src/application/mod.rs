//! Application layer - Commands, event handlers and automation.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers mutate through repositories and publish events; event
//! handlers run when the transaction commits.

pub mod automation;
pub mod handlers;

pub use automation::{
    parse_params, AutomationService, Operation, OperationContext, OperationError,
    OperationParams,
};
pub use handlers::{
    AutoSubscriptionHandler, CreateAnnotationCommand, CreateAnnotationHandler,
    CreateDocumentCommand, CreateDocumentHandler, DeleteAnnotationCommand,
    DeleteAnnotationHandler, MailSettings, MoveToColdStorageCommand, MoveToColdStorageHandler,
    NotificationListener, NotificationManager, RetrieveFromColdStorageCommand,
    RetrieveFromColdStorageHandler, UpdateAnnotationCommand, UpdateAnnotationHandler,
    UpdateDocumentCommand, UpdateDocumentHandler, MOVE_TO_COLD_STORAGE_OPERATION,
    RETRIEVE_FROM_COLD_STORAGE_OPERATION,
};
