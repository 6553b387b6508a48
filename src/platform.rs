//! In-memory wiring of the whole stack.
//!
//! [`Platform`] owns the adapters, registers the event handlers on the bus
//! and hands out command handlers on demand. Mutations become visible to
//! event handlers only when [`Platform::commit`] runs.
//!
//! ```ignore
//! let platform = Platform::in_memory(&AppConfig::default());
//! let doc = platform.create_document_handler().handle(cmd, metadata).await?;
//! platform.commit().await?;
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::adapters::{
    CapturingMailBox, InMemoryColdStorage, InMemoryDocumentRepository, InMemorySubscriptionStore,
    InMemoryUserDirectory, TransactionalEventBus,
};
use crate::application::{
    AutoSubscriptionHandler, AutomationService, CreateAnnotationHandler, CreateDocumentHandler,
    DeleteAnnotationHandler, MailSettings, MoveToColdStorageHandler, NotificationListener,
    NotificationManager, RetrieveFromColdStorageHandler, UpdateAnnotationHandler,
    UpdateDocumentHandler,
};
use crate::config::AppConfig;
use crate::domain::annotation::COMMENT_ADDED;
use crate::domain::foundation::DomainError;
use crate::domain::notification::NotificationRegistry;
use crate::ports::{EventSubscriber, MailSender};

/// Shared application state backed by in-memory adapters.
///
/// Adapters are kept with their concrete types so callers can inspect them.
#[derive(Clone)]
pub struct Platform {
    pub bus: Arc<TransactionalEventBus>,
    pub documents: Arc<InMemoryDocumentRepository>,
    pub cold_storage: Arc<InMemoryColdStorage>,
    pub subscriptions: Arc<InMemorySubscriptionStore>,
    pub directory: Arc<InMemoryUserDirectory>,
    pub mail_box: Arc<CapturingMailBox>,
    pub registry: Arc<NotificationRegistry>,
    pub notification_manager: Arc<NotificationManager>,
    pub automation: Arc<AutomationService>,
    max_days_of_availability: Option<u32>,
}

impl Platform {
    /// Wires the stack with a [`CapturingMailBox`] as mail sender.
    pub fn in_memory(config: &AppConfig) -> Self {
        let mail_box = Arc::new(CapturingMailBox::new());
        Self::with_mail_sender(config, mail_box.clone(), mail_box)
    }

    /// Wires the stack delivering mail through `mail_sender`.
    ///
    /// `mail_box` is kept for inspection only and receives nothing unless it
    /// is also the sender.
    pub fn with_mail_sender(
        config: &AppConfig,
        mail_sender: Arc<dyn MailSender>,
        mail_box: Arc<CapturingMailBox>,
    ) -> Self {
        let bus = Arc::new(TransactionalEventBus::new());
        let documents = Arc::new(InMemoryDocumentRepository::new());
        let cold_storage = Arc::new(InMemoryColdStorage::new());
        let subscriptions = Arc::new(InMemorySubscriptionStore::new());
        let directory = Arc::new(InMemoryUserDirectory::new());
        let registry = Arc::new(NotificationRegistry::with_defaults());
        let notification_manager = Arc::new(NotificationManager::new(
            subscriptions.clone(),
            registry.clone(),
        ));

        // Listener first: an author's first comment must not mail the author
        let listener = Arc::new(NotificationListener::new(
            subscriptions.clone(),
            documents.clone(),
            directory.clone(),
            mail_sender,
            registry.clone(),
            MailSettings::from_config(&config.email),
        ));
        let event_types = listener.event_types();
        let event_types: Vec<&str> = event_types.iter().map(String::as_str).collect();
        bus.subscribe_all(&event_types, listener);

        if config.notification.auto_subscribe_enabled() {
            bus.subscribe(
                COMMENT_ADDED,
                Arc::new(AutoSubscriptionHandler::new(
                    notification_manager.clone(),
                    subscriptions.clone(),
                    config.notification.auto_subscribe.clone(),
                )),
            );
        }

        let max_days_of_availability = config.cold_storage.max_days_of_availability;
        let mut automation = AutomationService::new();
        automation.register(Arc::new(MoveToColdStorageHandler::new(
            documents.clone(),
            cold_storage.clone(),
            bus.clone(),
        )));
        automation.register(Arc::new(RetrieveFromColdStorageHandler::new(
            documents.clone(),
            cold_storage.clone(),
            bus.clone(),
            max_days_of_availability,
        )));

        debug!(
            operations = ?automation.operation_ids(),
            auto_subscribe = ?config.notification.auto_subscribe,
            "platform wired"
        );

        Self {
            bus,
            documents,
            cold_storage,
            subscriptions,
            directory,
            mail_box,
            registry,
            notification_manager,
            automation: Arc::new(automation),
            max_days_of_availability,
        }
    }

    /// Delivers buffered events to handlers. See [`TransactionalEventBus::commit`].
    pub async fn commit(&self) -> Result<usize, DomainError> {
        self.bus.commit().await
    }

    pub fn create_document_handler(&self) -> CreateDocumentHandler {
        CreateDocumentHandler::new(self.documents.clone(), self.bus.clone())
    }

    pub fn update_document_handler(&self) -> UpdateDocumentHandler {
        UpdateDocumentHandler::new(self.documents.clone(), self.bus.clone())
    }

    pub fn create_annotation_handler(&self) -> CreateAnnotationHandler {
        CreateAnnotationHandler::new(self.documents.clone(), self.bus.clone())
    }

    pub fn update_annotation_handler(&self) -> UpdateAnnotationHandler {
        UpdateAnnotationHandler::new(self.documents.clone(), self.bus.clone())
    }

    pub fn delete_annotation_handler(&self) -> DeleteAnnotationHandler {
        DeleteAnnotationHandler::new(self.documents.clone(), self.bus.clone())
    }

    pub fn move_to_cold_storage_handler(&self) -> MoveToColdStorageHandler {
        MoveToColdStorageHandler::new(
            self.documents.clone(),
            self.cold_storage.clone(),
            self.bus.clone(),
        )
    }

    pub fn retrieve_from_cold_storage_handler(&self) -> RetrieveFromColdStorageHandler {
        RetrieveFromColdStorageHandler::new(
            self.documents.clone(),
            self.cold_storage.clone(),
            self.bus.clone(),
            self.max_days_of_availability,
        )
    }
}
