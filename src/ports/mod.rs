//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Event Ports
//!
//! - `EventPublisher` - Port for publishing domain events
//! - `EventSubscriber` - Port for subscribing to domain events
//! - `EventHandler` - Handler that processes incoming events
//!
//! ## Storage Ports
//!
//! - `DocumentRepository` - Document tree persistence
//! - `ColdStorageBackend` - Cold tier holding moved content
//! - `SubscriptionStore` - Notification subscriptions
//!
//! ## Notification Ports
//!
//! - `UserDirectory` - Subscriber to mail address resolution
//! - `MailSender` - Mail delivery

mod cold_storage_backend;
mod document_repository;
mod event_publisher;
mod event_subscriber;
mod mail_sender;
mod subscription_store;
mod user_directory;

pub use cold_storage_backend::ColdStorageBackend;
pub use document_repository::DocumentRepository;
pub use event_publisher::EventPublisher;
pub use event_subscriber::{EventBus, EventHandler, EventSubscriber};
pub use mail_sender::MailSender;
pub use subscription_store::SubscriptionStore;
pub use user_directory::UserDirectory;
