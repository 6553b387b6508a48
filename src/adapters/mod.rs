//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event buses and the capturing listener
//! - `storage` - In-memory document, cold-tier and subscription storage
//! - `directory` - User directory
//! - `mail` - SMTP delivery and the capturing mail box

pub mod directory;
pub mod events;
pub mod mail;
pub mod storage;

pub use directory::InMemoryUserDirectory;
pub use events::{CapturingListener, InMemoryEventBus, TransactionalEventBus};
pub use mail::{CapturingMailBox, SmtpMailSender};
pub use storage::{InMemoryColdStorage, InMemoryDocumentRepository, InMemorySubscriptionStore};
