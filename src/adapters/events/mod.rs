//! Event bus adapters.
//!
//! - `InMemoryEventBus` - Immediate, in-process delivery
//! - `TransactionalEventBus` - Buffers events until the transaction commits
//! - `CapturingListener` - Records selected events for assertions

mod capturing;
mod in_memory;
mod transactional;

pub use capturing::CapturingListener;
pub use in_memory::InMemoryEventBus;
pub use transactional::TransactionalEventBus;
