//! Cold storage command handlers.
//!
//! Both handlers are also exposed as automation operations.

mod move_to_cold_storage;
mod retrieve_from_cold_storage;

pub use move_to_cold_storage::{
    MoveToColdStorageCommand, MoveToColdStorageHandler, MOVE_TO_COLD_STORAGE_OPERATION,
};
pub use retrieve_from_cold_storage::{
    RetrieveFromColdStorageCommand, RetrieveFromColdStorageHandler,
    RETRIEVE_FROM_COLD_STORAGE_OPERATION,
};
