//! User directory adapters.

mod in_memory_user_directory;

pub use in_memory_user_directory::InMemoryUserDirectory;
