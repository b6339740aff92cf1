//! Key-value persistence for Deskmate.
//!
//! Tasks, clients and the chat credential live in a flat string-keyed store.
//! Collections are written through on every mutation; the store never caches.

pub mod error;
pub mod json;
pub mod store;

/// Store error type.
pub use error::StoreError;
/// JSON helpers layered over raw string values.
pub use json::{load_json, save_json};
/// Store interface and the file/in-memory implementations.
pub use store::{FileStore, MemoryStore, Store};

/// Key holding the task collection.
pub const TASKS_KEY: &str = "tasks";
/// Key holding the client collection.
pub const CLIENTS_KEY: &str = "clients";
/// Key holding the chat gateway credential (raw string, not JSON).
pub const CREDENTIAL_KEY: &str = "chat_credential";
