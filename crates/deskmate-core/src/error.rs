//! Error types for the assistant coordinator.

use deskmate_gateway::GatewayError;
use deskmate_store::StoreError;
use thiserror::Error;

/// Errors returned by [`crate::Assistant`] operations.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Task text was empty after trimming.
    #[error("task text is empty")]
    EmptyInput,
    /// No task id starts with the given text.
    #[error("no task matches id '{0}'")]
    UnknownTask(String),
    /// More than one task id starts with the given prefix.
    #[error("id prefix '{prefix}' matches {matches} tasks")]
    AmbiguousTask { prefix: String, matches: usize },
    /// A blank chat credential was given to save.
    #[error("chat credential is empty")]
    EmptyCredential,
    /// No chat credential is stored or configured.
    #[error("no chat credential configured")]
    MissingCredential,
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    /// No async runtime was available for timers.
    #[error("runtime unavailable: {0}")]
    Runtime(String),
}
