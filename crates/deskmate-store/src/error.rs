//! Error types for store operations.

/// Errors returned by stores and helpers.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Key contains characters that cannot be mapped to storage.
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}
