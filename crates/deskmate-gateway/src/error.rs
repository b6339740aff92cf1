//! Error types for chat gateway calls.

use thiserror::Error;

/// Errors returned by chat gateways.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Building the HTTP client failed.
    #[error("client setup failed: {0}")]
    Client(String),
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The endpoint answered with a non-success status.
    #[error("gateway returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The response body was not the expected JSON shape.
    #[error("invalid response: {0}")]
    Decode(String),
    /// The response carried no message content.
    #[error("response contained no message content")]
    EmptyResponse,
    /// Building the context snapshot failed.
    #[error("failed to serialize context: {0}")]
    Context(#[from] serde_json::Error),
}
