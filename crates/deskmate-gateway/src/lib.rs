//! Chat gateway client for Deskmate.
//!
//! Queries are sent to an OpenAI-compatible chat completion endpoint together
//! with a JSON snapshot of the current tasks and clients.

mod error;
mod http;
mod prompt;
mod wire;

pub use error::GatewayError;
pub use http::HttpChatGateway;
pub use prompt::{CONTEXT_HEADER, build_messages, context_snapshot};
pub use wire::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatRole, ChoiceMessage,
};

use async_trait::async_trait;

/// Remote conversational endpoint.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Send messages with the given bearer credential and return the reply text.
    async fn complete(
        &self,
        credential: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GatewayError>;
}
