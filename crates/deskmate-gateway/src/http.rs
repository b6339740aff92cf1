//! reqwest-backed chat gateway.

use crate::ChatGateway;
use crate::error::GatewayError;
use crate::wire::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use deskmate_config::GatewayConfig;
use log::{debug, info, warn};
use std::time::Duration;

/// Longest error body kept in [`GatewayError::Status`].
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Chat gateway posting to an OpenAI-compatible completions endpoint.
#[derive(Debug, Clone)]
pub struct HttpChatGateway {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

impl HttpChatGateway {
    /// Build a gateway for an endpoint and model with no request timeout.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
        }
    }

    /// Build a gateway from config, applying the optional timeout.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|err| GatewayError::Client(err.to_string()))?;
        info!(
            "chat gateway configured (endpoint={}, model={}, timeout_secs={:?})",
            config.endpoint, config.model, config.timeout_secs
        );
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
        })
    }

    /// Model name sent with every request.
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatGateway for HttpChatGateway {
    async fn complete(
        &self,
        credential: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages,
        };
        debug!(
            "sending chat request (endpoint={}, messages={})",
            self.endpoint,
            request.messages.len()
        );
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;
        if !status.is_success() {
            warn!("chat gateway error (status={})", status.as_u16());
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: text.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&text).map_err(|err| GatewayError::Decode(err.to_string()))?;
        let content = parsed
            .first_content()
            .ok_or(GatewayError::EmptyResponse)?
            .to_string();
        debug!("chat reply received (len={})", content.len());
        Ok(content)
    }
}
