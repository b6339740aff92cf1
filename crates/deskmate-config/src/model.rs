//! Configuration schema for Deskmate.

use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default OpenAI-compatible chat completions endpoint.
pub const DEFAULT_GATEWAY_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
/// Default chat model name.
pub const DEFAULT_GATEWAY_MODEL: &str = "gpt-4o-mini";
/// Default system prompt sent ahead of every chat query.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are a concise personal office assistant. \
Answer using the tasks and clients provided with the question.";

/// Root config for Deskmate.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeskmateConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl DeskmateConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> DeskmateConfigBuilder {
        DeskmateConfigBuilder::new()
    }
}

/// Builder for assembling a `DeskmateConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct DeskmateConfigBuilder {
    config: DeskmateConfig,
}

impl DeskmateConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: DeskmateConfig::default(),
        }
    }

    /// Replace the store configuration.
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Replace the chat gateway configuration.
    pub fn gateway(mut self, gateway: GatewayConfig) -> Self {
        self.config.gateway = gateway;
        self
    }

    /// Replace the assistant behaviour configuration.
    pub fn assistant(mut self, assistant: AssistantConfig) -> Self {
        self.config.assistant = assistant;
        self
    }

    /// Finalize and return the built `DeskmateConfig`.
    pub fn build(self) -> DeskmateConfig {
        self.config
    }
}

/// Location of the persistent key-value store.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StoreConfig {
    #[serde(default)]
    pub path: Option<String>,
}

impl StoreConfig {
    /// Resolve the store directory, falling back to `~/.deskmate/store`.
    pub fn resolved_path(&self) -> PathBuf {
        if let Some(path) = self.path.as_ref() {
            return PathBuf::from(path);
        }
        UserDirs::new()
            .map(|dirs| dirs.home_dir().join(".deskmate").join("store"))
            .unwrap_or_else(|| PathBuf::from(".deskmate").join("store"))
    }
}

/// Remote chat completion endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_gateway_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_gateway_model")]
    pub model: String,
    #[serde(default = "default_system_prompt")]
    pub system_prompt: Option<String>,
    /// Request timeout; no timeout when unset.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            endpoint: default_gateway_endpoint(),
            model: default_gateway_model(),
            system_prompt: default_system_prompt(),
            timeout_secs: None,
        }
    }
}

fn default_gateway_endpoint() -> String {
    DEFAULT_GATEWAY_ENDPOINT.to_string()
}

fn default_gateway_model() -> String {
    DEFAULT_GATEWAY_MODEL.to_string()
}

fn default_system_prompt() -> Option<String> {
    Some(DEFAULT_SYSTEM_PROMPT.to_string())
}

/// Assistant behaviour switches.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssistantConfig {
    /// Answer "details"/"next" style queries locally instead of calling the gateway.
    #[serde(default)]
    pub local_shortcuts: bool,
}
