use async_trait::async_trait;
use deskmate_gateway::{ChatGateway, ChatMessage, GatewayError};
use parking_lot::Mutex;
use std::sync::Arc;

/// One call observed by a fake gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub credential: String,
    pub messages: Vec<ChatMessage>,
}

/// Gateway returning a fixed reply and recording every call.
#[derive(Debug, Clone)]
pub struct FixedGateway {
    reply: String,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FixedGateway {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl ChatGateway for FixedGateway {
    async fn complete(
        &self,
        credential: &str,
        messages: Vec<ChatMessage>,
    ) -> Result<String, GatewayError> {
        self.calls.lock().push(RecordedCall {
            credential: credential.to_string(),
            messages,
        });
        Ok(self.reply.clone())
    }
}

#[derive(Debug, Clone)]
enum Failure {
    Status { status: u16, body: String },
    Transport(String),
}

/// Gateway that always fails the same way.
#[derive(Debug, Clone)]
pub struct FailingGateway {
    failure: Failure,
    calls: Arc<Mutex<usize>>,
}

impl FailingGateway {
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            failure: Failure::Status {
                status,
                body: body.into(),
            },
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            failure: Failure::Transport(message.into()),
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn call_count(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl ChatGateway for FailingGateway {
    async fn complete(
        &self,
        _credential: &str,
        _messages: Vec<ChatMessage>,
    ) -> Result<String, GatewayError> {
        *self.calls.lock() += 1;
        Err(match &self.failure {
            Failure::Status { status, body } => GatewayError::Status {
                status: *status,
                body: body.clone(),
            },
            Failure::Transport(message) => GatewayError::Transport(message.clone()),
        })
    }
}
