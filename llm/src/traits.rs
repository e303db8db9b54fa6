use async_trait::async_trait;
use futures_core::Stream;
use serde::{Deserialize, Serialize};
use std::pin::Pin;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One turn of a conversation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

#[derive(Debug, Error)]
pub enum LLMError {
    #[error("network error: {0}")]
    Network(String),
    #[error("chat service returned {status}")]
    Upstream { status: u16, body: String },
    #[error("invalid response")]
    InvalidResponse,
}

/// Text fragments of an assistant reply, in arrival order.
pub type ChatStream = Pin<Box<dyn Stream<Item = Result<String, LLMError>> + Send>>;

#[async_trait]
pub trait LLMClient: Send + Sync {
    async fn stream_chat(&self, model: &str, messages: &[Message]) -> Result<ChatStream, LLMError>;
}
