//! Abstractions for talking to chat-completion servers.
//!
//! The `llm` crate defines the [`LLMClient`] trait along with the
//! [`OpenAiClient`] implementation, which streams assistant replies from any
//! OpenAI-compatible endpoint.

pub mod client;
pub mod traits;

pub use client::{OpenAiClient, DEFAULT_BASE_URL};
pub use traits::{ChatStream, LLMClient, LLMError, Message, Role};
