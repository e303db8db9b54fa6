//! Turn text into speech audio through a remote synthesis service.
//!
//! The crate exposes the [`SpeechSynthesizer`] trait and an
//! [`ElevenLabsClient`] implementation. Audio is handed back exactly as the
//! service produced it; failures from the service are carried unmodified in
//! [`SynthesisError::Upstream`] so callers can pass them through.

pub mod elevenlabs;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use elevenlabs::{ElevenLabsClient, DEFAULT_BASE_URL};

/// Synthesis model used for every request.
pub const MODEL_ID: &str = "eleven_multilingual_v2";

#[derive(Debug, Error)]
pub enum SynthesisError {
    /// The service answered with a non-success status.
    #[error("synthesis service returned {status}")]
    Upstream {
        status: u16,
        content_type: Option<String>,
        body: Bytes,
    },
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("invalid service url: {0}")]
    Url(#[from] url::ParseError),
    #[error("service url cannot take a path: {0}")]
    BaseUrl(String),
}

/// Convenience result type used throughout this crate.
pub type Result<T> = std::result::Result<T, SynthesisError>;

/// A voice and the text to speak with it.
///
/// Both fields default to empty so a missing field reaches the service as an
/// empty value instead of being rejected here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    #[serde(default)]
    pub voice: String,
    #[serde(default)]
    pub message: String,
}

impl SpeechRequest {
    pub fn new(voice: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            voice: voice.into(),
            message: message.into(),
        }
    }
}

/// Audio body returned by the service, untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeechAudio {
    pub bytes: Bytes,
    pub content_type: Option<String>,
}

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechAudio>;
}
