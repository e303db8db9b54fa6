//! Fetch speech from a talkie server and play it on a single shared output.
//!
//! [`Speaker::speak`] is the whole exchange: POST the text to
//! `/api/elevenlabs`, wrap the returned bytes in an [`AudioPayload`], load it
//! into the [`PlaybackSlot`] and start playing. The slot holds one payload at a
//! time, so the last load wins.

pub mod client;
pub mod output;
pub mod payload;
#[cfg(feature = "rodio")]
pub mod rodio_output;
pub mod speaker;

use thiserror::Error;

pub use client::SpeechClient;
pub use output::{AudioOutput, MemoryOutput, OutputEvent, PlaybackSlot};
pub use payload::{AudioPayload, MPEG};
#[cfg(feature = "rodio")]
pub use rodio_output::RodioOutput;
pub use speaker::{Speaker, DEFAULT_VOICE};

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The speech endpoint answered with a non-success status.
    #[error("speech endpoint returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("could not decode audio: {0}")]
    Decode(String),
    #[error("audio device unavailable: {0}")]
    Device(String),
}

pub type Result<T> = std::result::Result<T, PlaybackError>;
