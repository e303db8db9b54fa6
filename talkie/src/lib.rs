//! Chat page server with on-demand speech.
//!
//! Serves a single chat page, proxies chat turns to a completion service at
//! `/api/openai` and text-to-speech requests to ElevenLabs at
//! `/api/elevenlabs`.

pub mod config;
pub mod logging;
pub mod web;

pub use config::Cli;
pub use logging::init_logging;
pub use web::{AppState, ChatRequest, app, chat, index, speech};
