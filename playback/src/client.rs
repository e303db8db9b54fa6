use crate::{PlaybackError, Result};
use bytes::Bytes;
use reqwest::{header, Client};
use tracing::{info, warn};
use tts::SpeechRequest;

/// Calls a talkie server's speech endpoint.
#[derive(Clone)]
pub struct SpeechClient {
    url: String,
    client: Client,
}

impl SpeechClient {
    /// `base_url` is the server root, e.g. `http://127.0.0.1:3000`.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            url: format!("{}/api/elevenlabs", base_url.as_ref().trim_end_matches('/')),
            client: Client::new(),
        }
    }

    /// POST `{voice, message}` and return the audio body as received.
    pub async fn fetch(&self, voice: &str, message: &str) -> Result<Bytes> {
        info!(voice, chars = message.len(), "fetching speech");
        let resp = self
            .client
            .post(&self.url)
            .header(header::ACCEPT, "application/json")
            .json(&SpeechRequest::new(voice, message))
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "speech request failed");
            return Err(PlaybackError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.bytes().await?)
    }
}
