//! HTTP client for the ElevenLabs text-to-speech API.

use crate::{Result, SpeechAudio, SpeechRequest, SpeechSynthesizer, SynthesisError, MODEL_ID};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.elevenlabs.io";

const XI_API_KEY_HEADER: &str = "xi-api-key";

/// Client for the ElevenLabs synthesis endpoints.
#[derive(Clone)]
pub struct ElevenLabsClient {
    base_url: String,
    client: Client,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct TtsBody<'a> {
    text: &'a str,
    model_id: &'a str,
}

#[derive(Deserialize)]
struct VoiceList {
    #[serde(default)]
    voices: Vec<Voice>,
}

#[derive(Deserialize)]
struct Voice {
    voice_id: String,
    name: String,
}

impl ElevenLabsClient {
    /// Create a client targeting `base_url` (e.g. `https://api.elevenlabs.io`).
    ///
    /// Without an `api_key` requests go out unauthenticated and the service
    /// decides what to do with them.
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: Client::new(),
            api_key,
        }
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header(XI_API_KEY_HEADER, key),
            None => builder,
        }
    }

    /// `{base}/v1/text-to-speech/{voice_id}` with the id as a single escaped
    /// path segment.
    pub fn speech_url(&self, voice_id: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| SynthesisError::BaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["v1", "text-to-speech", voice_id]);
        Ok(url)
    }

    /// Map a voice name to its id. Unknown names are used as ids verbatim.
    pub async fn resolve_voice(&self, voice: &str) -> Result<String> {
        let url = format!("{}/v1/voices", self.base_url);
        let resp = self.authorize(self.client.get(url)).send().await?;
        let resp = ensure_success(resp).await?;
        let list: VoiceList = resp.json().await?;
        let id = list
            .voices
            .into_iter()
            .find(|v| v.name == voice)
            .map(|v| v.voice_id)
            .unwrap_or_else(|| voice.to_string());
        debug!(voice, voice_id = %id, "resolved voice");
        Ok(id)
    }
}

/// Turn a non-success response into [`SynthesisError::Upstream`] with its body
/// intact.
async fn ensure_success(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let content_type = content_type(&resp);
    let body = resp.bytes().await?;
    warn!(status = status.as_u16(), "synthesis service rejected request");
    Err(SynthesisError::Upstream {
        status: status.as_u16(),
        content_type,
        body,
    })
}

fn content_type(resp: &Response) -> Option<String> {
    resp.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<SpeechAudio> {
        let voice_id = self.resolve_voice(&request.voice).await?;
        let url = self.speech_url(&voice_id)?;
        info!(%voice_id, chars = request.message.len(), "requesting speech");
        let body = TtsBody {
            text: &request.message,
            model_id: MODEL_ID,
        };
        let resp = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await?;
        let resp = ensure_success(resp).await?;
        let content_type = content_type(&resp);
        let bytes = resp.bytes().await?;
        Ok(SpeechAudio {
            bytes,
            content_type,
        })
    }
}
