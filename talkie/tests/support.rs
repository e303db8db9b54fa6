#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use llm::{ChatStream, LLMClient, LLMError, Message};
use std::sync::{Arc, Mutex};
use talkie::{AppState, app};
use tts::{SpeechAudio, SpeechRequest, SpeechSynthesizer, SynthesisError};

/// Serve the app on an ephemeral port and return its base URL.
pub async fn serve(state: AppState) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app(state)).await.unwrap();
    });
    format!("http://{addr}")
}

pub enum SynthReply {
    Audio(&'static [u8], Option<&'static str>),
    Upstream(u16, &'static str, &'static [u8]),
    Unreachable,
}

/// Synthesizer that records requests and answers with a fixed reply.
pub struct FakeSynth {
    pub reply: SynthReply,
    pub seen: Mutex<Vec<SpeechRequest>>,
}

impl FakeSynth {
    pub fn new(reply: SynthReply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynth {
    async fn synthesize(&self, request: &SpeechRequest) -> tts::Result<SpeechAudio> {
        self.seen.lock().unwrap().push(request.clone());
        match &self.reply {
            SynthReply::Audio(bytes, ct) => Ok(SpeechAudio {
                bytes: Bytes::from_static(*bytes),
                content_type: ct.map(str::to_string),
            }),
            SynthReply::Upstream(status, ct, body) => Err(SynthesisError::Upstream {
                status: *status,
                content_type: Some(ct.to_string()),
                body: Bytes::from_static(*body),
            }),
            SynthReply::Unreachable => {
                let err = reqwest::get("http://127.0.0.1:9").await.unwrap_err();
                Err(SynthesisError::Http(err))
            }
        }
    }
}

/// Chat client that streams fixed tokens or fails.
pub struct FakeChat {
    pub tokens: Vec<&'static str>,
    pub fail_with: Option<u16>,
    pub seen: Mutex<Vec<(String, Vec<Message>)>>,
}

impl FakeChat {
    pub fn tokens(tokens: Vec<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            tokens,
            fail_with: None,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(status: u16) -> Arc<Self> {
        Arc::new(Self {
            tokens: Vec::new(),
            fail_with: Some(status),
            seen: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl LLMClient for FakeChat {
    async fn stream_chat(&self, model: &str, messages: &[Message]) -> Result<ChatStream, LLMError> {
        self.seen
            .lock()
            .unwrap()
            .push((model.to_string(), messages.to_vec()));
        if let Some(status) = self.fail_with {
            return Err(LLMError::Upstream {
                status,
                body: "slow down".into(),
            });
        }
        let items: Vec<Result<String, LLMError>> =
            self.tokens.iter().map(|t| Ok(t.to_string())).collect();
        Ok(Box::pin(stream::iter(items)))
    }
}

pub fn state(synth: Arc<FakeSynth>, chat: Arc<FakeChat>) -> AppState {
    AppState {
        synthesizer: synth,
        chat,
        chat_model: "test-model".into(),
    }
}
