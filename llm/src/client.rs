//! HTTP client for an OpenAI-compatible chat-completion server.
//!
//! [`OpenAiClient`] requests a streamed completion and turns the server-sent
//! event stream into plain text fragments.

use crate::traits::{ChatStream, LLMClient, LLMError, Message};
use async_trait::async_trait;
use bytes::Bytes;
use futures_core::Stream;
use futures_util::stream;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::pin::Pin;
use tokio_stream::StreamExt;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

pub struct OpenAiClient {
    base_url: String,
    api_key: Option<String>,
    client: Client,
}

impl OpenAiClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
    stream: bool,
}

#[derive(Deserialize)]
struct Chunk {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Default, Deserialize)]
struct Delta {
    content: Option<String>,
}

/// What a single line of the event stream means.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SseLine {
    Token(String),
    Done,
    Skip,
}

/// Interpret one line of an event stream.
pub(crate) fn parse_line(line: &str) -> Result<SseLine, LLMError> {
    let Some(data) = line.trim().strip_prefix("data:") else {
        return Ok(SseLine::Skip);
    };
    let data = data.trim();
    if data == "[DONE]" {
        return Ok(SseLine::Done);
    }
    let chunk: Chunk = serde_json::from_str(data).map_err(|_| LLMError::InvalidResponse)?;
    let token = chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .unwrap_or_default();
    if token.is_empty() {
        Ok(SseLine::Skip)
    } else {
        Ok(SseLine::Token(token))
    }
}

type ByteStream = Pin<Box<dyn Stream<Item = reqwest::Result<Bytes>> + Send>>;

struct SseState {
    inner: ByteStream,
    buf: Vec<u8>,
    pending: VecDeque<Result<String, LLMError>>,
    done: bool,
}

impl SseState {
    /// Move every complete line in the buffer into `pending`.
    fn drain_lines(&mut self) {
        while let Some(pos) = self.buf.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buf.drain(..=pos).collect();
            self.push_line(&String::from_utf8_lossy(&line));
            if self.done {
                self.buf.clear();
                return;
            }
        }
    }

    fn push_line(&mut self, line: &str) {
        match parse_line(line) {
            Ok(SseLine::Token(t)) => self.pending.push_back(Ok(t)),
            Ok(SseLine::Done) => self.done = true,
            Ok(SseLine::Skip) => {}
            Err(e) => {
                warn!(line = line.trim(), "unparseable chat chunk");
                self.pending.push_back(Err(e));
                self.done = true;
            }
        }
    }
}

fn token_stream(inner: ByteStream) -> ChatStream {
    let state = SseState {
        inner,
        buf: Vec::new(),
        pending: VecDeque::new(),
        done: false,
    };
    let tokens = stream::unfold(state, |mut st| async move {
        loop {
            if let Some(item) = st.pending.pop_front() {
                return Some((item, st));
            }
            if st.done {
                return None;
            }
            match st.inner.next().await {
                Some(Ok(bytes)) => {
                    st.buf.extend_from_slice(&bytes);
                    st.drain_lines();
                }
                Some(Err(e)) => {
                    st.done = true;
                    return Some((Err(LLMError::Network(e.to_string())), st));
                }
                None => {
                    if !st.buf.is_empty() {
                        let rest = String::from_utf8_lossy(&st.buf).into_owned();
                        st.buf.clear();
                        st.push_line(&rest);
                    }
                    st.done = true;
                }
            }
        }
    });
    Box::pin(tokens)
}

#[async_trait]
impl LLMClient for OpenAiClient {
    async fn stream_chat(&self, model: &str, messages: &[Message]) -> Result<ChatStream, LLMError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        debug!(model, turns = messages.len(), "requesting chat completion");
        let mut req = self.client.post(url).json(&CompletionRequest {
            model,
            messages,
            stream: true,
        });
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| LLMError::Network(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "chat service rejected request");
            return Err(LLMError::Upstream {
                status: status.as_u16(),
                body,
            });
        }
        Ok(token_stream(Box::pin(resp.bytes_stream())))
    }
}
