use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use futures::StreamExt;
use llm::{LLMClient, LLMError, Message};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tts::{SpeechRequest, SpeechSynthesizer, SynthesisError};

const OCTET_STREAM: &str = "application/octet-stream";
const PLAIN_TEXT: &str = "text/plain; charset=utf-8";

/// State shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub chat: Arc<dyn LLMClient>,
    pub chat_model: String,
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Serve the embedded chat page.
pub async fn index() -> Html<&'static str> {
    static INDEX: &str = include_str!("../index.html");
    Html(INDEX)
}

fn upstream_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Synthesize `message` with `voice` and hand the audio back untouched.
///
/// Service failures keep their status, content type and body.
pub async fn speech(
    State(state): State<AppState>,
    Json(req): Json<SpeechRequest>,
) -> Response {
    info!(voice = %req.voice, "speech requested");
    match state.synthesizer.synthesize(&req).await {
        Ok(audio) => {
            let content_type = audio.content_type.unwrap_or_else(|| OCTET_STREAM.into());
            ([(header::CONTENT_TYPE, content_type)], audio.bytes).into_response()
        }
        Err(SynthesisError::Upstream {
            status,
            content_type,
            body,
        }) => {
            error!(status, "synthesis failed upstream");
            let content_type = content_type.unwrap_or_else(|| OCTET_STREAM.into());
            (
                upstream_status(status),
                [(header::CONTENT_TYPE, content_type)],
                body,
            )
                .into_response()
        }
        Err(e) => {
            error!(?e, "synthesis request failed");
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

/// Stream the assistant's reply to the conversation as plain text.
pub async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Response {
    info!(turns = req.messages.len(), "chat requested");
    match state.chat.stream_chat(&state.chat_model, &req.messages).await {
        Ok(stream) => {
            let body = Body::from_stream(stream.map(|chunk| {
                chunk.inspect_err(|e| error!(?e, "chat stream broke off"))
            }));
            ([(header::CONTENT_TYPE, PLAIN_TEXT)], body).into_response()
        }
        Err(LLMError::Upstream { status, body }) => {
            error!(status, "chat failed upstream");
            (upstream_status(status), body).into_response()
        }
        Err(e) => {
            error!(?e, "chat request failed");
            (StatusCode::BAD_GATEWAY, e.to_string()).into_response()
        }
    }
}

/// Build the application router with the provided state.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/elevenlabs", post(speech))
        .route("/api/openai", post(chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
