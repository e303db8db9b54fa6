use crate::AppState;
use clap::Parser;
use llm::OpenAiClient;
use std::sync::Arc;
use tts::ElevenLabsClient;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to bind the HTTP server
    #[arg(long, env = "TALKIE_ADDR", default_value = "127.0.0.1:3000")]
    pub addr: String,

    /// ElevenLabs API key
    #[arg(long, env = "ELEVENLABS_API_KEY", hide_env_values = true)]
    pub elevenlabs_api_key: Option<String>,

    /// Base URL of the ElevenLabs API
    #[arg(long, env = "ELEVENLABS_URL", default_value = tts::DEFAULT_BASE_URL)]
    pub elevenlabs_url: String,

    /// API key for the chat-completion service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Base URL of the chat-completion service
    #[arg(long, env = "OPENAI_URL", default_value = llm::DEFAULT_BASE_URL)]
    pub openai_url: String,

    /// Chat model name
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    pub openai_model: String,
}

impl Cli {
    /// Build the clients the handlers use.
    pub fn state(&self) -> AppState {
        AppState {
            synthesizer: Arc::new(ElevenLabsClient::new(
                &self.elevenlabs_url,
                self.elevenlabs_api_key.clone(),
            )),
            chat: Arc::new(OpenAiClient::new(
                &self.openai_url,
                self.openai_api_key.clone(),
            )),
            chat_model: self.openai_model.clone(),
        }
    }
}
