use clap::Parser;
use playback::{PlaybackSlot, RodioOutput, SpeechClient, Speaker, DEFAULT_VOICE};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Speak a line of text through a running talkie server.
#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Root URL of the talkie server
    #[arg(long, env = "TALKIE_URL", default_value = "http://127.0.0.1:3000")]
    server: String,
    /// Voice name or id
    #[arg(long, default_value = DEFAULT_VOICE)]
    voice: String,
    /// Text to speak
    text: Vec<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let slot = Arc::new(PlaybackSlot::new(RodioOutput::open_default()?));
    let speaker = Speaker::new(SpeechClient::new(&cli.server), slot.clone()).with_voice(cli.voice);
    speaker.speak(&cli.text.join(" ")).await?;
    slot.lock().sleep_until_end();
    Ok(())
}
