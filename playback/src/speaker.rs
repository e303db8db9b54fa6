use crate::{AudioOutput, AudioPayload, PlaybackSlot, Result, SpeechClient};
use std::sync::Arc;

/// Voice used for every spoken message.
pub const DEFAULT_VOICE: &str = "Rachel";

/// Speaks text through a [`SpeechClient`] onto a shared [`PlaybackSlot`].
///
/// Calls are not queued or deduplicated. Two overlapping `speak` calls both
/// fetch; whichever finishes last is what plays.
pub struct Speaker<O> {
    client: SpeechClient,
    slot: Arc<PlaybackSlot<O>>,
    voice: String,
}

impl<O: AudioOutput> Speaker<O> {
    pub fn new(client: SpeechClient, slot: Arc<PlaybackSlot<O>>) -> Self {
        Self {
            client,
            slot,
            voice: DEFAULT_VOICE.to_string(),
        }
    }

    pub fn with_voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = voice.into();
        self
    }

    pub fn slot(&self) -> &Arc<PlaybackSlot<O>> {
        &self.slot
    }

    /// Fetch speech for `text` and start playing it, replacing any current
    /// audio. Returns the local address of the loaded payload.
    pub async fn speak(&self, text: &str) -> Result<String> {
        let bytes = self.client.fetch(&self.voice, text).await?;
        let payload = AudioPayload::mpeg(bytes);
        let url = payload.object_url();
        self.slot.load_and_play(payload)?;
        Ok(url)
    }
}
