use crate::{AudioPayload, Result};
use std::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Something that can hold one audio source and play it.
///
/// `load` replaces whatever was loaded before, stopping it if it was playing.
pub trait AudioOutput {
    fn load(&mut self, payload: AudioPayload) -> Result<()>;
    fn play(&mut self) -> Result<()>;
    fn stop(&mut self);
}

/// Single shared output. Loads are last-write-wins; callers that want to
/// avoid interrupting current audio must `stop` or check first.
pub struct PlaybackSlot<O> {
    output: Mutex<O>,
    current: Mutex<Option<String>>,
}

impl<O: AudioOutput> PlaybackSlot<O> {
    pub fn new(output: O) -> Self {
        Self {
            output: Mutex::new(output),
            current: Mutex::new(None),
        }
    }

    pub fn load(&self, payload: AudioPayload) -> Result<()> {
        let mut output = self.lock();
        self.load_locked(&mut output, payload)
    }

    // Caller holds the output lock, so `current` always names what the
    // output last accepted.
    fn load_locked(&self, output: &mut O, payload: AudioPayload) -> Result<()> {
        let url = payload.object_url();
        debug!(%url, bytes = payload.bytes.len(), "loading audio");
        output.load(payload)?;
        *self.current.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(url);
        Ok(())
    }

    /// Local address of the payload last loaded, whether or not it is playing.
    pub fn current(&self) -> Option<String> {
        let _output = self.lock();
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn play(&self) -> Result<()> {
        self.lock().play()
    }

    pub fn stop(&self) {
        self.lock().stop()
    }

    /// Load and start in one step without letting another load slip between.
    pub fn load_and_play(&self, payload: AudioPayload) -> Result<()> {
        let mut output = self.lock();
        self.load_locked(&mut output, payload)?;
        output.play()
    }

    /// Direct access to the output, e.g. to wait for playback to finish.
    pub fn lock(&self) -> MutexGuard<'_, O> {
        self.output.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputEvent {
    Loaded(String),
    Played(String),
    Stopped,
}

/// Output that keeps audio in memory and records what happened to it.
#[derive(Debug, Default)]
pub struct MemoryOutput {
    source: Option<AudioPayload>,
    playing: bool,
    events: Vec<OutputEvent>,
}

impl MemoryOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// The payload currently audible, if any.
    pub fn now_playing(&self) -> Option<&AudioPayload> {
        self.source.as_ref().filter(|_| self.playing)
    }

    pub fn source(&self) -> Option<&AudioPayload> {
        self.source.as_ref()
    }

    pub fn events(&self) -> &[OutputEvent] {
        &self.events
    }
}

impl AudioOutput for MemoryOutput {
    fn load(&mut self, payload: AudioPayload) -> Result<()> {
        self.playing = false;
        self.events.push(OutputEvent::Loaded(payload.object_url()));
        self.source = Some(payload);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if let Some(src) = &self.source {
            self.playing = true;
            self.events.push(OutputEvent::Played(src.object_url()));
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.playing = false;
        self.events.push(OutputEvent::Stopped);
    }
}
