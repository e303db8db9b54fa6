//! Play payloads on the default audio device.

use crate::{AudioOutput, AudioPayload, PlaybackError, Result};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink};
use std::io::Cursor;

pub struct RodioOutput {
    // Keeps the device open while the sink plays.
    stream: OutputStream,
    sink: Option<Sink>,
}

impl RodioOutput {
    pub fn open_default() -> Result<Self> {
        let stream = OutputStreamBuilder::open_default_stream()
            .map_err(|e| PlaybackError::Device(e.to_string()))?;
        Ok(Self { stream, sink: None })
    }

    pub fn is_finished(&self) -> bool {
        self.sink.as_ref().map_or(true, Sink::empty)
    }

    /// Block until the loaded audio has played out.
    pub fn sleep_until_end(&self) {
        if let Some(sink) = &self.sink {
            sink.sleep_until_end();
        }
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, payload: AudioPayload) -> Result<()> {
        self.stop();
        let source =
            Decoder::new(Cursor::new(payload.bytes)).map_err(|e| PlaybackError::Decode(e.to_string()))?;
        let sink = Sink::connect_new(self.stream.mixer());
        sink.pause();
        sink.append(source);
        self.sink = Some(sink);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        if let Some(sink) = &self.sink {
            sink.play();
        }
        Ok(())
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }
}
