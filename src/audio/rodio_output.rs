//! `rodio` playback backend.

use std::io::Cursor;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::controller::AudioOutput;
use crate::assets::AudioClip;
use crate::error::ViewerError;

/// Plays one clip on the default output device.
pub struct RodioOutput {
    /// Dropping the stream silences the sink.
    _stream: OutputStream,
    sink: Sink,
}

impl RodioOutput {
    /// Open the default device and queue `clip`, paused at `volume`.
    pub fn open(
        clip: &AudioClip,
        volume: f32,
        looping: bool,
    ) -> Result<Self, ViewerError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| ViewerError::AudioLoad(e.to_string()))?;
        let sink = Sink::try_new(&handle)
            .map_err(|e| ViewerError::AudioLoad(e.to_string()))?;
        sink.pause();
        sink.set_volume(volume);

        let source = Cursor::new(Arc::clone(&clip.bytes));
        if looping {
            let decoder = Decoder::new_looped(source)
                .map_err(|e| ViewerError::AudioLoad(e.to_string()))?;
            sink.append(decoder);
        } else {
            let decoder = Decoder::new(source)
                .map_err(|e| ViewerError::AudioLoad(e.to_string()))?;
            log::debug!(
                "audio clip: {} Hz, {} channel(s)",
                decoder.sample_rate(),
                decoder.channels()
            );
            sink.append(decoder);
        }

        log::info!("audio output ready for {}", clip.path.display());
        Ok(Self {
            _stream: stream,
            sink,
        })
    }
}

impl AudioOutput for RodioOutput {
    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }
}
