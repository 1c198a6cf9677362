//! Play/pause toggle and clamped volume.

/// A playback sink the controller can drive.
pub trait AudioOutput {
    /// Resume (or start) playback.
    fn play(&mut self);
    /// Pause playback, keeping the position.
    fn pause(&mut self);
    /// Set the output volume in `[0, 1]`.
    fn set_volume(&mut self, volume: f32);
}

/// Music state for the control panel.
///
/// Until an output is attached every control is a no-op. Playback only
/// starts on an explicit [`toggle`](Self::toggle).
pub struct AudioController {
    output: Option<Box<dyn AudioOutput>>,
    playing: bool,
    volume: f32,
}

impl std::fmt::Debug for AudioController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioController")
            .field("loaded", &self.output.is_some())
            .field("playing", &self.playing)
            .field("volume", &self.volume)
            .finish()
    }
}

impl AudioController {
    /// Label shown while paused.
    pub const PLAY_LABEL: &'static str = "Play Music";
    /// Label shown while playing.
    pub const PAUSE_LABEL: &'static str = "Pause Music";

    /// A controller with nothing attached.
    #[must_use]
    pub fn new(initial_volume: f32) -> Self {
        Self {
            output: None,
            playing: false,
            volume: initial_volume.clamp(0.0, 1.0),
        }
    }

    /// Attach the loaded output, paused at the current volume.
    pub fn attach(&mut self, mut output: Box<dyn AudioOutput>) {
        output.set_volume(self.volume);
        output.pause();
        self.output = Some(output);
        self.playing = false;
    }

    /// Whether an output is attached.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.output.is_some()
    }

    /// Whether music is playing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current volume in `[0, 1]`.
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Switch between playing and paused. Returns `false` (and does
    /// nothing) when no output is attached.
    pub fn toggle(&mut self) -> bool {
        let Some(output) = self.output.as_mut() else {
            return false;
        };
        if self.playing {
            output.pause();
        } else {
            output.play();
        }
        self.playing = !self.playing;
        log::debug!("music {}", if self.playing { "playing" } else { "paused" });
        true
    }

    /// Add `delta` to the volume, clamped to `[0, 1]`. Returns `false`
    /// (and does nothing) when no output is attached.
    pub fn adjust_volume(&mut self, delta: f32) -> bool {
        let Some(output) = self.output.as_mut() else {
            return false;
        };
        self.volume = (self.volume + delta).clamp(0.0, 1.0);
        output.set_volume(self.volume);
        true
    }

    /// Text for the play/pause button.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.is_playing() {
            Self::PAUSE_LABEL
        } else {
            Self::PLAY_LABEL
        }
    }

    /// Volume as a rounded percentage, e.g. `"50%"`.
    #[must_use]
    pub fn volume_label(&self) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let percent = (self.volume * 100.0).round() as u32;
        format!("{percent}%")
    }
}
