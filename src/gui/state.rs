//! Declarative panel state and the actions the panel sends back.

use serde::{Deserialize, Serialize};

use crate::audio::AudioController;
use crate::engine::model_controller::ViewPreset;
use crate::engine::state::ViewerState;
use crate::engine::ViewerCommand;

/// Everything the control panel displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UiState {
    /// Show the loading indicator (model not loaded yet, or failed).
    pub loading: bool,
    /// View button names, in display order.
    pub views: Vec<&'static str>,
    /// Music controls.
    pub music: MusicPanel,
}

/// The music section of the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MusicPanel {
    /// Hidden until the music has loaded.
    pub visible: bool,
    /// Play/pause button text.
    pub toggle_label: String,
    /// Volume readout, e.g. `"50%"`.
    pub volume_label: String,
}

impl MusicPanel {
    /// Panel contents for the given music state.
    #[must_use]
    pub fn from_audio(audio: &AudioController) -> Self {
        Self {
            visible: audio.is_loaded(),
            toggle_label: audio.toggle_label().to_owned(),
            volume_label: audio.volume_label(),
        }
    }
}

impl UiState {
    /// Panel contents for the current viewer state.
    #[must_use]
    pub fn from_state(state: &ViewerState) -> Self {
        Self {
            loading: state.model().is_none(),
            views: ViewPreset::ALL.iter().map(|p| p.name()).collect(),
            music: MusicPanel::from_audio(state.audio()),
        }
    }

    /// JSON sent to the panel page.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// A button press in the panel, as posted over IPC.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum UiAction {
    /// One of the view buttons.
    SetView {
        /// Preset name.
        view: String,
    },
    /// The play/pause button.
    ToggleMusic,
    /// The `+` button.
    VolumeUp,
    /// The `-` button.
    VolumeDown,
}

impl UiAction {
    /// Parse an IPC message body. Unknown or malformed messages yield
    /// `None`.
    #[must_use]
    pub fn parse(body: &str) -> Option<Self> {
        match serde_json::from_str(body) {
            Ok(action) => Some(action),
            Err(e) => {
                log::debug!("ignoring panel message {body:?}: {e}");
                None
            }
        }
    }
}

impl From<UiAction> for ViewerCommand {
    fn from(action: UiAction) -> Self {
        match action {
            UiAction::SetView { view } => Self::SetView { name: view },
            UiAction::ToggleMusic => Self::ToggleMusic,
            UiAction::VolumeUp => Self::VolumeUp,
            UiAction::VolumeDown => Self::VolumeDown,
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use web_time::Instant;

    use super::*;
    use crate::audio::AudioOutput;
    use crate::options::Options;

    struct SilentOutput;

    impl AudioOutput for SilentOutput {
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn set_volume(&mut self, _volume: f32) {}
    }

    fn state() -> ViewerState {
        let mut rng = StdRng::seed_from_u64(3);
        ViewerState::new(&Options::default(), (640, 480), &mut rng)
    }

    #[test]
    fn initial_panel_shows_loading_and_hides_music() {
        let ui = UiState::from_state(&state());
        assert!(ui.loading);
        assert!(!ui.music.visible);
        assert_eq!(ui.views, vec!["front", "side", "back"]);
    }

    #[test]
    fn loaded_assets_reveal_panel_sections() {
        let mut s = state();
        s.attach_model();
        s.attach_audio(Box::new(SilentOutput));
        let ui = UiState::from_state(&s);
        assert!(!ui.loading);
        assert!(ui.music.visible);
        assert_eq!(ui.music.toggle_label, "Play Music");
        assert_eq!(ui.music.volume_label, "50%");
    }

    #[test]
    fn labels_follow_audio_state() {
        let mut s = state();
        s.attach_audio(Box::new(SilentOutput));
        assert!(s.toggle_music());
        assert!(s.adjust_volume(0.2));
        let ui = UiState::from_state(&s);
        assert_eq!(ui.music.toggle_label, "Pause Music");
        assert_eq!(ui.music.volume_label, "70%");
    }

    #[test]
    fn state_serializes_for_the_page() {
        let json = UiState::from_state(&state()).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["loading"], true);
        assert_eq!(value["music"]["toggle_label"], "Play Music");
    }

    #[test]
    fn parses_panel_actions() {
        assert_eq!(
            UiAction::parse(r#"{"action":"set_view","view":"side"}"#),
            Some(UiAction::SetView {
                view: "side".into()
            })
        );
        assert_eq!(
            UiAction::parse(r#"{"action":"toggle_music"}"#),
            Some(UiAction::ToggleMusic)
        );
        assert_eq!(
            UiAction::parse(r#"{"action":"volume_down"}"#),
            Some(UiAction::VolumeDown)
        );
    }

    #[test]
    fn rejects_unknown_or_malformed_actions() {
        assert_eq!(UiAction::parse(r#"{"action":"launch"}"#), None);
        assert_eq!(UiAction::parse(r#"{"action":"set_view"}"#), None);
        assert_eq!(UiAction::parse("not json"), None);
    }

    #[test]
    fn volume_buttons_use_configured_step() {
        let mut options = Options::default();
        options.audio.volume_step = 0.25;
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = ViewerState::new(&options, (640, 480), &mut rng);
        s.attach_audio(Box::new(SilentOutput));

        let now = Instant::now();
        s.execute(ViewerCommand::from(UiAction::VolumeUp), now).unwrap();
        assert_eq!(UiState::from_state(&s).music.volume_label, "75%");
        s.execute(ViewerCommand::from(UiAction::VolumeDown), now).unwrap();
        s.execute(ViewerCommand::from(UiAction::VolumeDown), now).unwrap();
        assert_eq!(UiState::from_state(&s).music.volume_label, "25%");
    }

    #[test]
    fn actions_become_commands() {
        let mut s = state();
        s.attach_model();
        let cmd = ViewerCommand::from(UiAction::SetView {
            view: "back".into(),
        });
        assert_eq!(
            cmd,
            ViewerCommand::SetView {
                name: "back".into()
            }
        );
        assert!(s.execute(cmd, Instant::now()).is_ok());
        assert!(s.is_animating());
    }
}
