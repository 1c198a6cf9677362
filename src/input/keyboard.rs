use serde::{Deserialize, Serialize};

/// Viewer actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// ArrowUp = "move_forward"
/// m = "toggle_music"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Move the model away from the camera (z decreases).
    MoveForward,
    /// Move the model towards the camera (z increases).
    MoveBackward,
    /// Move the model left (x decreases).
    MoveLeft,
    /// Move the model right (x increases).
    MoveRight,
    /// Rotate the model to the front view.
    ViewFront,
    /// Rotate the model to the side view.
    ViewSide,
    /// Rotate the model to the back view.
    ViewBack,
    /// Play or pause the background music.
    ToggleMusic,
    /// Raise the music volume by one step.
    VolumeUp,
    /// Lower the music volume by one step.
    VolumeDown,
}
