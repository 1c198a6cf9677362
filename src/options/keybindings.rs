use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard bindings mapping key names to actions.
///
/// Key names follow the DOM `KeyboardEvent.key` convention: named keys
/// as `"ArrowUp"`, `"Escape"`, printable keys as the character they
/// produce (`"w"`, `"W"` with shift).
///
/// ```toml
/// [keybindings.bindings]
/// ArrowUp = "move_forward"
/// m = "toggle_music"
/// ```
pub struct KeybindingOptions {
    /// Maps key name → action.
    pub bindings: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            ("ArrowUp".into(), KeyAction::MoveForward),
            ("w".into(), KeyAction::MoveForward),
            ("ArrowDown".into(), KeyAction::MoveBackward),
            ("s".into(), KeyAction::MoveBackward),
            ("ArrowLeft".into(), KeyAction::MoveLeft),
            ("a".into(), KeyAction::MoveLeft),
            ("ArrowRight".into(), KeyAction::MoveRight),
            ("d".into(), KeyAction::MoveRight),
        ]);
        Self { bindings }
    }
}

impl KeybindingOptions {
    /// Look up the action for a key name.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.bindings.get(key).copied()
    }
}
