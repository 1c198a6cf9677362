use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Background music behavior.
pub struct AudioOptions {
    /// Volume applied when the clip is attached, in `[0, 1]`.
    pub initial_volume: f32,
    /// Volume change per "+" / "-" press.
    pub volume_step: f32,
    /// Whether the clip restarts when it ends.
    pub looping: bool,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            initial_volume: 0.5,
            volume_step: 0.1,
            looping: true,
        }
    }
}
