use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Placement of the loaded model and how user input moves it.
pub struct ModelOptions {
    /// Uniform scale applied once the model is loaded.
    pub scale: f32,
    /// Position applied once the model is loaded.
    pub position: [f32; 3],
    /// Radians of rotation per pixel of pointer drag.
    pub drag_sensitivity: f32,
    /// World units moved per movement key press.
    pub move_step: f32,
    /// Length of a view preset transition in milliseconds.
    pub view_duration_ms: u64,
    /// Easing curve of a view preset transition.
    pub view_easing: EasingFunction,
}

impl Default for ModelOptions {
    fn default() -> Self {
        Self {
            scale: 5.0,
            position: [5.6, -0.5, -1.5],
            drag_sensitivity: 0.01,
            move_step: 0.2,
            view_duration_ms: 1000,
            view_easing: EasingFunction::QuadraticOut,
        }
    }
}
