use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Scene lights and background.
pub struct LightingOptions {
    /// Clear color behind the stars.
    pub background: [f32; 3],
    /// Ambient light color.
    pub ambient_color: [f32; 3],
    /// Ambient light intensity.
    pub ambient_intensity: f32,
    /// Directional light color.
    pub directional_color: [f32; 3],
    /// Directional light intensity.
    pub directional_intensity: f32,
    /// Directional light position; the light points from here to the origin.
    pub directional_position: [f32; 3],
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            background: [0.0, 0.0, 0.0],
            ambient_color: [1.0, 1.0, 1.0],
            ambient_intensity: 2.0,
            directional_color: [1.0, 1.0, 1.0],
            directional_intensity: 2.0,
            directional_position: [5.0, 10.0, 5.0],
        }
    }
}
