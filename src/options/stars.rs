use serde::{Deserialize, Serialize};

use crate::error::ViewerError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
/// Star field generation and motion.
pub struct StarOptions {
    /// Number of stars generated at startup.
    pub count: usize,
    /// Stars are placed in `[-extent, extent)` on every axis.
    pub extent: f32,
    /// Z offset added per frame.
    pub scroll_speed: f32,
    /// Once the offset exceeds this it restarts at `-scroll_limit`.
    pub scroll_limit: f32,
    /// Rotation added per frame, in radians.
    pub rotation_speed: f32,
    /// Sprite size in world units.
    pub size: f32,
    /// Sprite color.
    pub color: [f32; 3],
}

impl Default for StarOptions {
    fn default() -> Self {
        Self {
            count: 1000,
            extent: 1000.0,
            scroll_speed: 0.2,
            scroll_limit: 100.0,
            rotation_speed: 0.002,
            size: 2.5,
            color: [1.0, 1.0, 1.0],
        }
    }
}

impl StarOptions {
    /// Reject values the star field cannot be generated or animated with.
    ///
    /// `extent` must be finite and non-negative with `2 * extent` still
    /// finite; `scroll_limit` must be finite and positive; the per-frame
    /// speeds must be finite.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] naming the offending field.
    pub fn validate(&self) -> Result<(), ViewerError> {
        let invalid = |field: &str, value: f32| -> Result<(), ViewerError> {
            Err(ViewerError::OptionsParse(format!(
                "stars.{field} = {value} is out of range"
            )))
        };
        if !(self.extent >= 0.0 && (self.extent * 2.0).is_finite()) {
            return invalid("extent", self.extent);
        }
        if !(self.scroll_limit.is_finite() && self.scroll_limit > 0.0) {
            return invalid("scroll_limit", self.scroll_limit);
        }
        if !self.scroll_speed.is_finite() {
            return invalid("scroll_speed", self.scroll_speed);
        }
        if !self.rotation_speed.is_finite() {
            return invalid("rotation_speed", self.rotation_speed);
        }
        Ok(())
    }
}
