//! Pointer and keyboard manipulation of the model transform.

use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use web_time::{Duration, Instant};

use crate::animation::{Tween, TweenProperty, TweenScheduler};
use crate::error::ViewerError;
use crate::input::{InputTracker, KeyAction};
use crate::options::ModelOptions;
use crate::scene::ModelTransform;
use crate::util::easing::EasingFunction;

/// Named model orientation reachable from the view buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    /// Yaw 0.
    Front,
    /// Yaw π/2.
    Side,
    /// Yaw π.
    Back,
}

impl ViewPreset {
    /// Every preset, in button order.
    pub const ALL: [ViewPreset; 3] =
        [ViewPreset::Front, ViewPreset::Side, ViewPreset::Back];

    /// Target yaw in radians.
    #[must_use]
    pub fn yaw(self) -> f32 {
        match self {
            ViewPreset::Front => 0.0,
            ViewPreset::Side => FRAC_PI_2,
            ViewPreset::Back => PI,
        }
    }

    /// Lowercase name used by the control panel.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ViewPreset::Front => "front",
            ViewPreset::Side => "side",
            ViewPreset::Back => "back",
        }
    }
}

impl fmt::Display for ViewPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ViewPreset {
    type Err = ViewerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| ViewerError::InvalidView(s.to_owned()))
    }
}

/// Maps drag, movement keys and view presets onto the model transform.
///
/// The controller owns only the drag state and the tuning constants; the
/// transform itself is passed in, and is `None` until the model has
/// loaded. Every operation is a no-op while it is `None`.
#[derive(Debug, Clone)]
pub struct ModelController {
    tracker: InputTracker,
    drag_sensitivity: f32,
    move_step: f32,
    view_duration: Duration,
    view_easing: EasingFunction,
}

impl ModelController {
    /// Controller tuned by the model options.
    #[must_use]
    pub fn new(options: &ModelOptions) -> Self {
        Self {
            tracker: InputTracker::new(),
            drag_sensitivity: options.drag_sensitivity,
            move_step: options.move_step,
            view_duration: Duration::from_millis(options.view_duration_ms),
            view_easing: options.view_easing,
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Drag state.
    #[must_use]
    pub fn tracker(&self) -> &InputTracker {
        &self.tracker
    }

    /// Start a drag at `(x, y)`.
    pub fn on_drag_start(&mut self, x: f32, y: f32) {
        self.tracker.press(x, y);
    }

    /// Rotate the model by the pointer movement since the last position.
    ///
    /// Horizontal movement turns yaw, vertical movement turns pitch. With
    /// no model the reference point stays where it was.
    pub fn on_drag_move(
        &mut self,
        model: Option<&mut ModelTransform>,
        x: f32,
        y: f32,
    ) {
        let Some(model) = model else {
            return;
        };
        if let Some(delta) = self.tracker.drag_to(x, y) {
            model.yaw += delta.x * self.drag_sensitivity;
            model.pitch += delta.y * self.drag_sensitivity;
        }
    }

    /// End the drag.
    pub fn on_drag_end(&mut self) {
        self.tracker.release();
    }

    /// Apply a movement action. Returns `true` if the model moved.
    pub fn translate(
        &self,
        model: Option<&mut ModelTransform>,
        action: KeyAction,
    ) -> bool {
        let step = self.move_step;
        let delta = match action {
            KeyAction::MoveForward => Vec3::new(0.0, 0.0, -step),
            KeyAction::MoveBackward => Vec3::new(0.0, 0.0, step),
            KeyAction::MoveLeft => Vec3::new(-step, 0.0, 0.0),
            KeyAction::MoveRight => Vec3::new(step, 0.0, 0.0),
            _ => return false,
        };
        let Some(model) = model else {
            return false;
        };
        model.position += delta;
        true
    }

    /// Start easing the model's yaw to `preset`, replacing any view
    /// transition already running.
    pub fn set_view(
        &self,
        model: Option<&ModelTransform>,
        preset: ViewPreset,
        tweens: &mut TweenScheduler,
        now: Instant,
    ) {
        let Some(model) = model else {
            return;
        };
        let tween = Tween::new(
            model.yaw,
            preset.yaw(),
            now,
            self.view_duration,
            self.view_easing,
        );
        if tweens.start(TweenProperty::ModelYaw, tween) {
            log::debug!("view {preset}: replaced running transition");
        }
    }
}
