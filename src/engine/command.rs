//! The viewer's complete interactive vocabulary.
//!
//! Every user-facing operation, whether it comes from the pointer, the
//! keyboard or a control-panel button, is represented as a
//! `ViewerCommand`. Consumers construct commands and pass them to
//! [`ViewerEngine::execute`](super::ViewerEngine::execute).

use glam::Vec2;

/// A single user-facing operation on the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewerCommand {
    // ── Model drag ──────────────────────────────────────────────────
    /// Pointer pressed: start a model drag at the given position.
    BeginDrag {
        /// Cursor X in physical pixels.
        x: f32,
        /// Cursor Y in physical pixels.
        y: f32,
    },

    /// Pointer moved: rotate the model if a drag is active.
    DragTo {
        /// Cursor X in physical pixels.
        x: f32,
        /// Cursor Y in physical pixels.
        y: f32,
    },

    /// Pointer released: end the model drag.
    EndDrag,

    // ── Camera ──────────────────────────────────────────────────────
    /// Orbit the camera by `delta` pixels of pointer movement.
    OrbitCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Pan the camera by `delta` pixels of pointer movement.
    PanCamera {
        /// Horizontal and vertical drag delta.
        delta: Vec2,
    },

    /// Zoom the camera (positive = closer).
    ZoomCamera {
        /// Scroll amount in notches.
        delta: f32,
    },

    // ── Keyboard ────────────────────────────────────────────────────
    /// A key was pressed, named the way `KeyboardEvent.key` names it
    /// (`"ArrowUp"`, `"w"`). Resolved against the key bindings.
    KeyPressed {
        /// Key name.
        key: String,
    },

    // ── View presets ────────────────────────────────────────────────
    /// Animate the model to a named view (`"front"`, `"side"`, `"back"`).
    SetView {
        /// Preset name.
        name: String,
    },

    // ── Music ───────────────────────────────────────────────────────
    /// Toggle background music between playing and paused.
    ToggleMusic,

    /// Raise the music volume by the configured step.
    VolumeUp,

    /// Lower the music volume by the configured step.
    VolumeDown,

    /// Change the music volume by `delta`, clamped to `[0, 1]`.
    AdjustVolume {
        /// Signed volume change.
        delta: f32,
    },
}
