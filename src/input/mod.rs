//! Input handling: event types, drag tracking, and the input processor
//! that converts raw window events into viewer commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable key actions.
mod keyboard;
/// Converts raw events into viewer commands.
pub mod processor;
pub mod tracker;

#[cfg(feature = "viewer")]
pub use event::key_name;
pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
pub use tracker::InputTracker;
