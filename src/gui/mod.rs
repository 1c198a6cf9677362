//! Control panel: loading indicator, view buttons and music controls.
//!
//! [`state`] describes what the panel shows and what it can send back; it
//! is plain data and always compiled. With the `gui` feature the panel is
//! a wry webview child of the winit window that renders that state and
//! posts actions over a small JSON IPC bridge.

#[cfg(feature = "gui")]
pub(crate) mod panel;
pub mod state;
/// Wry webview creation, IPC handler, and state push helpers.
#[cfg(feature = "gui")]
pub mod webview;

pub use state::{MusicPanel, UiAction, UiState};
