//! GUI panel controller: owns the wry webview and keeps it in sync.
//!
//! `ViewerApp` holds a single `PanelController` instead of a handful of
//! `#[cfg(feature = "gui")]` fields.

use std::sync::mpsc;

use winit::window::Window;

use super::state::{UiAction, UiState};
use super::webview;
use crate::engine::{ViewerCommand, ViewerEngine};

/// Owns the webview panel and the last state pushed to it.
pub(crate) struct PanelController {
    webview: Option<wry::WebView>,
    action_rx: Option<mpsc::Receiver<UiAction>>,
    /// Last state sent to the page; pushes are skipped while unchanged.
    last_pushed: Option<UiState>,
}

impl PanelController {
    /// A controller with no webview yet.
    pub(crate) fn new() -> Self {
        Self {
            webview: None,
            action_rx: None,
            last_pushed: None,
        }
    }

    /// Create the wry webview. The viewer keeps running without a panel
    /// if this fails.
    pub(crate) fn init_webview(&mut self, window: &Window) {
        let inner = window.inner_size();
        match webview::create_webview(window, inner.width, inner.height) {
            Ok((wv, rx)) => {
                self.webview = Some(wv);
                self.action_rx = Some(rx);
            }
            Err(e) => {
                log::error!("Failed to create control panel: {e}");
            }
        }
    }

    /// Keep the panel inside the window after a resize.
    pub(crate) fn apply_layout(&self, window: &Window) {
        let Some(ref wv) = self.webview else {
            return;
        };
        let inner = window.inner_size();
        if let Err(e) =
            wv.set_bounds(webview::panel_bounds(inner.width, inner.height))
        {
            log::debug!("panel resize failed: {e}");
        }
    }

    /// Run every button press received since the last frame.
    pub(crate) fn drain_and_apply(&self, engine: &mut ViewerEngine) {
        let Some(ref rx) = self.action_rx else {
            return;
        };
        while let Ok(action) = rx.try_recv() {
            if let Err(e) = engine.execute(ViewerCommand::from(action)) {
                log::warn!("panel action rejected: {e}");
            }
        }
    }

    /// Push the viewer's panel state if it changed since the last push.
    pub(crate) fn sync(&mut self, engine: &ViewerEngine) {
        let Some(ref wv) = self.webview else {
            return;
        };
        let state = UiState::from_state(engine.state());
        if self.last_pushed.as_ref() != Some(&state) {
            webview::push_state(wv, &state);
            self.last_pushed = Some(state);
        }
    }
}
