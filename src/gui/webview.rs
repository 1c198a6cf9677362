//! Wry webview child of the winit window.
//!
//! Creates a transparent [`wry::WebView`] in the top-left corner of the
//! window, serves the embedded `ui/` page through a custom `astroview://`
//! protocol, and bridges IPC between the page and the native viewer.

use std::borrow::Cow;
use std::sync::mpsc;

use rust_embed::RustEmbed;
use wry::http::{header::CONTENT_TYPE, Response};
use wry::{dpi, Rect, WebView, WebViewBuilder};

use super::state::{UiAction, UiState};

/// Embedded control panel page.
#[derive(RustEmbed)]
#[folder = "ui/"]
struct UiAssets;

/// Width of the control panel in physical pixels.
pub const PANEL_WIDTH: u32 = 240;
/// Height of the control panel in physical pixels.
pub const PANEL_HEIGHT: u32 = 260;
/// Gap between the panel and the window edges.
pub const PANEL_MARGIN: u32 = 12;

/// Create the wry webview as a child of the given window.
///
/// Returns `(webview, action_rx)`; the receiver yields [`UiAction`]s
/// posted by the page.
pub fn create_webview<W: wry::raw_window_handle::HasWindowHandle>(
    window: &W,
    window_width: u32,
    window_height: u32,
) -> Result<(WebView, mpsc::Receiver<UiAction>), wry::Error> {
    let (tx, rx) = mpsc::channel();

    let webview = WebViewBuilder::new()
        .with_bounds(panel_bounds(window_width, window_height))
        .with_transparent(true)
        .with_custom_protocol("astroview".into(), |_id, request| {
            let path = request.uri().path();
            let path = if path == "/" { "index.html" } else { &path[1..] };
            serve_asset(path)
        })
        .with_url("astroview://localhost/")
        .with_initialization_script(BRIDGE_JS)
        .with_ipc_handler(move |req| {
            if let Some(action) = UiAction::parse(req.body()) {
                let _ = tx.send(action);
            }
        })
        .build_as_child(window)?;

    Ok((webview, rx))
}

/// Panel rectangle for a window of the given size, clipped to the window.
#[must_use]
pub fn panel_bounds(window_width: u32, window_height: u32) -> Rect {
    let width = PANEL_WIDTH.min(window_width.saturating_sub(PANEL_MARGIN));
    let height = PANEL_HEIGHT.min(window_height.saturating_sub(PANEL_MARGIN));
    Rect {
        position: dpi::Position::Physical(dpi::PhysicalPosition::new(
            PANEL_MARGIN as i32,
            PANEL_MARGIN as i32,
        )),
        size: dpi::Size::Physical(dpi::PhysicalSize::new(width, height)),
    }
}

/// Push the panel state to the page.
pub fn push_state(webview: &WebView, state: &UiState) {
    let json = state.to_json();
    let escaped = json.replace('\\', "\\\\").replace('\'', "\\'");
    if let Err(e) = webview
        .evaluate_script(&format!("window.__astroview_push_state('{escaped}')"))
    {
        log::warn!("failed to push panel state: {e}");
    }
}

// ── Internals ────────────────────────────────────────────────────────────

fn serve_asset(path: &str) -> Response<Cow<'static, [u8]>> {
    match UiAssets::get(path) {
        Some(asset) => {
            let mime = mime_guess::from_path(path)
                .first_or_octet_stream()
                .to_string();
            Response::builder()
                .header(CONTENT_TYPE, mime)
                .body(Cow::from(asset.data.to_vec()))
                .unwrap_or_else(|_| Response::new(Cow::from(Vec::new())))
        }
        None => Response::builder()
            .status(404)
            .body(Cow::from(Vec::new()))
            .unwrap_or_else(|_| Response::new(Cow::from(Vec::new()))),
    }
}

/// JavaScript injected before page load. Defines the push function the
/// native side calls and re-dispatches it as a `CustomEvent`.
///
/// A push that arrives before the page has registered its listener is
/// kept and replayed when the listener attaches.
const BRIDGE_JS: &str = r#"
(function() {
    var pending = null;

    function dispatch(json) {
        window.dispatchEvent(new CustomEvent('astroview-state', { detail: json }));
    }

    window.__astroview_push_state = function(json) {
        pending = json;
        dispatch(json);
    };

    var origAdd = EventTarget.prototype.addEventListener;
    EventTarget.prototype.addEventListener = function(type, fn, opts) {
        origAdd.call(this, type, fn, opts);
        if (this === window && type === 'astroview-state' && pending) {
            dispatch(pending);
        }
    };
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panel_sits_in_top_left_corner() {
        let rect = panel_bounds(1280, 720);
        assert_eq!(
            rect.position,
            dpi::Position::Physical(dpi::PhysicalPosition::new(12, 12))
        );
        assert_eq!(
            rect.size,
            dpi::Size::Physical(dpi::PhysicalSize::new(PANEL_WIDTH, PANEL_HEIGHT))
        );
    }

    #[test]
    fn panel_shrinks_in_tiny_windows() {
        let rect = panel_bounds(100, 50);
        assert_eq!(
            rect.size,
            dpi::Size::Physical(dpi::PhysicalSize::new(88, 38))
        );
    }

    #[test]
    fn index_page_is_embedded() {
        let response = serve_asset("index.html");
        assert_eq!(response.status(), 200);
        assert!(response
            .headers()
            .get(CONTENT_TYPE)
            .is_some_and(|v| v.to_str().unwrap_or_default().starts_with("text/html")));
        assert_eq!(serve_asset("missing.js").status(), 404);
    }
}
