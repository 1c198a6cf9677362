//! Standalone viewer window backed by winit.
//!
//! When the `gui` feature is enabled, a wry webview control panel is
//! overlaid on the top-left corner of the viewport.
//!
//! ```no_run
//! # use astroview::Viewer;
//! Viewer::builder()
//!     .with_model("asset/model/astro_core.glb")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use web_time::Instant;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    engine::ViewerEngine,
    error::ViewerError,
    input::{key_name, InputEvent, InputProcessor, MouseButton},
    options::Options,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    model: Option<String>,
    audio: Option<String>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    /// Create a builder with default options and the title "astroview".
    fn new() -> Self {
        Self {
            model: None,
            audio: None,
            options: None,
            title: "astroview".into(),
        }
    }

    /// Set the glTF model path.
    #[must_use]
    pub fn with_model(mut self, path: impl Into<String>) -> Self {
        self.model = Some(path.into());
        self
    }

    /// Set the background music path.
    #[must_use]
    pub fn with_audio(mut self, path: impl Into<String>) -> Self {
        self.audio = Some(path.into());
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`]. Explicit asset paths
    /// take precedence over the ones in the options.
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(model) = self.model {
            options.assets.model = model;
        }
        if let Some(audio) = self.audio {
            options.assets.audio = audio;
        }
        Viewer {
            options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the model over the star field.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::OptionsParse`] for unusable options, or
    /// [`ViewerError::Viewer`] if the event loop cannot be created or exits
    /// abnormally.
    pub fn run(self) -> Result<(), ViewerError> {
        self.options.validate()?;
        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            input: InputProcessor::new(),
            options: Some(self.options),
            title: self.title,
            #[cfg(feature = "gui")]
            panel: crate::gui::panel::PanelController::new(),
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    input: InputProcessor,
    /// Taken when the engine is created.
    options: Option<Options>,
    title: String,
    #[cfg(feature = "gui")]
    panel: crate::gui::panel::PanelController,
}

impl ViewerApp {
    /// Feed a raw event through the input processor into the engine.
    fn dispatch(&mut self, event: InputEvent) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        for command in self.input.handle_event(event) {
            if let Err(e) = engine.execute(command) {
                log::warn!("{e}");
            }
        }
    }

    /// Draw one frame and schedule the next.
    fn redraw(&mut self) {
        let Some(engine) = &mut self.engine else {
            return;
        };

        #[cfg(feature = "gui")]
        self.panel.drain_and_apply(engine);

        if let Err(e) = engine.tick(Instant::now()) {
            log::error!("render error: {e:?}");
        }

        #[cfg(feature = "gui")]
        self.panel.sync(engine);

        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            let logical_w = (f64::from(mon_size.width) / scale * 0.75) as u32;
            let logical_h = (f64::from(mon_size.height) / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let options = self.options.take().unwrap_or_default();
        let engine = match pollster::block_on(ViewerEngine::new(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
            &options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        #[cfg(feature = "gui")]
        {
            self.panel.init_webview(window.as_ref());
            self.panel.sync(&engine);
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
                #[cfg(feature = "gui")]
                if let Some(w) = &self.window {
                    self.panel.apply_layout(w);
                }
            }

            WindowEvent::RedrawRequested => self.redraw(),

            WindowEvent::MouseInput { button, state, .. } => {
                self.dispatch(InputEvent::MouseButton {
                    button: MouseButton::from(button),
                    pressed: state == ElementState::Pressed,
                });
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.dispatch(InputEvent::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                });
            }

            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.dispatch(InputEvent::Scroll { delta: scroll });
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                if let Some(key) = key_name(&event.logical_key) {
                    self.dispatch(InputEvent::KeyPressed { key });
                }
            }

            _ => {}
        }
    }
}
