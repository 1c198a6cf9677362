//! The viewer engine: GPU context, renderer, viewer state and the
//! background asset loads, driven once per frame.

pub mod command;
pub mod model_controller;
pub mod state;

use std::path::PathBuf;

use web_time::Instant;

pub use self::command::ViewerCommand;
pub use self::model_controller::ViewPreset;
pub use self::state::ViewerState;
use crate::assets::{self, AudioClip, ModelMesh, PendingLoad};
use crate::error::ViewerError;
use crate::gpu::render_context::RenderContext;
use crate::options::Options;
use crate::renderer::SceneRenderer;
use crate::util::frame_timing::FrameTiming;

/// The rendering engine for one viewer window.
///
/// # Construction
///
/// [`ViewerEngine::new`] creates the GPU context, the camera, lights and
/// star field, and starts loading the model and the music in the
/// background.
///
/// # Frame loop
///
/// Call [`tick`](Self::tick) once per redraw: it applies finished loads,
/// advances camera damping, the star field and view transitions, then
/// draws. Call [`resize`](Self::resize) when the window size changes and
/// feed user input through [`execute`](Self::execute).
pub struct ViewerEngine {
    /// Core wgpu device, queue, and surface.
    context: RenderContext,
    renderer: SceneRenderer,
    state: ViewerState,
    /// Loop the music once it starts.
    #[cfg(feature = "audio")]
    loop_music: bool,
    pending_model: Option<PendingLoad<ModelMesh>>,
    pending_audio: Option<PendingLoad<AudioClip>>,
    /// Per-frame timing and FPS tracking.
    pub frame_timing: FrameTiming,
}

impl ViewerEngine {
    /// Engine for `window`, configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Gpu`] if GPU initialization fails. Asset
    /// failures are not errors here; they surface later through the log.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: &Options,
    ) -> Result<Self, ViewerError> {
        let context = RenderContext::new(window, size).await?;
        let state =
            ViewerState::new(options, context.size(), &mut rand::rng());
        let renderer = SceneRenderer::new(&context, options, &state);

        let model_path = PathBuf::from(&options.assets.model);
        let pending_model = start_load("model", move || {
            assets::load_model(&model_path)
        });
        let audio_path = PathBuf::from(&options.assets.audio);
        let pending_audio = start_load("audio", move || {
            assets::load_audio(&audio_path)
        });

        log::info!(
            "viewer ready: {} stars, viewport {:?}",
            state.stars().points().len(),
            state.viewport()
        );

        Ok(Self {
            context,
            renderer,
            state,
            #[cfg(feature = "audio")]
            loop_music: options.audio.looping,
            pending_model,
            pending_audio,
            frame_timing: FrameTiming::new(),
        })
    }

    /// Viewer state (camera, model, stars, music).
    #[must_use]
    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// Run one user command.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidView`] for an unknown view name.
    pub fn execute(
        &mut self,
        command: ViewerCommand,
    ) -> Result<(), ViewerError> {
        self.state.execute(command, Instant::now())
    }

    /// Resize the surface, depth target and camera. Zero-sized dimensions
    /// are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context.device, width, height);
        self.state.resize(width, height);
    }

    /// Apply any background load that finished since the last frame.
    pub fn poll_assets(&mut self) {
        if let Some((label, result)) = finished(self.pending_model.as_ref()) {
            self.pending_model = None;
            match result {
                Ok(mesh) => {
                    self.renderer.upload_model(&self.context, &mesh);
                    self.state.attach_model();
                }
                Err(e) => log::error!("Failed to load {label}: {e}"),
            }
        }

        if let Some((label, result)) = finished(self.pending_audio.as_ref()) {
            self.pending_audio = None;
            match result {
                Ok(clip) => self.attach_audio(&clip),
                Err(e) => log::warn!("Failed to load {label}: {e}"),
            }
        }
    }

    #[cfg(feature = "audio")]
    fn attach_audio(&mut self, clip: &AudioClip) {
        match crate::audio::RodioOutput::open(
            clip,
            self.state.audio().volume(),
            self.loop_music,
        ) {
            Ok(output) => self.state.attach_audio(Box::new(output)),
            Err(e) => log::warn!("Failed to open audio output: {e}"),
        }
    }

    #[cfg(not(feature = "audio"))]
    fn attach_audio(&mut self, clip: &AudioClip) {
        log::warn!(
            "{} loaded but audio playback is not compiled in",
            clip.path.display()
        );
    }

    /// Advance one frame without drawing: apply finished loads, then
    /// camera damping, stars and view transitions.
    pub fn update(&mut self, now: Instant) {
        self.poll_assets();
        self.state.update(now);
    }

    /// Draw the current state.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the frame could not be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        self.renderer.render(&mut self.context, &self.state)
    }

    /// One full frame: [`update`](Self::update) then
    /// [`render`](Self::render).
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the frame could not be acquired.
    pub fn tick(&mut self, now: Instant) -> Result<(), wgpu::SurfaceError> {
        self.update(now);
        self.render()?;
        self.frame_timing.end_frame(now);
        if self.frame_timing.report_due(now) {
            log::debug!(
                "{:.1} fps over {} frames",
                self.frame_timing.fps(),
                self.frame_timing.frame_count()
            );
        }
        Ok(())
    }
}

/// The label and outcome of `pending` once its worker has reported.
fn finished<T>(
    pending: Option<&PendingLoad<T>>,
) -> Option<(&'static str, Result<T, ViewerError>)> {
    let pending = pending?;
    pending.poll().map(|result| (pending.label(), result))
}

/// Start a background load, logging instead of failing if the worker
/// thread cannot be spawned.
fn start_load<T, F>(label: &'static str, load: F) -> Option<PendingLoad<T>>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ViewerError> + Send + 'static,
{
    match assets::spawn_load(label, load) {
        Ok(pending) => Some(pending),
        Err(e) => {
            log::error!("Failed to start {label} load: {e}");
            None
        }
    }
}
