//! GPU-free viewer state.
//!
//! [`ViewerState`] owns every piece of mutable viewer state (camera, orbit
//! controls, model transform, star field, music, tweens, viewport) and
//! implements each user-facing operation as a method. The engine wraps it
//! with a GPU context; tests drive it directly.

use glam::Vec3;
use rand::Rng;
use web_time::Instant;

use super::command::ViewerCommand;
use super::model_controller::{ModelController, ViewPreset};
use crate::animation::{TweenProperty, TweenScheduler};
use crate::audio::{AudioController, AudioOutput};
use crate::camera::core::Camera;
use crate::camera::orbit::OrbitControls;
use crate::error::ViewerError;
use crate::input::KeyAction;
use crate::options::{KeybindingOptions, ModelOptions, Options};
use crate::scene::{ModelTransform, StarField};

/// All mutable state of one viewer window.
#[derive(Debug)]
pub struct ViewerState {
    camera: Camera,
    orbit: OrbitControls,
    /// `None` until the model has loaded.
    model: Option<ModelTransform>,
    stars: StarField,
    audio: AudioController,
    controller: ModelController,
    tweens: TweenScheduler,
    viewport: (u32, u32),
    keybindings: KeybindingOptions,
    model_options: ModelOptions,
    volume_step: f32,
}

impl ViewerState {
    /// Initial state for a `viewport`-sized window. Stars are drawn from
    /// `rng`.
    pub fn new<R: Rng + ?Sized>(
        options: &Options,
        viewport: (u32, u32),
        rng: &mut R,
    ) -> Self {
        let (width, height) = (viewport.0.max(1), viewport.1.max(1));
        let camera =
            Camera::from_options(&options.camera, width as f32 / height as f32);
        Self {
            camera,
            orbit: OrbitControls::new(&options.camera),
            model: None,
            stars: StarField::new(&options.stars, rng),
            audio: AudioController::new(options.audio.initial_volume),
            controller: ModelController::new(&options.model),
            tweens: TweenScheduler::new(),
            viewport: (width, height),
            keybindings: options.keybindings.clone(),
            model_options: options.model.clone(),
            volume_step: options.audio.volume_step,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    /// The scene camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The model transform, once loaded.
    #[must_use]
    pub fn model(&self) -> Option<&ModelTransform> {
        self.model.as_ref()
    }

    /// The star field.
    #[must_use]
    pub fn stars(&self) -> &StarField {
        &self.stars
    }

    /// Music state.
    #[must_use]
    pub fn audio(&self) -> &AudioController {
        &self.audio
    }

    /// Current viewport size in physical pixels.
    #[must_use]
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Whether a model drag is in progress.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// Whether a view transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !self.tweens.is_empty()
    }

    // ── Asset attachment ────────────────────────────────────────────

    /// Place the freshly loaded model at its configured position and
    /// scale.
    pub fn attach_model(&mut self) {
        let opts = &self.model_options;
        self.model = Some(ModelTransform::placed(
            Vec3::from_array(opts.position),
            opts.scale,
        ));
    }

    /// Attach the music output; the music controls become available.
    pub fn attach_audio(&mut self, output: Box<dyn AudioOutput>) {
        self.audio.attach(output);
    }

    // ── Operations ──────────────────────────────────────────────────

    /// Resolve a key name through the bindings and run its action.
    /// Returns `true` if the key was bound.
    pub fn on_key(&mut self, key: &str, now: Instant) -> bool {
        let Some(action) = self.keybindings.lookup(key) else {
            return false;
        };
        match action {
            KeyAction::MoveForward
            | KeyAction::MoveBackward
            | KeyAction::MoveLeft
            | KeyAction::MoveRight => {
                let _ = self.controller.translate(self.model.as_mut(), action);
            }
            KeyAction::ViewFront => self.apply_view(ViewPreset::Front, now),
            KeyAction::ViewSide => self.apply_view(ViewPreset::Side, now),
            KeyAction::ViewBack => self.apply_view(ViewPreset::Back, now),
            KeyAction::ToggleMusic => {
                let _ = self.toggle_music();
            }
            KeyAction::VolumeUp => {
                let _ = self.adjust_volume(self.volume_step);
            }
            KeyAction::VolumeDown => {
                let _ = self.adjust_volume(-self.volume_step);
            }
        }
        true
    }

    /// Ease the model to the named view (`front`, `side` or `back`).
    ///
    /// An unknown name is an error; a missing model is not.
    pub fn set_view(
        &mut self,
        name: &str,
        now: Instant,
    ) -> Result<(), ViewerError> {
        let preset: ViewPreset = name.parse()?;
        self.apply_view(preset, now);
        Ok(())
    }

    fn apply_view(&mut self, preset: ViewPreset, now: Instant) {
        self.controller.set_view(
            self.model.as_ref(),
            preset,
            &mut self.tweens,
            now,
        );
    }

    /// Toggle music playback. Returns `false` before the music has
    /// loaded.
    pub fn toggle_music(&mut self) -> bool {
        self.audio.toggle()
    }

    /// Change the music volume. Returns `false` before the music has
    /// loaded.
    pub fn adjust_volume(&mut self, delta: f32) -> bool {
        self.audio.adjust_volume(delta)
    }

    /// Track a new viewport size. Zero-sized dimensions are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.viewport = (width, height);
        self.camera.resize(width, height);
    }

    /// Advance everything that moves on its own by one frame: camera
    /// damping, then the star field, then view transitions.
    pub fn update(&mut self, now: Instant) {
        self.orbit.update(&mut self.camera);
        self.stars.advance();
        if !self.is_animating() {
            return;
        }

        let model = &mut self.model;
        self.tweens.update(now, |property, value| match property {
            TweenProperty::ModelYaw => {
                if let Some(model) = model.as_mut() {
                    model.yaw = value;
                }
            }
        });
    }

    /// Run one command.
    pub fn execute(
        &mut self,
        command: ViewerCommand,
        now: Instant,
    ) -> Result<(), ViewerError> {
        match command {
            ViewerCommand::BeginDrag { x, y } => {
                self.controller.on_drag_start(x, y);
            }
            ViewerCommand::DragTo { x, y } => {
                self.controller.on_drag_move(self.model.as_mut(), x, y);
            }
            ViewerCommand::EndDrag => self.controller.on_drag_end(),
            ViewerCommand::OrbitCamera { delta } => {
                self.orbit.rotate(delta, self.viewport.1 as f32);
            }
            ViewerCommand::PanCamera { delta } => {
                self.orbit.pan(delta, &self.camera, self.viewport.1 as f32);
            }
            ViewerCommand::ZoomCamera { delta } => self.orbit.zoom(delta),
            ViewerCommand::KeyPressed { key } => {
                let _ = self.on_key(&key, now);
            }
            ViewerCommand::SetView { name } => self.set_view(&name, now)?,
            ViewerCommand::ToggleMusic => {
                let _ = self.toggle_music();
            }
            ViewerCommand::VolumeUp => {
                let _ = self.adjust_volume(self.volume_step);
            }
            ViewerCommand::VolumeDown => {
                let _ = self.adjust_volume(-self.volume_step);
            }
            ViewerCommand::AdjustVolume { delta } => {
                let _ = self.adjust_volume(delta);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use web_time::Duration;

    use super::*;

    struct SilentOutput;

    impl AudioOutput for SilentOutput {
        fn play(&mut self) {}
        fn pause(&mut self) {}
        fn set_volume(&mut self, _volume: f32) {}
    }

    fn state() -> ViewerState {
        let mut rng = StdRng::seed_from_u64(7);
        ViewerState::new(&Options::default(), (800, 600), &mut rng)
    }

    fn loaded() -> ViewerState {
        let mut s = state();
        s.attach_model();
        s.attach_audio(Box::new(SilentOutput));
        s
    }

    fn yaw(s: &ViewerState) -> f32 {
        s.model().map_or(f32::NAN, |m| m.yaw)
    }

    #[test]
    fn model_is_placed_from_options() {
        let s = loaded();
        let model = s.model().copied().unwrap();
        assert_eq!(model.position, Vec3::new(5.6, -0.5, -1.5));
        assert_eq!(model.scale, 5.0);
        assert_eq!(model.yaw, 0.0);
    }

    #[test]
    fn drag_accumulates_only_while_dragging() {
        let mut s = loaded();
        let now = Instant::now();
        let commands = [
            ViewerCommand::BeginDrag { x: 0.0, y: 0.0 },
            ViewerCommand::DragTo { x: 10.0, y: 20.0 },
            ViewerCommand::DragTo { x: 15.0, y: 10.0 },
            ViewerCommand::EndDrag,
            ViewerCommand::DragTo { x: 100.0, y: 100.0 },
        ];
        for cmd in commands {
            s.execute(cmd, now).unwrap();
        }
        let model = s.model().copied().unwrap();
        assert!((model.yaw - 0.15).abs() < 1e-5);
        assert!((model.pitch - 0.10).abs() < 1e-5);
        assert!(!s.is_dragging());
    }

    #[test]
    fn arrow_and_letter_keys_match() {
        let now = Instant::now();
        for (arrow, letter) in [
            ("ArrowUp", "w"),
            ("ArrowDown", "s"),
            ("ArrowLeft", "a"),
            ("ArrowRight", "d"),
        ] {
            let mut by_arrow = loaded();
            let mut by_letter = loaded();
            assert!(by_arrow.on_key(arrow, now));
            assert!(by_letter.on_key(letter, now));
            assert_eq!(by_arrow.model(), by_letter.model());
            assert_ne!(by_arrow.model(), loaded().model());
        }
    }

    #[test]
    fn forward_key_moves_towards_negative_z() {
        let mut s = loaded();
        assert!(s.on_key("w", Instant::now()));
        let z = s.model().map(|m| m.position.z).unwrap();
        assert!((z - (-1.7)).abs() < 1e-5);
    }

    #[test]
    fn unbound_and_wrong_case_keys_do_nothing() {
        let mut s = loaded();
        let before = s.model().copied();
        assert!(!s.on_key("q", Instant::now()));
        assert!(!s.on_key("W", Instant::now()));
        assert_eq!(s.model().copied(), before);
    }

    #[test]
    fn keys_before_model_load_are_ignored() {
        let mut s = state();
        assert!(s.on_key("w", Instant::now()));
        assert!(s.model().is_none());
    }

    #[test]
    fn set_view_settles_exactly_on_each_preset() {
        for (name, target) in [("front", 0.0), ("side", FRAC_PI_2), ("back", PI)]
        {
            let mut s = loaded();
            let start = Instant::now();
            s.execute(ViewerCommand::SetView { name: name.into() }, start)
                .unwrap();
            s.update(start + Duration::from_millis(1000));
            assert_eq!(yaw(&s), target, "{name}");
            assert!(!s.is_animating());
        }
    }

    #[test]
    fn set_view_is_monotonic_without_overshoot() {
        let mut s = loaded();
        let start = Instant::now();
        s.set_view("back", start).unwrap();
        let mut prev = yaw(&s);
        for ms in (0..=1100).step_by(50) {
            s.update(start + Duration::from_millis(ms));
            let y = yaw(&s);
            assert!(y >= prev, "yaw went backwards at {ms} ms");
            assert!(y <= PI);
            prev = y;
        }
        assert_eq!(prev, PI);
    }

    #[test]
    fn second_set_view_replaces_first() {
        let mut s = loaded();
        let start = Instant::now();
        s.set_view("back", start).unwrap();
        s.update(start + Duration::from_millis(300));
        let mid = start + Duration::from_millis(300);
        s.set_view("front", mid).unwrap();
        s.update(mid + Duration::from_millis(1000));
        assert_eq!(yaw(&s), 0.0);
        s.update(mid + Duration::from_millis(2000));
        assert_eq!(yaw(&s), 0.0);
    }

    #[test]
    fn invalid_view_is_rejected() {
        let mut s = loaded();
        let result = s.set_view("top", Instant::now());
        assert!(matches!(result, Err(ViewerError::InvalidView(_))));
        assert!(!s.is_animating());
    }

    #[test]
    fn set_view_without_model_is_ok_noop() {
        let mut s = state();
        assert!(s.set_view("side", Instant::now()).is_ok());
        assert!(!s.is_animating());
    }

    #[test]
    fn music_controls_wait_for_load() {
        let mut s = state();
        assert!(!s.toggle_music());
        assert!(!s.adjust_volume(0.1));
        assert!(!s.audio().is_playing());
        assert_eq!(s.audio().volume(), 0.5);
    }

    #[test]
    fn volume_clamps_through_commands() {
        let mut s = loaded();
        let now = Instant::now();
        for _ in 0..15 {
            s.execute(ViewerCommand::AdjustVolume { delta: 0.1 }, now)
                .unwrap();
        }
        assert_eq!(s.audio().volume(), 1.0);
        for _ in 0..15 {
            s.execute(ViewerCommand::AdjustVolume { delta: -0.1 }, now)
                .unwrap();
        }
        assert_eq!(s.audio().volume(), 0.0);
    }

    #[test]
    fn toggle_music_flips_playing() {
        let mut s = loaded();
        s.execute(ViewerCommand::ToggleMusic, Instant::now()).unwrap();
        assert!(s.audio().is_playing());
        assert!(s.toggle_music());
        assert!(!s.audio().is_playing());
    }

    #[test]
    fn custom_bindings_reach_views_and_music() {
        let mut options = Options::default();
        let _ = options
            .keybindings
            .bindings
            .insert("2".into(), KeyAction::ViewSide);
        let _ = options
            .keybindings
            .bindings
            .insert("m".into(), KeyAction::ToggleMusic);
        let _ = options
            .keybindings
            .bindings
            .insert("=".into(), KeyAction::VolumeUp);
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = ViewerState::new(&options, (100, 100), &mut rng);
        s.attach_model();
        s.attach_audio(Box::new(SilentOutput));

        let start = Instant::now();
        assert!(s.on_key("2", start));
        s.update(start + Duration::from_secs(2));
        assert_eq!(yaw(&s), FRAC_PI_2);

        assert!(s.on_key("m", start));
        assert!(s.audio().is_playing());
        assert!(s.on_key("=", start));
        assert!((s.audio().volume() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn resize_sets_exact_aspect_and_viewport() {
        let mut s = state();
        s.resize(1280, 720);
        assert_eq!(s.viewport(), (1280, 720));
        assert_eq!(s.camera().aspect, 1280.0 / 720.0);
        s.resize(0, 500);
        s.resize(500, 0);
        assert_eq!(s.viewport(), (1280, 720));
    }

    #[test]
    fn update_advances_star_field() {
        let mut s = state();
        let start = s.stars().z_offset();
        s.update(Instant::now());
        assert!((s.stars().z_offset() - start - 0.2).abs() < 1e-6);
        assert!(s.stars().yaw() > 0.0);
    }

    #[test]
    fn orbit_commands_move_camera_over_frames() {
        let mut s = state();
        let eye = s.camera().eye;
        s.execute(
            ViewerCommand::OrbitCamera {
                delta: Vec2::new(40.0, 0.0),
            },
            Instant::now(),
        )
        .unwrap();
        s.update(Instant::now());
        assert_ne!(s.camera().eye, eye);
    }
}
