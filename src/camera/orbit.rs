use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::CameraOptions;

/// Keeps the polar angle away from the poles so `look_at` stays defined.
const POLAR_EPSILON: f32 = 1e-6;

/// Orbit, pan and zoom around a pivot with optional damping.
///
/// Pointer input only queues motion; [`update`](Self::update) applies it
/// to the camera once per frame. With damping enabled each update applies
/// `damping_factor` of the pending rotation and pan and keeps the rest, so
/// motion decays smoothly after the pointer stops.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitControls {
    /// Pending azimuth change in radians.
    theta_delta: f32,
    /// Pending polar change in radians.
    phi_delta: f32,
    /// Pending world-space pivot translation.
    pan_offset: Vec3,
    /// Pending radius multiplier.
    scale: f32,

    enable_damping: bool,
    damping_factor: f32,
    enable_zoom: bool,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitControls {
    /// Controls configured from the camera options.
    #[must_use]
    pub fn new(options: &CameraOptions) -> Self {
        Self {
            theta_delta: 0.0,
            phi_delta: 0.0,
            pan_offset: Vec3::ZERO,
            scale: 1.0,
            enable_damping: options.enable_damping,
            damping_factor: options.damping_factor.clamp(0.0, 1.0),
            enable_zoom: options.enable_zoom,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance.max(options.min_distance),
        }
    }

    /// Queue an orbit for a pointer drag of `delta` pixels. A drag across
    /// the full viewport height is one full turn.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        self.theta_delta -= TAU * delta.x / height * self.rotate_speed;
        self.phi_delta -= TAU * delta.y / height * self.rotate_speed;
    }

    /// Queue a pan for a pointer drag of `delta` pixels so the point under
    /// the pivot follows the pointer.
    pub fn pan(&mut self, delta: Vec2, camera: &Camera, viewport_height: f32) {
        let height = viewport_height.max(1.0);
        let offset = camera.eye - camera.target;
        let target_distance =
            offset.length() * (camera.fovy.to_radians() / 2.0).tan();

        let forward = (camera.target - camera.eye).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = right.cross(forward);

        let left = -right * (2.0 * delta.x * target_distance / height);
        let upward = up * (2.0 * delta.y * target_distance / height);
        self.pan_offset += (left + upward) * self.pan_speed;
    }

    /// Queue a zoom (positive = closer).
    pub fn zoom(&mut self, delta: f32) {
        if self.enable_zoom {
            self.scale *= 0.95_f32.powf(delta * self.zoom_speed);
        }
    }

    /// Whether any motion is still pending.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        const REST: f32 = 1e-6;
        self.theta_delta.abs() > REST
            || self.phi_delta.abs() > REST
            || self.pan_offset.length_squared() > REST * REST
            || (self.scale - 1.0).abs() > REST
    }

    /// Apply pending motion to `camera` and decay it.
    pub fn update(&mut self, camera: &mut Camera) {
        if !self.is_moving() {
            return;
        }
        let offset = camera.eye - camera.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        let step = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };

        theta += self.theta_delta * step;
        phi = (phi + self.phi_delta * step)
            .clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        radius = (radius * self.scale)
            .clamp(self.min_distance, self.max_distance);
        camera.target += self.pan_offset * step;

        let sin_phi_radius = phi.sin() * radius;
        camera.eye = camera.target
            + Vec3::new(
                sin_phi_radius * theta.sin(),
                phi.cos() * radius,
                sin_phi_radius * theta.cos(),
            );

        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.theta_delta *= keep;
            self.phi_delta *= keep;
            self.pan_offset *= keep;
        } else {
            self.theta_delta = 0.0;
            self.phi_delta = 0.0;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(damping: bool) -> (OrbitControls, Camera) {
        let options = CameraOptions {
            enable_damping: damping,
            ..CameraOptions::default()
        };
        (OrbitControls::new(&options), Camera::from_options(&options, 1.0))
    }

    #[test]
    fn idle_update_keeps_camera_in_place() {
        let (mut controls, mut camera) = setup(true);
        let before = camera.eye;
        controls.update(&mut camera);
        assert!((camera.eye - before).length() < 1e-4);
    }

    #[test]
    fn rotation_preserves_distance_to_target() {
        let (mut controls, mut camera) = setup(false);
        let radius = (camera.eye - camera.target).length();
        controls.rotate(Vec2::new(120.0, -40.0), 800.0);
        controls.update(&mut camera);
        let after = (camera.eye - camera.target).length();
        assert!((after - radius).abs() < 1e-3);
    }

    #[test]
    fn damping_spreads_motion_over_frames() {
        let (mut damped, mut damped_camera) = setup(true);
        let (mut direct, mut direct_camera) = setup(false);
        let delta = Vec2::new(50.0, 0.0);
        damped.rotate(delta, 600.0);
        direct.rotate(delta, 600.0);

        damped.update(&mut damped_camera);
        direct.update(&mut direct_camera);
        let first_damped = damped_camera.eye;
        assert!(
            (first_damped - direct_camera.eye).length() > 1e-2,
            "damped camera should lag"
        );
        assert!(damped.is_moving());

        for _ in 0..400 {
            damped.update(&mut damped_camera);
        }
        assert!(!damped.is_moving());
        assert!((damped_camera.eye - direct_camera.eye).length() < 1e-2);
    }

    #[test]
    fn polar_angle_is_clamped() {
        let (mut controls, mut camera) = setup(false);
        let radius = (camera.eye - camera.target).length();
        controls.rotate(Vec2::new(0.0, 100_000.0), 100.0);
        controls.update(&mut camera);
        let offset = camera.eye - camera.target;
        assert!(offset.is_finite());
        assert!(offset.y > 0.0, "camera flipped past the pole");
        assert!((offset.length() - radius).abs() < 1e-3);
        assert!(camera.build_view().is_finite());
    }

    #[test]
    fn zoom_in_moves_closer_and_respects_limits() {
        let (mut controls, mut camera) = setup(false);
        let before = (camera.eye - camera.target).length();
        controls.zoom(1.0);
        controls.update(&mut camera);
        let after = (camera.eye - camera.target).length();
        assert!(after < before);

        for _ in 0..500 {
            controls.zoom(10.0);
            controls.update(&mut camera);
        }
        let min = CameraOptions::default().min_distance;
        assert!(((camera.eye - camera.target).length() - min).abs() < 1e-4);
    }

    #[test]
    fn zoom_disabled_is_ignored() {
        let options = CameraOptions {
            enable_zoom: false,
            enable_damping: false,
            ..CameraOptions::default()
        };
        let mut controls = OrbitControls::new(&options);
        let mut camera = Camera::from_options(&options, 1.0);
        let before = camera.eye;
        controls.zoom(5.0);
        controls.update(&mut camera);
        assert!((camera.eye - before).length() < 1e-4);
    }

    #[test]
    fn pan_moves_eye_and_target_together() {
        let (mut controls, mut camera) = setup(false);
        let offset_before = camera.eye - camera.target;
        controls.pan(Vec2::new(30.0, 0.0), &camera, 600.0);
        controls.update(&mut camera);
        let offset_after = camera.eye - camera.target;
        assert!(camera.target.length() > 1e-3);
        assert!((offset_after - offset_before).length() < 1e-3);
    }
}
