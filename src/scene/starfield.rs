//! Procedural star field that drifts past the camera.

use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

use crate::options::StarOptions;

/// A fixed cloud of star positions moved as one rigid body.
///
/// The points are generated once and never change. Each frame
/// [`advance`](Self::advance) pushes the whole cloud forward along Z,
/// snapping it back once it has travelled past the scroll limit, and spins
/// it slowly about Y (and half as fast about X).
#[derive(Debug, Clone)]
pub struct StarField {
    points: Vec<Vec3>,
    z_offset: f32,
    rotation: f32,
    scroll_speed: f32,
    scroll_limit: f32,
    rotation_speed: f32,
}

impl StarField {
    /// Generate `options.count` stars uniformly in
    /// `[-extent, extent)` on every axis.
    ///
    /// Values [`StarOptions::validate`] would reject are replaced: an
    /// unusable extent collapses the cloud to the origin and an unusable
    /// scroll limit falls back to the default.
    pub fn new<R: Rng + ?Sized>(options: &StarOptions, rng: &mut R) -> Self {
        let mut extent = options.extent.abs();
        if !(extent * 2.0).is_finite() {
            log::warn!("star extent {} unusable, using 0", options.extent);
            extent = 0.0;
        }
        let mut scroll_limit = options.scroll_limit;
        if !(scroll_limit.is_finite() && scroll_limit > 0.0) {
            scroll_limit = StarOptions::default().scroll_limit;
            log::warn!(
                "star scroll limit {} unusable, using {scroll_limit}",
                options.scroll_limit
            );
        }
        let points = (0..options.count)
            .map(|_| {
                if extent == 0.0 {
                    return Vec3::ZERO;
                }
                Vec3::new(
                    rng.random_range(-extent..extent),
                    rng.random_range(-extent..extent),
                    rng.random_range(-extent..extent),
                )
            })
            .collect();

        Self {
            points,
            z_offset: 0.0,
            rotation: 0.0,
            scroll_speed: options.scroll_speed,
            scroll_limit,
            rotation_speed: options.rotation_speed,
        }
    }

    /// Advance the drift and spin by one frame.
    pub fn advance(&mut self) {
        self.z_offset += self.scroll_speed;
        if self.z_offset > self.scroll_limit {
            self.z_offset = -self.scroll_limit;
        }
        self.rotation += self.rotation_speed;
    }

    /// Star positions in the cloud's local space.
    #[must_use]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// Current Z offset of the whole cloud.
    #[must_use]
    pub fn z_offset(&self) -> f32 {
        self.z_offset
    }

    /// Rotation about Y.
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.rotation
    }

    /// Rotation about X.
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.rotation / 2.0
    }

    /// Local-to-world matrix of the cloud.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        let rotation =
            Quat::from_euler(EulerRot::XYZ, self.pitch(), self.yaw(), 0.0);
        Mat4::from_rotation_translation(
            rotation,
            Vec3::new(0.0, 0.0, self.z_offset),
        )
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn field() -> StarField {
        let mut rng = StdRng::seed_from_u64(7);
        StarField::new(&StarOptions::default(), &mut rng)
    }

    #[test]
    fn generates_count_points_inside_extent() {
        let stars = field();
        assert_eq!(stars.points().len(), 1000);
        for p in stars.points() {
            for c in p.to_array() {
                assert!((-1000.0..1000.0).contains(&c), "out of range: {c}");
            }
        }
    }

    #[test]
    fn points_are_spread_out() {
        let stars = field();
        let spread_x = stars
            .points()
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
        assert!(spread_x.0 < -500.0 && spread_x.1 > 500.0);
    }

    #[test]
    fn z_offset_is_a_sawtooth() {
        let mut stars = field();
        let mut wraps = 0;
        let mut prev = stars.z_offset();
        for _ in 0..1000 {
            stars.advance();
            let z = stars.z_offset();
            assert!(z <= 100.0 + 1e-3 && z >= -100.0);
            if z < prev {
                assert_eq!(z, -100.0);
                wraps += 1;
            }
            prev = z;
        }
        assert!(wraps >= 1, "z offset never wrapped");
    }

    #[test]
    fn rotation_accumulates_with_half_speed_pitch() {
        let mut stars = field();
        for _ in 0..10 {
            stars.advance();
        }
        assert!((stars.yaw() - 0.02).abs() < 1e-6);
        assert!((stars.pitch() - 0.01).abs() < 1e-6);
    }

    #[test]
    fn points_never_change() {
        let mut stars = field();
        let before = stars.points().to_vec();
        for _ in 0..600 {
            stars.advance();
        }
        assert_eq!(stars.points(), before.as_slice());
    }

    #[test]
    fn non_finite_extent_collapses_to_origin() {
        for extent in [f32::NAN, f32::INFINITY, f32::MAX] {
            let options = StarOptions {
                count: 5,
                extent,
                ..StarOptions::default()
            };
            let mut rng = StdRng::seed_from_u64(3);
            let stars = StarField::new(&options, &mut rng);
            assert_eq!(stars.points(), [Vec3::ZERO; 5].as_slice());
        }
    }

    #[test]
    fn negative_scroll_limit_still_wraps() {
        let options = StarOptions {
            scroll_limit: -5.0,
            ..StarOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        let mut stars = StarField::new(&options, &mut rng);
        let mut prev = stars.z_offset();
        let mut wrapped = false;
        for _ in 0..1000 {
            stars.advance();
            wrapped |= stars.z_offset() < prev;
            prev = stars.z_offset();
        }
        assert!(wrapped, "z offset stuck at {}", stars.z_offset());
    }

    #[test]
    fn empty_field_is_valid() {
        let options = StarOptions {
            count: 0,
            ..StarOptions::default()
        };
        let mut rng = StdRng::seed_from_u64(1);
        let stars = StarField::new(&options, &mut rng);
        assert!(stars.points().is_empty());
    }
}
