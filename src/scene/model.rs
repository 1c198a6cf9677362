//! Transform of the loaded model.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Position, Euler rotation and uniform scale of the model.
///
/// Rotation is stored as Euler angles in radians applied in X, Y, Z order
/// (`pitch` about X, `yaw` about Y, `roll` about Z). Angles accumulate
/// without wrapping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    /// World-space translation.
    pub position: Vec3,
    /// Rotation about the X axis.
    pub pitch: f32,
    /// Rotation about the Y axis.
    pub yaw: f32,
    /// Rotation about the Z axis.
    pub roll: f32,
    /// Uniform scale factor.
    pub scale: f32,
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            pitch: 0.0,
            yaw: 0.0,
            roll: 0.0,
            scale: 1.0,
        }
    }
}

impl ModelTransform {
    /// Transform at `position` with uniform `scale` and no rotation.
    #[must_use]
    pub fn placed(position: Vec3, scale: f32) -> Self {
        Self {
            position,
            scale,
            ..Self::default()
        }
    }

    /// Rotation as a quaternion.
    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, self.roll)
    }

    /// Local-to-world matrix: translate · rotate · scale.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation(),
            self.position,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn matrix_applies_scale_then_rotation_then_translation() {
        let mut transform = ModelTransform::placed(Vec3::new(1.0, 2.0, 3.0), 2.0);
        transform.yaw = FRAC_PI_2;
        let p = transform.matrix().transform_point3(Vec3::X);
        // X scaled to 2, rotated a quarter turn about Y onto -Z, then moved.
        assert!((p - Vec3::new(1.0, 2.0, 1.0)).length() < 1e-5, "{p}");
    }

    #[test]
    fn default_is_identity() {
        assert_eq!(ModelTransform::default().matrix(), Mat4::IDENTITY);
    }
}
