//! Scene lights as a GPU uniform.

use glam::Vec3;

use crate::options::LightingOptions;

/// Ambient plus one directional light.
///
/// Colors are premultiplied by their intensities. `direction` points from
/// the surface towards the light.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Ambient radiance (rgb, w unused).
    pub ambient: [f32; 4],
    /// Directional radiance (rgb, w unused).
    pub directional: [f32; 4],
    /// Unit vector towards the directional light (xyz, w unused).
    pub direction: [f32; 4],
}

impl LightingUniform {
    /// Uniform for the configured lights.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        let ambient =
            Vec3::from(options.ambient_color) * options.ambient_intensity;
        let directional = Vec3::from(options.directional_color)
            * options.directional_intensity;
        let direction = Vec3::from(options.directional_position)
            .try_normalize()
            .unwrap_or(Vec3::Y);
        Self {
            ambient: ambient.extend(0.0).to_array(),
            directional: directional.extend(0.0).to_array(),
            direction: direction.extend(0.0).to_array(),
        }
    }
}

/// Clear color for the configured background.
#[must_use]
pub fn clear_color(options: &LightingOptions) -> wgpu::Color {
    let [r, g, b] = options.background;
    wgpu::Color {
        r: f64::from(r),
        g: f64::from(g),
        b: f64::from(b),
        a: 1.0,
    }
}
