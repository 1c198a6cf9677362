//! Lit draw of the loaded model.

use glam::Mat4;
use wgpu::util::DeviceExt;

use super::pipeline_util::{create_scene_pipeline, ScenePipelineDesc};
use crate::assets::{ModelMesh, ModelVertex};
use crate::gpu::pipeline_helpers::UniformBinding;
use crate::scene::ModelTransform;

/// Per-draw model matrices.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    /// Local-to-world matrix.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, for normals.
    pub normal: [[f32; 4]; 4],
}

impl ModelUniform {
    /// Matrices for `transform`.
    #[must_use]
    pub fn from_transform(transform: &ModelTransform) -> Self {
        let model = transform.matrix();
        let normal = if model.determinant().abs() < f32::EPSILON {
            Mat4::IDENTITY
        } else {
            model.inverse().transpose()
        };
        Self {
            model: model.to_cols_array_2d(),
            normal: normal.to_cols_array_2d(),
        }
    }
}

impl Default for ModelUniform {
    fn default() -> Self {
        Self::from_transform(&ModelTransform::default())
    }
}

const VERTEX_ATTRIBUTES: [wgpu::VertexAttribute; 3] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

fn vertex_layout() -> wgpu::VertexBufferLayout<'static> {
    wgpu::VertexBufferLayout {
        array_stride: size_of::<ModelVertex>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &VERTEX_ATTRIBUTES,
    }
}

/// Vertex/index buffers and pipeline for the model mesh.
pub(crate) struct ModelPass {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    transform: UniformBinding,
}

impl ModelPass {
    /// Upload `mesh` and build the pipeline. Group 0 is the camera, group
    /// 1 the lights, group 2 the model matrices.
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        lighting_layout: &wgpu::BindGroupLayout,
        mesh: &ModelMesh,
    ) -> Self {
        let transform = UniformBinding::new(
            device,
            "Model Transform",
            &ModelUniform::default(),
            wgpu::ShaderStages::VERTEX,
        );
        let pipeline = create_scene_pipeline(
            device,
            &ScenePipelineDesc {
                label: "Model Pipeline",
                shader_source: include_str!("../../assets/shaders/model.wgsl"),
                bind_group_layouts: &[
                    camera_layout,
                    lighting_layout,
                    &transform.layout,
                ],
                buffers: &[vertex_layout()],
                color_format,
                cull_mode: None,
            },
        );

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Model Vertex Buffer"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Model Index Buffer"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            pipeline,
            vertex_buffer,
            index_buffer,
            index_count: mesh.indices.len() as u32,
            transform,
        }
    }

    /// Upload the current transform.
    pub(crate) fn update(&self, queue: &wgpu::Queue, model: &ModelTransform) {
        self.transform
            .write(queue, &ModelUniform::from_transform(model));
    }

    /// Draw the mesh. Camera and lights must already be bound at groups 0
    /// and 1.
    pub(crate) fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.index_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(2, &self.transform.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.set_index_buffer(
            self.index_buffer.slice(..),
            wgpu::IndexFormat::Uint32,
        );
        render_pass.draw_indexed(0..self.index_count, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;

    #[test]
    fn vertex_stride_matches_shader_inputs() {
        assert_eq!(size_of::<ModelVertex>(), 40);
        assert_eq!(vertex_layout().array_stride, 40);
    }

    #[test]
    fn uniform_carries_model_matrix() {
        let transform = ModelTransform::placed(Vec3::new(1.0, 2.0, 3.0), 5.0);
        let uniform = ModelUniform::from_transform(&transform);
        assert_eq!(Mat4::from_cols_array_2d(&uniform.model), transform.matrix());
    }

    #[test]
    fn normal_matrix_undoes_uniform_scale() {
        let transform = ModelTransform::placed(Vec3::ZERO, 5.0);
        let uniform = ModelUniform::from_transform(&transform);
        let normal = Mat4::from_cols_array_2d(&uniform.normal);
        let n = normal.transform_vector3(Vec3::Y);
        assert!((n - Vec3::Y * 0.2).length() < 1e-6);
    }
}
