//! Camera-facing sprites for the star field.

use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use super::pipeline_util::{create_scene_pipeline, ScenePipelineDesc};
use crate::camera::core::Camera;
use crate::gpu::pipeline_helpers::UniformBinding;
use crate::options::StarOptions;
use crate::scene::StarField;

/// Star cloud transform and sprite parameters.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct StarUniform {
    /// Cloud-to-world matrix (drift and spin).
    pub model: [[f32; 4]; 4],
    /// Camera right axis in world space (xyz, w unused).
    pub camera_right: [f32; 4],
    /// Camera up axis in world space (xyz, w unused).
    pub camera_up: [f32; 4],
    /// Star color (rgb) and sprite edge length in world units (w).
    pub color_size: [f32; 4],
}

impl StarUniform {
    /// Uniform for the current cloud pose seen from `camera`.
    #[must_use]
    pub fn new(stars: &StarField, camera: &Camera, options: &StarOptions) -> Self {
        let view = camera.build_view();
        let right = view.row(0).truncate();
        let up = view.row(1).truncate();
        Self {
            model: stars.matrix().to_cols_array_2d(),
            camera_right: right.extend(0.0).to_array(),
            camera_up: up.extend(0.0).to_array(),
            color_size: Vec3::from(options.color).extend(options.size).to_array(),
        }
    }
}

impl Default for StarUniform {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            camera_right: [1.0, 0.0, 0.0, 0.0],
            camera_up: [0.0, 1.0, 0.0, 0.0],
            color_size: [1.0, 1.0, 1.0, 1.0],
        }
    }
}

const INSTANCE_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];

/// One instanced quad per star.
pub(crate) struct StarPass {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: Option<wgpu::Buffer>,
    count: u32,
    uniform: UniformBinding,
    options: StarOptions,
}

impl StarPass {
    /// Upload the star positions and build the pipeline. Group 0 is the
    /// camera, group 1 the star uniform.
    pub(crate) fn new(
        device: &wgpu::Device,
        color_format: wgpu::TextureFormat,
        camera_layout: &wgpu::BindGroupLayout,
        stars: &StarField,
        options: &StarOptions,
    ) -> Self {
        let uniform = UniformBinding::new(
            device,
            "Star",
            &StarUniform::default(),
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let pipeline = create_scene_pipeline(
            device,
            &ScenePipelineDesc {
                label: "Star Pipeline",
                shader_source: include_str!("../../assets/shaders/stars.wgsl"),
                bind_group_layouts: &[camera_layout, &uniform.layout],
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Instance,
                    attributes: &INSTANCE_ATTRIBUTES,
                }],
                color_format,
                cull_mode: None,
            },
        );

        let positions: Vec<[f32; 3]> =
            stars.points().iter().map(Vec3::to_array).collect();
        let instance_buffer = (!positions.is_empty()).then(|| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Star Instance Buffer"),
                contents: bytemuck::cast_slice(&positions),
                usage: wgpu::BufferUsages::VERTEX,
            })
        });

        Self {
            pipeline,
            instance_buffer,
            count: positions.len() as u32,
            uniform,
            options: options.clone(),
        }
    }

    /// Upload the cloud pose and camera axes.
    pub(crate) fn update(
        &self,
        queue: &wgpu::Queue,
        stars: &StarField,
        camera: &Camera,
    ) {
        self.uniform
            .write(queue, &StarUniform::new(stars, camera, &self.options));
    }

    /// Draw every star. The camera must already be bound at group 0.
    pub(crate) fn draw(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        let Some(ref instances) = self.instance_buffer else {
            return;
        };
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(1, &self.uniform.bind_group, &[]);
        render_pass.set_vertex_buffer(0, instances.slice(..));
        render_pass.draw(0..6, 0..self.count);
    }
}
