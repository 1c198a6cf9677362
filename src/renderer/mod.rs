//! wgpu passes for the star field and the model.
//!
//! One render pass per frame clears to the background, draws the star
//! sprites and then the lit model, all against a shared depth target.

pub mod lighting;
pub(crate) mod model_pass;
pub(crate) mod pipeline_util;
pub(crate) mod star_pass;

pub use lighting::LightingUniform;
pub use model_pass::ModelUniform;
pub use star_pass::StarUniform;

use self::model_pass::ModelPass;
use self::star_pass::StarPass;
use crate::assets::ModelMesh;
use crate::camera::core::CameraUniform;
use crate::engine::state::ViewerState;
use crate::gpu::pipeline_helpers::{DepthTarget, UniformBinding};
use crate::gpu::render_context::RenderContext;
use crate::options::Options;

/// GPU resources for drawing a [`ViewerState`].
pub struct SceneRenderer {
    camera_uniform: CameraUniform,
    camera: UniformBinding,
    lighting: UniformBinding,
    depth: DepthTarget,
    clear_color: wgpu::Color,
    stars: StarPass,
    /// `None` until the model mesh has been uploaded.
    model: Option<ModelPass>,
}

impl SceneRenderer {
    /// Create the camera and light uniforms, the depth target and the star
    /// pass for `state`.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        options: &Options,
        state: &ViewerState,
    ) -> Self {
        let device = &context.device;
        let (width, height) = context.size();

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update(state.camera(), state.viewport());
        let camera = UniformBinding::new(
            device,
            "Camera",
            &camera_uniform,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
        );
        let lights = UniformBinding::new(
            device,
            "Lighting",
            &LightingUniform::from_options(&options.lighting),
            wgpu::ShaderStages::FRAGMENT,
        );
        let stars = StarPass::new(
            device,
            context.format(),
            &camera.layout,
            state.stars(),
            &options.stars,
        );

        Self {
            camera_uniform,
            camera,
            lighting: lights,
            depth: DepthTarget::new(device, width, height),
            clear_color: lighting::clear_color(&options.lighting),
            stars,
            model: None,
        }
    }

    /// Upload the model mesh and build its pipeline.
    pub fn upload_model(&mut self, context: &RenderContext, mesh: &ModelMesh) {
        self.model = Some(ModelPass::new(
            &context.device,
            context.format(),
            &self.camera.layout,
            &self.lighting.layout,
            mesh,
        ));
    }

    /// Recreate the depth target for a new surface size. Zero-sized
    /// dimensions are ignored.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || self.depth.size() == (width, height) {
            return;
        }
        self.depth = DepthTarget::new(device, width, height);
    }

    /// Upload this frame's uniforms and draw into the next surface
    /// texture. Nothing is drawn when the context skips the frame.
    ///
    /// # Errors
    ///
    /// Returns the [`wgpu::SurfaceError`] the surface could not recover
    /// from.
    pub fn render(
        &mut self,
        context: &mut RenderContext,
        state: &ViewerState,
    ) -> Result<(), wgpu::SurfaceError> {
        self.camera_uniform.update(state.camera(), state.viewport());
        self.camera.write(&context.queue, &self.camera_uniform);
        self.stars.update(&context.queue, state.stars(), state.camera());
        if let (Some(pass), Some(model)) = (&self.model, state.model()) {
            pass.update(&context.queue, model);
        }

        let Some(frame) = context.begin_frame()? else {
            return Ok(());
        };
        let mut encoder = context.device.create_command_encoder(
            &wgpu::CommandEncoderDescriptor {
                label: Some("Scene Encoder"),
            },
        );
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &frame.view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(self.clear_color),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            render_pass.set_bind_group(0, &self.camera.bind_group, &[]);
            self.stars.draw(&mut render_pass);

            if let (Some(pass), Some(_)) = (&self.model, state.model()) {
                render_pass.set_bind_group(1, &self.lighting.bind_group, &[]);
                pass.draw(&mut render_pass);
            }
        }
        let _ = context.queue.submit(std::iter::once(encoder.finish()));
        frame.texture.present();
        Ok(())
    }
}
