//! The rendering engine: owns the GPU resources, the camera and the
//! current model, and ties background loading to auto-framing.

mod command;
mod construction;
mod input;
mod loading;
mod options;

pub use command::ViewerCommand;
pub use loading::frame_camera;

use crate::asset::PendingLoad;
use crate::camera::controller::OrbitController;
use crate::camera::framing::{BoundingVolume, CameraFrame};
use crate::gpu::camera_binding::CameraBinding;
use crate::gpu::lighting::Lighting;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTexture;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::model::{DrawBindGroups, ModelRenderer};
use crate::util::frame_timing::FrameTiming;

/// The room rendering engine.
///
/// Owns the GPU context, the orbit camera, the light rig and the model
/// renderer. A model is loaded on a background thread; once it arrives the
/// camera is auto-framed around it.
///
/// Call [`update`](Self::update) once per frame before
/// [`render`](Self::render).
pub struct RoomRenderEngine {
    /// Core wgpu resources.
    pub context: RenderContext,
    /// Orbit camera driven by input and auto-framing.
    pub camera_controller: OrbitController,
    camera_binding: CameraBinding,
    lighting: Lighting,
    depth: DepthTexture,
    model_renderer: ModelRenderer,
    options: Options,
    input: InputProcessor,
    pending: Option<PendingLoad>,
    model_bounds: Option<BoundingVolume>,
    last_frame: Option<CameraFrame>,
    frame_timing: FrameTiming,
}

impl RoomRenderEngine {
    /// Per-frame bookkeeping: picks up a finished model load.
    pub fn update(&mut self) {
        self.poll_pending_load();
    }

    /// Whether a model load is still in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// World-space bounds of the displayed model, if one has loaded.
    #[must_use]
    pub fn model_bounds(&self) -> Option<BoundingVolume> {
        self.model_bounds
    }

    /// The frame most recently produced by auto-framing.
    #[must_use]
    pub fn last_frame(&self) -> Option<CameraFrame> {
        self.last_frame
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Render one frame to the window surface and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot
    /// be acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        if !self.frame_timing.should_render() {
            return Ok(());
        }

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.render_to_view(&view);
        frame.present();

        self.frame_timing.end_frame();
        Ok(())
    }

    /// Render one frame into an arbitrary color view of the surface format
    /// and size (texture-only mode).
    pub fn render_to_view(&mut self, view: &wgpu::TextureView) {
        self.camera_binding
            .update_gpu(&self.context.queue, &self.camera_controller.camera);

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Room Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(
                                    self.options.scene.clear_color(),
                                ),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
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
                    ..Default::default()
                });

            let bind_groups = DrawBindGroups {
                camera: &self.camera_binding.bind_group,
                lighting: &self.lighting.bind_group,
            };
            self.model_renderer.draw(&mut pass, &bind_groups);
        }
        self.context.submit(encoder);
    }

    /// Reconfigure the surface and depth buffer for a new output size and
    /// update the camera aspect ratio. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera_controller.resize(width, height);
        if self.depth.size() != (width, height) {
            self.depth = DepthTexture::new(&self.context.device, width, height);
        }
    }
}
