//! Engine construction.

use super::RoomRenderEngine;
use crate::camera::controller::OrbitController;
use crate::error::RoomviewError;
use crate::gpu::camera_binding::CameraBinding;
use crate::gpu::lighting::Lighting;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::DepthTexture;
use crate::input::InputProcessor;
use crate::options::Options;
use crate::renderer::model::ModelRenderer;
use crate::util::frame_timing::FrameTiming;

impl RoomRenderEngine {
    /// Create an engine presenting to `window`.
    ///
    /// # Errors
    ///
    /// Returns [`RoomviewError::Gpu`] if no usable adapter/device/surface is
    /// available, or [`RoomviewError::Shader`] if a pipeline shader fails
    /// to compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, RoomviewError> {
        let context = RenderContext::new(window, size).await?;
        Self::new_from_context(context, options)
    }

    /// Create an engine on an existing render context (texture-only or
    /// embedded rendering).
    ///
    /// # Errors
    ///
    /// Returns [`RoomviewError::Shader`] if a pipeline shader fails to
    /// compose.
    pub fn new_from_context(
        context: RenderContext,
        options: Options,
    ) -> Result<Self, RoomviewError> {
        let size = context.size();
        let camera_controller = OrbitController::new(&options.camera, size);
        let camera_binding =
            CameraBinding::new(&context, &camera_controller.camera);
        let lighting = Lighting::new(&context, &options.lighting);
        let depth = DepthTexture::new(&context.device, size.0, size.1);

        let mut shader_composer = ShaderComposer::new()?;
        let model_renderer = ModelRenderer::new(
            &context,
            &camera_binding.layout,
            &lighting.layout,
            &mut shader_composer,
        )?;

        let input = InputProcessor::with_key_bindings(options.keybindings.clone());
        let frame_timing = FrameTiming::new(options.scene.max_fps);

        log::info!(
            "engine ready at {}x{} ({:?})",
            size.0,
            size.1,
            context.format()
        );

        Ok(Self {
            context,
            camera_controller,
            camera_binding,
            lighting,
            depth,
            model_renderer,
            options,
            input,
            pending: None,
            model_bounds: None,
            last_frame: None,
            frame_timing,
        })
    }
}
