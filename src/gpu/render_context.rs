//! wgpu device, queue and presentation target.
//!
//! A context either presents to a window surface (the viewer) or renders
//! into caller-owned textures (embedding, see [`RenderContext::from_device`]).

use std::fmt;

/// Why a [`RenderContext`] could not be created.
#[derive(Debug)]
pub enum RenderContextError {
    /// The window handle could not back a wgpu surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the window.
    AdapterRequest(wgpu::RequestAdapterError),
    /// The adapter refused the device descriptor.
    DeviceRequest(wgpu::RequestDeviceError),
    /// The adapter has no configuration for this surface.
    UnsupportedSurface,
}

impl fmt::Display for RenderContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceCreation(e) => write!(f, "cannot create window surface: {e}"),
            Self::AdapterRequest(e) => write!(f, "no usable GPU adapter: {e}"),
            Self::DeviceRequest(e) => write!(f, "GPU device unavailable: {e}"),
            Self::UnsupportedSurface => {
                f.write_str("window surface is not supported by the GPU adapter")
            }
        }
    }
}

impl std::error::Error for RenderContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::SurfaceCreation(e) => Some(e),
            Self::AdapterRequest(e) => Some(e),
            Self::DeviceRequest(e) => Some(e),
            Self::UnsupportedSurface => None,
        }
    }
}

/// wgpu rejects zero extents; a minimised window reports them.
fn nonzero_size((width, height): (u32, u32)) -> (u32, u32) {
    (width.max(1), height.max(1))
}

/// Configuration used when there is no surface. Only the format and size
/// are read in that mode.
fn offscreen_config(
    format: wgpu::TextureFormat,
    size: (u32, u32),
) -> wgpu::SurfaceConfiguration {
    let (width, height) = nonzero_size(size);
    wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width,
        height,
        present_mode: wgpu::PresentMode::Fifo,
        desired_maximum_frame_latency: 2,
        alpha_mode: wgpu::CompositeAlphaMode::Auto,
        view_formats: Vec::new(),
    }
}

async fn request_device(
    adapter: &wgpu::Adapter,
) -> Result<(wgpu::Device, wgpu::Queue), RenderContextError> {
    // The room pass needs nothing beyond the WebGPU baseline.
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: Some("roomview device"),
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            ..Default::default()
        })
        .await
        .map_err(RenderContextError::DeviceRequest)
}

/// GPU handles plus the current output configuration.
pub struct RenderContext {
    /// Logical device.
    pub device: wgpu::Device,
    /// Submission queue.
    pub queue: wgpu::Queue,
    /// Window surface; `None` when rendering into caller-owned textures.
    pub surface: Option<wgpu::Surface<'static>>,
    /// Output format and size. Also applied to `surface` when present.
    pub config: wgpu::SurfaceConfiguration,
}

impl RenderContext {
    /// Open a device that presents to `window`. Presentation is
    /// vsync-paced (`Fifo`).
    ///
    /// # Errors
    ///
    /// Returns [`RenderContextError`] if no surface, adapter or device can
    /// be obtained, or the adapter cannot configure the surface.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        initial_size: (u32, u32),
    ) -> Result<Self, RenderContextError> {
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(RenderContextError::SurfaceCreation)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                ..Default::default()
            })
            .await
            .map_err(RenderContextError::AdapterRequest)?;
        let info = adapter.get_info();
        log::info!("GPU adapter: {} ({:?})", info.name, info.backend);

        let (device, queue) = request_device(&adapter).await?;

        let (width, height) = nonzero_size(initial_size);
        let mut config = surface
            .get_default_config(&adapter, width, height)
            .ok_or(RenderContextError::UnsupportedSurface)?;
        config.present_mode = wgpu::PresentMode::Fifo;
        surface.configure(&device, &config);
        log::debug!("surface configured as {:?} {width}x{height}", config.format);

        Ok(Self {
            device,
            queue,
            surface: Some(surface),
            config,
        })
    }

    /// Wrap a device owned by the host application. Frames are drawn with
    /// [`RoomRenderEngine::render_to_view`](crate::RoomRenderEngine::render_to_view)
    /// into views of `format` and the given size.
    #[must_use]
    pub fn from_device(
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            device,
            queue,
            surface: None,
            config: offscreen_config(format, (width, height)),
        }
    }

    /// Color format of the output.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    /// Output size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Track a new output size, reconfiguring the surface if there is one.
    /// Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        if let Some(surface) = &self.surface {
            surface.configure(&self.device, &self.config);
        }
    }

    /// Acquire the next surface texture.
    ///
    /// # Errors
    ///
    /// Returns the surface error from wgpu, or [`wgpu::SurfaceError::Lost`]
    /// when the context has no surface.
    pub fn get_next_frame(
        &self,
    ) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        let Some(surface) = &self.surface else {
            return Err(wgpu::SurfaceError::Lost);
        };
        surface.get_current_texture()
    }

    /// Start recording a frame.
    pub fn create_encoder(&self) -> wgpu::CommandEncoder {
        self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Room Frame"),
            })
    }

    /// Finish `encoder` and queue it.
    pub fn submit(&self, encoder: wgpu::CommandEncoder) {
        let _ = self.queue.submit([encoder.finish()]);
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn offscreen_config_keeps_format_and_size() {
        let config =
            offscreen_config(wgpu::TextureFormat::Rgba8UnormSrgb, (640, 480));
        assert_eq!(config.format, wgpu::TextureFormat::Rgba8UnormSrgb);
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.present_mode, wgpu::PresentMode::Fifo);
        assert!(config.usage.contains(wgpu::TextureUsages::RENDER_ATTACHMENT));
    }

    #[test]
    fn offscreen_config_never_has_zero_extent() {
        let config = offscreen_config(wgpu::TextureFormat::Bgra8Unorm, (0, 0));
        assert_eq!((config.width, config.height), (1, 1));
        assert_eq!(nonzero_size((0, 720)), (1, 720));
    }

    #[test]
    fn unsupported_surface_has_no_source() {
        let err = RenderContextError::UnsupportedSurface;
        assert!(err.source().is_none());
        assert!(err.to_string().contains("not supported"));
    }
}
