//! Standalone room viewer window backed by winit.
//!
//! ```no_run
//! # use roomview::Viewer;
//! Viewer::builder()
//!     .with_path("assets/models/rooms_2.glb")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    asset::ModelSource, error::RoomviewError, input::key_binding_name,
    options::Options, InputEvent, RoomRenderEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    source: Option<ModelSource>,
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            source: None,
            options: None,
            title: "Room Viewer".into(),
        }
    }

    /// Set the model file path (`.glb` or `.gltf`). Without one, the path
    /// from [`SceneOptions::model_path`](crate::options::SceneOptions) is
    /// used.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.source = Some(ModelSource::Path(path.into().into()));
        self
    }

    /// Load the model from bytes already in memory.
    #[must_use]
    pub fn with_bytes(mut self, label: impl Into<String>, data: Vec<u8>) -> Self {
        self.source = Some(ModelSource::Bytes {
            label: label.into(),
            data,
        });
        self
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let options = self.options.unwrap_or_default();
        let source = self.source.unwrap_or_else(|| {
            ModelSource::from(options.scene.model_path.as_str())
        });
        Viewer {
            source,
            options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays a room model.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    source: ModelSource,
    options: Options,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`RoomviewError::Viewer`] if the event loop cannot be
    /// created or exits with an error.
    pub fn run(self) -> Result<(), RoomviewError> {
        let event_loop = EventLoop::new()
            .map_err(|e| RoomviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            source: Some(self.source),
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| RoomviewError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<RoomRenderEngine>,
    source: Option<ModelSource>,
    options: Options,
    title: String,
}

/// The wgpu surface covers the whole window. A minimised window reports
/// zero, which the engine ignores.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width, inner.height)
}

impl ViewerApp {
    fn redraw(&mut self) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        engine.update();
        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                if let Some(w) = &self.window {
                    let (vp_w, vp_h) = viewport_size(w.inner_size());
                    engine.resize(vp_w, vp_h);
                }
            }
            Err(e) => log::error!("render error: {e:?}"),
        }

        // Keep the loop running so finished loads and input show up.
        if let Some(w) = &self.window {
            w.request_redraw();
        }
    }

    fn forward(&mut self, event: InputEvent) {
        if let Some(engine) = &mut self.engine {
            let _ = engine.handle_input(event);
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 800));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = viewport_size(window.inner_size());
        let engine_result = pollster::block_on(RoomRenderEngine::new(
            window.clone(),
            size,
            self.options.clone(),
        ));
        let mut engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Some(source) = self.source.take() {
            if let Err(e) = engine.load_model(source) {
                log::error!("Failed to start model load: {e}");
            }
        }

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                if let Some(engine) = &mut self.engine {
                    engine.resize(vp_w, vp_h);
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let inner = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(engine), Some(inner)) = (&mut self.engine, inner) {
                    let (vp_w, vp_h) = viewport_size(inner);
                    engine.resize(vp_w, vp_h);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(key) = key_binding_name(&event) else {
                    return;
                };
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_key_press(&key);
                }
            }
            other => {
                if let Some(input) = InputEvent::from_window_event(&other) {
                    self.forward(input);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_options_model_path() {
        let mut options = Options::default();
        options.scene.model_path = "rooms/studio.glb".into();
        let viewer = Viewer::builder().with_options(options).build();
        assert_eq!(viewer.source, ModelSource::from("rooms/studio.glb"));
        assert_eq!(viewer.title, "Room Viewer");
    }

    #[test]
    fn builder_takes_in_memory_model() {
        let viewer = Viewer::builder()
            .with_path("ignored.glb")
            .with_bytes("upload", vec![1, 2, 3])
            .with_title("Studio")
            .build();
        assert_eq!(
            viewer.source,
            ModelSource::Bytes {
                label: "upload".into(),
                data: vec![1, 2, 3],
            }
        );
        assert_eq!(viewer.title, "Studio");
    }

    #[test]
    fn minimised_window_reports_zero_viewport() {
        assert_eq!(
            viewport_size(winit::dpi::PhysicalSize::new(0, 0)),
            (0, 0)
        );
        assert_eq!(
            viewport_size(winit::dpi::PhysicalSize::new(1280, 800)),
            (1280, 800)
        );
    }
}
