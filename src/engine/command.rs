//! The engine's interactive vocabulary.
//!
//! Every user-facing operation, whether it comes from a key press, a mouse
//! gesture or a programmatic call, is a [`ViewerCommand`] passed to
//! [`RoomRenderEngine::execute`](super::RoomRenderEngine::execute).

use glam::Vec2;

/// A discrete or parameterized operation the engine can perform.
///
/// ```ignore
/// engine.execute(ViewerCommand::Zoom { delta: 1.0 });
/// engine.execute(ViewerCommand::RecenterCamera);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    /// Re-apply the auto-framing computed for the loaded model.
    RecenterCamera,
    /// Orbit the camera by a mouse delta in pixels.
    RotateCamera {
        /// Mouse movement since the last event.
        delta: Vec2,
    },
    /// Pan the camera by a mouse delta in pixels.
    PanCamera {
        /// Mouse movement since the last event.
        delta: Vec2,
    },
    /// Dolly toward (positive) or away from the orbit target.
    Zoom {
        /// Scroll amount.
        delta: f32,
    },
}
