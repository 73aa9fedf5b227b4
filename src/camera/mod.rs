//! Camera system for 3D scene viewing.
//!
//! Provides auto-framing of loaded models, an orbit controller with
//! rotation, panning and zoom, and the camera/uniform types shared with the
//! GPU.

/// Orbit controller managing rotation, pan and zoom.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Bounding volumes and the auto-framing computation.
pub mod framing;

pub use controller::OrbitController;
pub use framing::{
    apply_frame, compute_framing, BoundingVolume, CameraFrame, FramingTarget,
};
