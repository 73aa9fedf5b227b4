//! Shared utilities: sRGB color conversion and frame timing.

/// sRGB hex color conversion.
pub mod color;
/// Frame pacing and FPS smoothing.
pub mod frame_timing;
