//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, camera and lighting
//! uniforms, the depth attachment, and shader composition.

/// Camera uniform buffer and bind group.
pub mod camera_binding;
/// Light rig uniform packing and bind group management.
pub mod lighting;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth attachment texture.
pub mod texture;
