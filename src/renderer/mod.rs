//! Rendering subsystems.
//!
//! A single forward pass draws the loaded model with per-vertex color and
//! the configured light rig.

pub mod model;
pub(crate) mod pipeline_util;
