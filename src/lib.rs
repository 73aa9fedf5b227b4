// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! GPU-accelerated room model viewer built on wgpu.
//!
//! Roomview loads a glTF/GLB room model on a background thread, renders it
//! under a configurable light rig, and automatically frames the camera so
//! the whole model is in view once it arrives.
//!
//! # Key entry points
//!
//! - [`engine::RoomRenderEngine`] - the main rendering engine
//! - [`camera::framing`] - bounding volumes and the auto-framing computation
//! - [`asset`] - glTF import and background loading
//! - [`options::Options`] - runtime configuration (scene, camera, lighting,
//!   key bindings)
//! - `Viewer` - a standalone winit window (`viewer` feature)
//!
//! # Architecture
//!
//! A model load runs on its own thread and delivers exactly one outcome
//! over a channel. The engine polls it each frame; on success it uploads
//! the meshes, computes the model's world-space bounds, and applies the
//! resulting [`camera::CameraFrame`] to the orbit controller. Rendering is a
//! single depth-tested forward pass.

pub mod asset;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod renderer;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{RoomRenderEngine, ViewerCommand};
pub use error::RoomviewError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
