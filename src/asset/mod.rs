//! Model assets: glTF import, render-ready mesh data, and background
//! loading.

/// glTF / GLB import into world-space meshes.
pub mod loader;
/// Render-ready mesh data and bounds.
pub mod model;
/// Background loading with a single outcome.
pub mod pending;

pub use loader::{load_model, load_model_from_slice};
pub use model::{LoadedModel, MeshData, ModelVertex};
pub use pending::{LoadOutcome, ModelSource, PendingLoad};
