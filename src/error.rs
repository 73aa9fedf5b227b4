//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the roomview crate.
#[derive(Debug)]
pub enum RoomviewError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// The glTF importer rejected the model file.
    Gltf(gltf::Error),
    /// The model was imported but could not be turned into render data.
    ModelLoad(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Failed to spawn a background thread.
    ThreadSpawn(std::io::Error),
    /// A WGSL module failed to register or compose.
    Shader(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for RoomviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Gltf(e) => write!(f, "glTF import error: {e}"),
            Self::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ThreadSpawn(e) => {
                write!(f, "failed to spawn thread: {e}")
            }
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for RoomviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Gltf(e) => Some(e),
            Self::Io(e) | Self::ThreadSpawn(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for RoomviewError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<gltf::Error> for RoomviewError {
    fn from(e: gltf::Error) -> Self {
        Self::Gltf(e)
    }
}

impl From<std::io::Error> for RoomviewError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
