//! Centralized viewer options with TOML preset support.
//!
//! Scene source and background, camera projection and controls, the light
//! rig, and key bindings are consolidated here. Options serialize to/from
//! TOML so a room setup can be kept next to its model file.

mod camera;
mod lighting;
mod scene;

use std::path::Path;

pub use camera::CameraOptions;
pub use lighting::{
    AmbientLight, HemisphereLight, LightingOptions, PointLight, SpotLight,
};
pub use scene::SceneOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::RoomviewError;
use crate::input::KeyBindings;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Model source, background and frame pacing.
    pub scene: SceneOptions,
    /// Camera projection and control parameters.
    pub camera: CameraOptions,
    /// Light rig.
    pub lighting: LightingOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeyBindings,
}

impl Options {
    /// JSON Schema for the tunable scalar options: each carries a `title`
    /// and a `minimum`/`maximum` range, so an editor can validate a preset
    /// or build controls for it. Positions, colors, clip planes and key
    /// bindings are left out and only come from TOML.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, RoomviewError> {
        let content =
            std::fs::read_to_string(path).map_err(RoomviewError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, RoomviewError> {
        toml::from_str(content)
            .map_err(|e| RoomviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), RoomviewError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| RoomviewError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(RoomviewError::Io)?;
        }
        std::fs::write(path, content).map_err(RoomviewError::Io)
    }
}
