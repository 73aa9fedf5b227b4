use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Model source, background and frame pacing.
pub struct SceneOptions {
    /// Model file loaded at startup when none is given on the command line.
    #[schemars(skip)]
    pub model_path: String,
    /// sRGB background color as `0xRRGGBB`.
    #[schemars(skip)]
    pub background: u32,
    /// Frame cap; 0 leaves pacing to the display's vsync.
    #[schemars(title = "Max FPS", range(min = 0, max = 300))]
    pub max_fps: u32,
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            model_path: "assets/models/rooms_2.glb".into(),
            background: 0x00d6_d1c1,
            max_fps: 0,
        }
    }
}

impl SceneOptions {
    /// Background as a linear-space clear color.
    #[must_use]
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b] = crate::util::color::hex_to_linear(self.background);
        wgpu::Color {
            r: f64::from(r),
            g: f64::from(g),
            b: f64::from(b),
            a: 1.0,
        }
    }
}
