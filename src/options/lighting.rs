use std::f32::consts::PI;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Uniform light applied equally to every surface.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Ambient Light", inline)]
#[serde(default)]
pub struct AmbientLight {
    /// sRGB color as `0xRRGGBB`.
    #[schemars(skip)]
    pub color: u32,
    /// Intensity multiplier.
    #[schemars(title = "Intensity", range(min = 0.0, max = 3.0))]
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: 0x00ff_f4e6,
            intensity: 0.8,
        }
    }
}

/// Sky/ground gradient light. Surfaces facing the light position get the
/// sky color, surfaces facing away get the ground color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Hemisphere Light", inline)]
#[serde(default)]
pub struct HemisphereLight {
    /// sRGB sky color as `0xRRGGBB`.
    #[schemars(skip)]
    pub sky_color: u32,
    /// sRGB ground color as `0xRRGGBB`.
    #[schemars(skip)]
    pub ground_color: u32,
    /// Intensity multiplier.
    #[schemars(title = "Intensity", range(min = 0.0, max = 3.0))]
    pub intensity: f32,
    /// Position; only its direction from the origin matters.
    #[schemars(skip)]
    pub position: [f32; 3],
}

impl Default for HemisphereLight {
    fn default() -> Self {
        Self {
            sky_color: 0x00aa_aaaa,
            ground_color: 0x0044_4444,
            intensity: 0.8,
            position: [0.0, 20.0, 0.0],
        }
    }
}

/// Omnidirectional light with distance falloff.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Point Light", inline)]
#[serde(default)]
pub struct PointLight {
    /// sRGB color as `0xRRGGBB`.
    pub color: u32,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Cutoff distance; 0 means unlimited.
    pub range: f32,
    /// Distance falloff exponent.
    pub decay: f32,
    /// World-space position.
    pub position: [f32; 3],
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            color: 0x00ff_ffff,
            intensity: 1.0,
            range: 0.0,
            decay: 2.0,
            position: [0.0; 3],
        }
    }
}

/// Cone light aimed at a target point.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Spot Light", inline)]
#[serde(default)]
pub struct SpotLight {
    /// sRGB color as `0xRRGGBB`.
    pub color: u32,
    /// Intensity multiplier.
    pub intensity: f32,
    /// Cutoff distance; 0 means unlimited.
    pub range: f32,
    /// Distance falloff exponent.
    pub decay: f32,
    /// World-space position.
    pub position: [f32; 3],
    /// World-space point the cone is aimed at.
    pub target: [f32; 3],
    /// Cone half-angle in radians.
    pub angle: f32,
    /// Fraction of the cone over which the edge fades out (0 = hard edge).
    pub penumbra: f32,
}

impl Default for SpotLight {
    fn default() -> Self {
        Self {
            color: 0x00ff_ffff,
            intensity: 1.0,
            range: 0.0,
            decay: 2.0,
            position: [0.0, 1.0, 0.0],
            target: [0.0; 3],
            angle: PI / 3.0,
            penumbra: 0.0,
        }
    }
}

/// The scene's light rig.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Lighting", inline)]
#[serde(default)]
pub struct LightingOptions {
    /// Ambient fill.
    pub ambient: AmbientLight,
    /// Sky/ground gradient.
    pub hemisphere: HemisphereLight,
    /// Point lights (at most four are used).
    #[schemars(skip)]
    pub point_lights: Vec<PointLight>,
    /// Spot lights (at most four are used).
    #[schemars(skip)]
    pub spot_lights: Vec<SpotLight>,
}

impl Default for LightingOptions {
    fn default() -> Self {
        Self {
            ambient: AmbientLight::default(),
            hemisphere: HemisphereLight::default(),
            // Cool accent from the upper left
            point_lights: vec![PointLight {
                color: 0x0066_99ff,
                intensity: 0.3,
                range: 80.0,
                position: [-5.0, 5.0, 5.0],
                ..PointLight::default()
            }],
            spot_lights: vec![
                // Warm key light
                SpotLight {
                    color: 0x00ff_b066,
                    intensity: 1.0,
                    range: 30.0,
                    position: [5.0, 10.0, 5.0],
                    angle: PI / 7.0,
                    penumbra: 0.7,
                    ..SpotLight::default()
                },
                // Softer fill for the left side of the room
                SpotLight {
                    color: 0x00ff_dca3,
                    intensity: 0.45,
                    range: 25.0,
                    position: [-7.0, 5.0, 3.0],
                    angle: PI / 7.0,
                    penumbra: 0.8,
                    ..SpotLight::default()
                },
            ],
        }
    }
}
