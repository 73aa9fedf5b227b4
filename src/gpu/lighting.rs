use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::gpu::render_context::RenderContext;
use crate::options::{LightingOptions, PointLight, SpotLight};
use crate::util::color::hex_to_linear;

/// Maximum number of point lights the shader evaluates.
pub const MAX_POINT_LIGHTS: usize = 4;
/// Maximum number of spot lights the shader evaluates.
pub const MAX_SPOT_LIGHTS: usize = 4;

/// Point light as laid out in WGSL (32 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuPointLight {
    /// World-space position.
    pub position: [f32; 3],
    /// Cutoff distance; 0 means unlimited.
    pub range: f32,
    /// Linear color pre-multiplied by intensity.
    pub color: [f32; 3],
    /// Distance falloff exponent.
    pub decay: f32,
}

/// Spot light as laid out in WGSL (64 bytes).
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuSpotLight {
    /// World-space position.
    pub position: [f32; 3],
    /// Cutoff distance; 0 means unlimited.
    pub range: f32,
    /// Linear color pre-multiplied by intensity.
    pub color: [f32; 3],
    /// Distance falloff exponent.
    pub decay: f32,
    /// Unit vector from the light toward its target.
    pub direction: [f32; 3],
    /// Cosine of the cone half-angle.
    pub cos_outer: f32,
    /// Cosine of the angle where the penumbra fade starts.
    pub cos_inner: f32,
    /// Padding to 64 bytes.
    pub _pad: [f32; 3],
}

/// Light rig uniform shared by every lit shader.
/// NOTE: Must match the WGSL `LightingUniform` layout exactly (448 bytes)
///
///   ambient: vec3<f32>          (offset 0)
///   point_count: u32            (offset 12)
///   sky_color: vec3<f32>        (offset 16)
///   spot_count: u32             (offset 28)
///   ground_color: vec3<f32>     (offset 32)
///   hemisphere_dir: vec3<f32>   (offset 48)
///   points: array<PointLight,4> (offset 64, stride 32)
///   spots: array<SpotLight,4>   (offset 192, stride 64)
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightingUniform {
    /// Ambient color times intensity.
    pub ambient: [f32; 3],
    /// Number of valid entries in `points`.
    pub point_count: u32,
    /// Hemisphere sky color times intensity.
    pub sky_color: [f32; 3],
    /// Number of valid entries in `spots`.
    pub spot_count: u32,
    /// Hemisphere ground color times intensity.
    pub ground_color: [f32; 3],
    /// Padding.
    pub _pad0: f32,
    /// Unit direction toward the hemisphere light.
    pub hemisphere_dir: [f32; 3],
    /// Padding.
    pub _pad1: f32,
    /// Point lights; slots past `point_count` are zeroed.
    pub points: [GpuPointLight; MAX_POINT_LIGHTS],
    /// Spot lights; slots past `spot_count` are zeroed.
    pub spots: [GpuSpotLight; MAX_SPOT_LIGHTS],
}

impl Default for LightingUniform {
    fn default() -> Self {
        Self::from_options(&LightingOptions::default())
    }
}

fn scaled_color(hex: u32, intensity: f32) -> [f32; 3] {
    hex_to_linear(hex).map(|c| c * intensity)
}

impl GpuPointLight {
    fn from_light(light: &PointLight) -> Self {
        Self {
            position: light.position,
            range: light.range,
            color: scaled_color(light.color, light.intensity),
            decay: light.decay,
        }
    }
}

impl GpuSpotLight {
    fn from_light(light: &SpotLight) -> Self {
        let position = Vec3::from(light.position);
        let direction =
            (Vec3::from(light.target) - position).normalize_or(Vec3::NEG_Y);
        let penumbra = light.penumbra.clamp(0.0, 1.0);
        Self {
            position: light.position,
            range: light.range,
            color: scaled_color(light.color, light.intensity),
            decay: light.decay,
            direction: direction.to_array(),
            cos_outer: light.angle.cos(),
            cos_inner: (light.angle * (1.0 - penumbra)).cos(),
            _pad: [0.0; 3],
        }
    }
}

impl LightingUniform {
    /// Pack a light rig for upload. Lights beyond the shader limits are
    /// dropped with a warning.
    #[must_use]
    pub fn from_options(options: &LightingOptions) -> Self {
        if options.point_lights.len() > MAX_POINT_LIGHTS {
            log::warn!(
                "{} point lights configured, only the first {MAX_POINT_LIGHTS} are used",
                options.point_lights.len()
            );
        }
        if options.spot_lights.len() > MAX_SPOT_LIGHTS {
            log::warn!(
                "{} spot lights configured, only the first {MAX_SPOT_LIGHTS} are used",
                options.spot_lights.len()
            );
        }

        let mut points = [GpuPointLight::default(); MAX_POINT_LIGHTS];
        for (slot, light) in points.iter_mut().zip(&options.point_lights) {
            *slot = GpuPointLight::from_light(light);
        }
        let mut spots = [GpuSpotLight::default(); MAX_SPOT_LIGHTS];
        for (slot, light) in spots.iter_mut().zip(&options.spot_lights) {
            *slot = GpuSpotLight::from_light(light);
        }

        let hemi = &options.hemisphere;
        Self {
            ambient: scaled_color(options.ambient.color, options.ambient.intensity),
            point_count: options.point_lights.len().min(MAX_POINT_LIGHTS) as u32,
            sky_color: scaled_color(hemi.sky_color, hemi.intensity),
            spot_count: options.spot_lights.len().min(MAX_SPOT_LIGHTS) as u32,
            ground_color: scaled_color(hemi.ground_color, hemi.intensity),
            _pad0: 0.0,
            hemisphere_dir: Vec3::from(hemi.position)
                .normalize_or(Vec3::Y)
                .to_array(),
            _pad1: 0.0,
            points,
            spots,
        }
    }
}

/// GPU-side light rig: uniform buffer and its bind group (group 1).
pub struct Lighting {
    /// CPU copy of the uploaded uniform.
    pub uniform: LightingUniform,
    /// Uniform buffer.
    pub buffer: wgpu::Buffer,
    /// Bind group layout for pipelines that read the light rig.
    pub layout: wgpu::BindGroupLayout,
    /// Bind group for `layout`.
    pub bind_group: wgpu::BindGroup,
}

impl Lighting {
    /// Pack `options` and create the buffer and bind group.
    pub fn new(context: &RenderContext, options: &LightingOptions) -> Self {
        let uniform = LightingUniform::from_options(options);

        let buffer = context
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let layout = context
            .device
            .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Lighting Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            });

        let bind_group = context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Lighting Bind Group"),
            });

        Self {
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Repack from options and upload.
    pub fn apply_options(&mut self, queue: &wgpu::Queue, options: &LightingOptions) {
        self.uniform = LightingUniform::from_options(options);
        self.update_gpu(queue);
    }

    /// Upload the current uniform.
    pub fn update_gpu(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn layout_matches_wgsl() {
        assert_eq!(size_of::<GpuPointLight>(), 32);
        assert_eq!(size_of::<GpuSpotLight>(), 64);
        assert_eq!(size_of::<LightingUniform>(), 448);
        assert_eq!(std::mem::offset_of!(LightingUniform, points), 64);
        assert_eq!(std::mem::offset_of!(LightingUniform, spots), 192);
    }

    #[test]
    fn packs_default_rig() {
        let u = LightingUniform::default();
        assert_eq!(u.point_count, 1);
        assert_eq!(u.spot_count, 2);
        assert_eq!(u.hemisphere_dir, [0.0, 1.0, 0.0]);
        assert_eq!(u.points[0].range, 80.0);
        assert_eq!(u.points[0].decay, 2.0);
        // Unused slots stay zeroed
        assert_eq!(u.points[1], GpuPointLight::default());
        assert_eq!(u.spots[2], GpuSpotLight::default());
    }

    #[test]
    fn colors_are_linear_and_scaled() {
        let u = LightingUniform::default();
        // 0x6699ff at 0.3: blue channel is fully saturated
        assert_relative_eq!(u.points[0].color[2], 0.3, epsilon = 1e-6);
        // 0xaaaaaa is well below its sRGB value once linearized
        let sky = u.sky_color[0] / 0.8;
        assert!(sky < 170.0 / 255.0);
        assert_relative_eq!(sky, 0.401_978, epsilon = 1e-4);
    }

    #[test]
    fn spot_cone_and_direction() {
        let u = LightingUniform::default();
        let warm = u.spots[0];
        assert_relative_eq!(warm.cos_outer, (PI / 7.0).cos(), epsilon = 1e-6);
        assert_relative_eq!(
            warm.cos_inner,
            (PI / 7.0 * 0.3).cos(),
            epsilon = 1e-6
        );
        assert!(warm.cos_inner > warm.cos_outer);
        let dir = Vec3::from(warm.direction);
        assert_relative_eq!(dir.length(), 1.0, epsilon = 1e-6);
        // Aimed from (5, 10, 5) at the origin
        let expected = Vec3::new(-5.0, -10.0, -5.0).normalize();
        assert_relative_eq!(dir.dot(expected), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn extra_lights_are_dropped() {
        let options = LightingOptions {
            point_lights: vec![PointLight::default(); 6],
            spot_lights: Vec::new(),
            ..LightingOptions::default()
        };
        let u = LightingUniform::from_options(&options);
        assert_eq!(u.point_count, MAX_POINT_LIGHTS as u32);
        assert_eq!(u.spot_count, 0);
        assert_eq!(u.points[3].color, [1.0; 3]);
    }
}
