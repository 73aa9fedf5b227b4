use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::camera::core::Camera;
use crate::camera::framing::FramingTarget;
use crate::options::CameraOptions;

/// Keeps the polar angle away from the poles so the view basis never
/// degenerates.
const POLAR_EPSILON: f32 = 1e-6;

/// Per-unit zoom factor (one wheel notch at zoom speed 1.0 moves 5% closer).
const ZOOM_BASE: f32 = 0.95;

/// Eye offset from the orbit target in spherical coordinates (Y up).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Azimuth around +Y, measured from +Z toward +X.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: PI / 2.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi = self.phi.sin();
        Vec3::new(
            self.radius * sin_phi * self.theta.sin(),
            self.radius * self.phi.cos(),
            self.radius * sin_phi * self.theta.cos(),
        )
    }

    fn make_safe(mut self) -> Self {
        self.phi = self.phi.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        self
    }
}

/// Orbit camera: rotates, pans and zooms the eye around a target point.
pub struct OrbitController {
    /// Camera driven by this controller.
    pub camera: Camera,
    target: Vec3,
    viewport_height: f32,
    rotate_speed: f32,
    pan_speed: f32,
    zoom_speed: f32,
    min_distance: f32,
    max_distance: f32,
}

impl OrbitController {
    /// Controller for a viewport of `size` physical pixels, with the eye
    /// `initial_distance` in front of the origin.
    pub fn new(options: &CameraOptions, size: (u32, u32)) -> Self {
        let (width, height) = (size.0.max(1), size.1.max(1));
        let camera = Camera {
            eye: Vec3::new(0.0, 0.0, options.initial_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: width as f32 / height as f32,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        };

        let mut controller = Self {
            camera,
            target: Vec3::ZERO,
            viewport_height: height as f32,
            rotate_speed: options.rotate_speed,
            pan_speed: options.pan_speed,
            zoom_speed: options.zoom_speed,
            min_distance: options.min_distance,
            max_distance: options.max_distance,
        };
        controller.update_orbit();
        controller
    }

    /// Re-read projection and sensitivity settings.
    pub fn apply_options(&mut self, options: &CameraOptions) {
        self.camera.fovy = options.fovy;
        self.camera.znear = options.znear;
        self.camera.zfar = options.zfar;
        self.rotate_speed = options.rotate_speed;
        self.pan_speed = options.pan_speed;
        self.zoom_speed = options.zoom_speed;
        self.min_distance = options.min_distance;
        self.max_distance = options.max_distance;
        self.update_orbit();
    }

    /// Point the camera orbits around.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Current eye-to-target distance.
    pub fn distance(&self) -> f32 {
        (self.camera.eye - self.target).length()
    }

    /// Vertical field of view in radians.
    pub fn fovy_radians(&self) -> f32 {
        self.camera.fovy_radians()
    }

    fn spherical(&self) -> Spherical {
        Spherical::from_offset(self.camera.eye - self.target)
    }

    fn set_spherical(&mut self, spherical: Spherical) {
        let mut s = spherical.make_safe();
        s.radius = s.radius.clamp(self.min_distance, self.max_distance);
        self.camera.eye = self.target + s.to_offset();
        self.camera.target = self.target;
    }

    /// Update the aspect ratio and the pixel scale used by rotate/pan.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.camera.aspect = width as f32 / height as f32;
            self.viewport_height = height as f32;
        }
    }

    /// Orbit by a mouse delta in pixels. A drag across the full viewport
    /// height turns the camera by one full revolution.
    pub fn rotate(&mut self, delta: Vec2) {
        let scale = TAU / self.viewport_height * self.rotate_speed;
        let mut s = self.spherical();
        s.theta -= delta.x * scale;
        s.phi -= delta.y * scale;
        self.set_spherical(s);
    }

    /// Pan by a mouse delta in pixels so the point under the cursor follows
    /// it at the target's depth.
    pub fn pan(&mut self, delta: Vec2) {
        let offset = self.camera.eye - self.target;
        let forward = -offset.normalize_or_zero();
        if forward == Vec3::ZERO {
            return;
        }
        let right = forward.cross(self.camera.up).normalize_or_zero();
        let up = right.cross(forward);

        let target_distance =
            offset.length() * (self.fovy_radians() / 2.0).tan();
        let scale =
            2.0 * target_distance / self.viewport_height * self.pan_speed;
        let translation = right * (-delta.x * scale) + up * (delta.y * scale);

        self.target += translation;
        self.camera.eye += translation;
        self.camera.target = self.target;
    }

    /// Dolly toward (positive `delta`) or away from the target.
    pub fn zoom(&mut self, delta: f32) {
        let mut s = self.spherical();
        s.radius *= ZOOM_BASE.powf(self.zoom_speed * delta);
        self.set_spherical(s);
    }
}

impl FramingTarget for OrbitController {
    fn set_position(&mut self, position: Vec3) {
        self.camera.eye = position;
    }

    fn look_at(&mut self, target: Vec3) {
        self.camera.target = target;
    }

    fn set_orbit_target(&mut self, target: Vec3) {
        self.target = target;
    }

    fn update_orbit(&mut self) {
        let s = self.spherical();
        self.set_spherical(s);
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::camera::framing::{apply_frame, compute_framing, BoundingVolume};

    fn controller() -> OrbitController {
        OrbitController::new(&CameraOptions::default(), (1600, 900))
    }

    #[test]
    fn starts_in_front_of_origin() {
        let c = controller();
        assert!(c.camera.eye.abs_diff_eq(Vec3::new(0.0, 0.0, 5.0), 1e-5));
        assert_eq!(c.camera.target, Vec3::ZERO);
        assert_relative_eq!(c.camera.aspect, 1600.0 / 900.0);
    }

    #[test]
    fn applied_frame_is_kept_by_update() {
        let bounds = BoundingVolume::from_center_size(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 6.0, 8.0),
        );
        let mut c = controller();
        let frame = compute_framing(&bounds, c.fovy_radians());
        apply_frame(&frame, &mut c);

        assert!(c.camera.eye.abs_diff_eq(frame.position, 1e-4));
        assert_eq!(c.camera.target, frame.target);
        assert_eq!(c.target(), frame.target);
    }

    #[test]
    fn collapsed_frame_stays_finite() {
        let mut c = controller();
        let frame = compute_framing(&BoundingVolume::EMPTY, c.fovy_radians());
        apply_frame(&frame, &mut c);
        assert_eq!(c.distance(), 0.0);
        assert!(c.camera.eye.is_finite());
        assert!(c.camera.build_matrix().is_finite());

        c.rotate(Vec2::new(10.0, 5.0));
        c.zoom(1.0);
        c.pan(Vec2::new(3.0, 3.0));
        assert!(c.camera.eye.is_finite());
    }

    #[test]
    fn rotate_preserves_distance_and_target() {
        let mut c = controller();
        c.rotate(Vec2::new(120.0, -40.0));
        assert_relative_eq!(c.distance(), 5.0, epsilon = 1e-4);
        assert_eq!(c.target(), Vec3::ZERO);
        assert!(c.camera.eye.x.abs() > 0.1);
    }

    #[test]
    fn rotate_clamps_at_pole() {
        let mut c = controller();
        c.rotate(Vec2::new(0.0, 10_000.0));
        let up = (c.camera.eye - c.target()).normalize();
        assert!(up.y <= 1.0);
        assert!(c.camera.build_matrix().is_finite());
    }

    #[test]
    fn zoom_in_moves_closer() {
        let mut c = controller();
        c.zoom(1.0);
        assert!(c.distance() < 5.0);
        c.zoom(-2.0);
        assert!(c.distance() > 5.0);
    }

    #[test]
    fn zoom_respects_min_distance() {
        let options = CameraOptions {
            min_distance: 4.0,
            ..CameraOptions::default()
        };
        let mut c = OrbitController::new(&options, (800, 600));
        c.zoom(100.0);
        assert_relative_eq!(c.distance(), 4.0, epsilon = 1e-4);
    }

    #[test]
    fn pan_moves_target_and_eye_together() {
        let mut c = controller();
        let offset_before = c.camera.eye - c.target();
        c.pan(Vec2::new(50.0, 0.0));
        assert!(c.target().x < 0.0);
        assert!((c.camera.eye - c.target()).abs_diff_eq(offset_before, 1e-5));
        assert_eq!(c.camera.target, c.target());
    }

    #[test]
    fn resize_updates_aspect() {
        let mut c = controller();
        c.resize(1000, 500);
        assert_eq!(c.camera.aspect, 2.0);
        c.resize(0, 500);
        assert_eq!(c.camera.aspect, 2.0);
    }
}
