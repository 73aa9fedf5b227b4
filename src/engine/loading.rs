//! Model loading and auto-framing for RoomRenderEngine

use super::RoomRenderEngine;
use crate::asset::{LoadOutcome, LoadedModel, ModelSource, PendingLoad};
use crate::camera::controller::OrbitController;
use crate::camera::framing::{
    apply_frame, compute_framing, BoundingVolume, CameraFrame,
};
use crate::error::RoomviewError;

/// Fit `controller` around `bounds` using its current field of view and
/// return the frame that was applied.
pub fn frame_camera(
    controller: &mut OrbitController,
    bounds: &BoundingVolume,
) -> CameraFrame {
    let frame = compute_framing(bounds, controller.fovy_radians());
    apply_frame(&frame, controller);
    frame
}

/// Frame `controller` around `model` and log the result.
fn frame_model(
    controller: &mut OrbitController,
    model: &LoadedModel,
) -> (BoundingVolume, CameraFrame) {
    let bounds = model.bounds();
    let frame = frame_camera(controller, &bounds);
    log::info!(
        "model loaded: {} meshes, {} triangles, size {:?}, camera at {:?} looking at {:?}",
        model.meshes.len(),
        model.triangle_count(),
        bounds.size(),
        frame.position,
        frame.target
    );
    (bounds, frame)
}

/// Handle a finished load. A successful outcome frames the camera and is
/// handed back for upload; a failure is logged and leaves `controller`
/// untouched.
fn apply_outcome(
    controller: &mut OrbitController,
    source: &str,
    outcome: LoadOutcome,
) -> Option<(LoadedModel, BoundingVolume, CameraFrame)> {
    match outcome {
        Ok(model) => {
            if model.is_empty() {
                log::warn!("{source} contains no geometry");
            }
            let (bounds, frame) = frame_model(controller, &model);
            Some((model, bounds, frame))
        }
        Err(e) => {
            log::error!("failed to load {source}: {e}");
            None
        }
    }
}

/// Re-apply `last_frame` if there is one.
fn recenter_camera(
    controller: &mut OrbitController,
    last_frame: Option<&CameraFrame>,
) -> bool {
    let Some(frame) = last_frame else {
        return false;
    };
    apply_frame(frame, controller);
    true
}

impl RoomRenderEngine {
    /// Start loading a model on a background thread. The camera is framed
    /// around it once [`update`](Self::update) picks up the result. A load
    /// already in flight is abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`RoomviewError::ThreadSpawn`] if the loader thread cannot
    /// be started.
    pub fn load_model(
        &mut self,
        source: impl Into<ModelSource>,
    ) -> Result<(), RoomviewError> {
        if let Some(previous) = self.pending.take() {
            log::debug!("abandoning load of {}", previous.source());
        }
        self.pending = Some(PendingLoad::spawn(source.into())?);
        Ok(())
    }

    /// Display an already imported model immediately.
    pub fn show_model(&mut self, model: &LoadedModel) {
        self.model_renderer.upload(&self.context.device, model);
        let (bounds, frame) = frame_model(&mut self.camera_controller, model);
        self.model_bounds = Some(bounds);
        self.last_frame = Some(frame);
    }

    /// Re-apply the last auto-framing. No-op before a model has loaded.
    pub fn recenter(&mut self) {
        let _ = recenter_camera(
            &mut self.camera_controller,
            self.last_frame.as_ref(),
        );
    }

    pub(super) fn poll_pending_load(&mut self) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let Some(outcome) = pending.poll() else {
            return;
        };
        let source = pending.source().to_owned();
        self.pending = None;
        self.finish_load(&source, outcome);
    }

    fn finish_load(&mut self, source: &str, outcome: LoadOutcome) {
        if let Some((model, bounds, frame)) =
            apply_outcome(&mut self.camera_controller, source, outcome)
        {
            self.model_renderer.upload(&self.context.device, &model);
            self.model_bounds = Some(bounds);
            self.last_frame = Some(frame);
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec3;

    use super::*;
    use crate::options::CameraOptions;

    /// One triangle at z = -2 spanning (0, 0) to (1, 1).
    const TRIANGLE: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "mesh": 0, "translation": [0.0, 0.0, -2.0] }],
  "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }],
  "buffers": [{ "byteLength": 36, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA" }],
  "bufferViews": [{ "buffer": 0, "byteLength": 36 }],
  "accessors": [{ "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
                  "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }]
}"#;

    fn controller() -> OrbitController {
        OrbitController::new(&CameraOptions::default(), (1280, 720))
    }

    #[test]
    fn frames_room_bounds() {
        let bounds = BoundingVolume::from_center_size(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(4.0, 6.0, 8.0),
        );
        let mut c = controller();
        let frame = frame_camera(&mut c, &bounds);

        assert_relative_eq!(frame.position.x, 5.0, epsilon = 1e-3);
        assert_relative_eq!(frame.position.y, 4.4, epsilon = 1e-3);
        assert_relative_eq!(frame.position.z, 9.2556, epsilon = 1e-3);
        assert_eq!(frame.target, bounds.center());
        assert!(c.camera.eye.abs_diff_eq(frame.position, 1e-3));
        assert_eq!(c.target(), bounds.center());
    }

    #[test]
    fn uses_controller_field_of_view() {
        let bounds = BoundingVolume::from_center_size(Vec3::ZERO, Vec3::ONE);
        let mut narrow = OrbitController::new(
            &CameraOptions {
                fovy: 30.0,
                ..CameraOptions::default()
            },
            (800, 600),
        );
        let mut wide = controller();
        let near = frame_camera(&mut wide, &bounds);
        let far = frame_camera(&mut narrow, &bounds);
        assert!(far.position.z > near.position.z);
        assert_relative_eq!(far.vertical_fov, 30f32.to_radians());
    }

    #[test]
    fn loaded_triangle_is_framed() {
        let json = TRIANGLE;
        let model = crate::asset::load_model_from_slice(json.as_bytes()).unwrap();
        let mut c = controller();
        let frame = frame_camera(&mut c, &model.bounds());

        assert_eq!(frame.target, Vec3::new(0.5, 0.5, -2.0));
        assert!(frame.position.z > frame.target.z);
        assert_relative_eq!(frame.position.x - frame.target.x, 0.5);
        assert_relative_eq!(frame.position.y - frame.target.y, 0.3, epsilon = 1e-6);
    }

    #[test]
    fn successful_load_frames_camera() {
        let model = crate::asset::load_model_from_slice(TRIANGLE.as_bytes()).unwrap();
        let expected = compute_framing(&model.bounds(), controller().fovy_radians());
        let mut c = controller();

        let (model, bounds, frame) =
            apply_outcome(&mut c, "triangle", Ok(model)).unwrap();
        assert_eq!(model.triangle_count(), 1);
        assert_eq!(bounds, model.bounds());
        assert_eq!(frame, expected);
        assert!(c.camera.eye.abs_diff_eq(expected.position, 1e-4));
        assert_eq!(c.target(), expected.target);
    }

    #[test]
    fn failed_load_leaves_camera_alone() {
        let pending = PendingLoad::spawn(ModelSource::from("missing/room.glb")).unwrap();
        let outcome = pending.wait();
        assert!(outcome.is_err());

        let mut c = controller();
        let eye = c.camera.eye;
        let target = c.target();
        assert!(apply_outcome(&mut c, "missing/room.glb", outcome).is_none());
        assert_eq!(c.camera.eye, eye);
        assert_eq!(c.target(), target);
    }

    #[test]
    fn recenter_without_frame_is_noop() {
        let mut c = controller();
        c.rotate(glam::Vec2::new(120.0, 40.0));
        let eye = c.camera.eye;
        assert!(!recenter_camera(&mut c, None));
        assert_eq!(c.camera.eye, eye);
    }

    #[test]
    fn recenter_restores_last_frame() {
        let bounds = BoundingVolume::from_center_size(Vec3::ONE, Vec3::splat(4.0));
        let mut c = controller();
        let frame = frame_camera(&mut c, &bounds);
        c.rotate(glam::Vec2::new(200.0, -60.0));
        c.zoom(3.0);
        assert!(!c.camera.eye.abs_diff_eq(frame.position, 1e-3));

        assert!(recenter_camera(&mut c, Some(&frame)));
        assert!(c.camera.eye.abs_diff_eq(frame.position, 1e-3));
        assert_eq!(c.target(), frame.target);
    }
}
