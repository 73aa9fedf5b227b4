//! Options methods for RoomRenderEngine

use super::RoomRenderEngine;
use crate::options::Options;
use crate::util::frame_timing::FrameTiming;

impl RoomRenderEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and apply all changes to subsystems.
    pub fn set_options(&mut self, new: Options) {
        self.options = new;
        self.apply_options();
    }

    /// Push current option values to the light rig, camera, key bindings
    /// and frame limiter. The background color is read every frame.
    pub fn apply_options(&mut self) {
        self.lighting
            .apply_options(&self.context.queue, &self.options.lighting);
        self.camera_controller.apply_options(&self.options.camera);
        self.input
            .set_key_bindings(self.options.keybindings.clone());
        self.frame_timing = FrameTiming::new(self.options.scene.max_fps);
    }
}
