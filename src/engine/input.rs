//! Input and command dispatch for RoomRenderEngine

use super::{RoomRenderEngine, ViewerCommand};
use crate::input::InputEvent;

impl RoomRenderEngine {
    /// Process a platform-agnostic input event.
    ///
    /// Consumers forward raw window events as [`InputEvent`] variants; the
    /// engine's input processor turns drags and scrolls into camera
    /// commands. Returns `true` if the event produced a command.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        match self.input.handle_event(event) {
            Some(cmd) => {
                self.execute(cmd);
                true
            }
            None => false,
        }
    }

    /// Process a key press using the configured bindings. `key` uses the
    /// `winit::keyboard::KeyCode` debug format (`"KeyQ"`). Returns `true`
    /// if the key was bound.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        match self.input.handle_key_press(key) {
            Some(cmd) => {
                self.execute(cmd);
                true
            }
            None => false,
        }
    }

    /// Perform a single command.
    pub fn execute(&mut self, cmd: ViewerCommand) {
        match cmd {
            ViewerCommand::RecenterCamera => self.recenter(),
            ViewerCommand::RotateCamera { delta } => {
                self.camera_controller.rotate(delta);
            }
            ViewerCommand::PanCamera { delta } => {
                self.camera_controller.pan(delta);
            }
            ViewerCommand::Zoom { delta } => {
                self.camera_controller.zoom(delta);
            }
        }
    }
}
