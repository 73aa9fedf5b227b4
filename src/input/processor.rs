//! Converts raw platform events into engine commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! held buttons, modifier keys) and the key-binding map. It is the only
//! thing that sits between raw window events and the engine's
//! [`execute`](crate::engine::RoomRenderEngine::execute) method.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::event::{InputEvent, MouseButton};
use crate::engine::ViewerCommand;

/// Zoom produced per pixel of vertical middle-button drag.
const DRAG_ZOOM_PER_PIXEL: f32 = 0.05;

/// Maps physical key strings to [`ViewerCommand`] variants.
///
/// Key strings use the `winit::keyboard::KeyCode` debug format:
/// `"KeyQ"`, `"Tab"`, `"Escape"`, etc.
///
/// ```toml
/// [keybindings.bindings]
/// KeyR = "recenter_camera"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeyBindings {
    /// Forward map: key string → command tag.
    bindings: HashMap<String, KeyCommandTag>,
}

/// Serializable tag for the subset of [`ViewerCommand`] that can be
/// key-bound (discrete, parameterless actions).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCommandTag {
    /// Re-frame the loaded model.
    RecenterCamera,
}

impl KeyCommandTag {
    /// Convert to the corresponding parameterless [`ViewerCommand`].
    fn to_command(self) -> ViewerCommand {
        match self {
            Self::RecenterCamera => ViewerCommand::RecenterCamera,
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let bindings =
            HashMap::from([("KeyQ".into(), KeyCommandTag::RecenterCamera)]);
        Self { bindings }
    }
}

impl KeyBindings {
    /// Look up the command for a physical key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<ViewerCommand> {
        self.bindings.get(key).map(|tag| tag.to_command())
    }

    /// Bind `key` to `tag`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: impl Into<String>, tag: KeyCommandTag) {
        let _ = self.bindings.insert(key.into(), tag);
    }
}

/// Converts raw window events into [`ViewerCommand`]s.
///
/// Left drag orbits, shift+left or right drag pans, middle drag and the
/// scroll wheel zoom.
#[derive(Debug, Default)]
pub struct InputProcessor {
    /// Last cursor position, `None` until the first move.
    last_cursor: Option<Vec2>,
    left_pressed: bool,
    right_pressed: bool,
    middle_pressed: bool,
    shift_pressed: bool,
    key_bindings: KeyBindings,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeyBindings) -> Self {
        Self {
            key_bindings,
            ..Self::default()
        }
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeyBindings) {
        self.key_bindings = key_bindings;
    }

    /// Last known cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> Option<Vec2> {
        self.last_cursor
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewerCommand> {
        self.key_bindings.lookup(key)
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton { button, pressed } => {
                match button {
                    MouseButton::Left => self.left_pressed = pressed,
                    MouseButton::Right => self.right_pressed = pressed,
                    MouseButton::Middle => self.middle_pressed = pressed,
                }
                None
            }
            InputEvent::Scroll { delta } => Some(ViewerCommand::Zoom { delta }),
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                None
            }
        }
    }

    /// Cursor moved: compute the delta, possibly produce a camera command.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<ViewerCommand> {
        let current = Vec2::new(x, y);
        let previous = self.last_cursor.replace(current)?;
        let delta = current - previous;

        if self.right_pressed || (self.left_pressed && self.shift_pressed) {
            return Some(ViewerCommand::PanCamera { delta });
        }
        if self.left_pressed {
            return Some(ViewerCommand::RotateCamera { delta });
        }
        if self.middle_pressed {
            return Some(ViewerCommand::Zoom {
                delta: -delta.y * DRAG_ZOOM_PER_PIXEL,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(p: &mut InputProcessor, button: MouseButton, pressed: bool) {
        assert_eq!(
            p.handle_event(InputEvent::MouseButton { button, pressed }),
            None
        );
    }

    fn move_to(p: &mut InputProcessor, x: f32, y: f32) -> Option<ViewerCommand> {
        p.handle_event(InputEvent::CursorMoved { x, y })
    }

    #[test]
    fn first_move_only_records_position() {
        let mut p = InputProcessor::new();
        press(&mut p, MouseButton::Left, true);
        assert_eq!(move_to(&mut p, 10.0, 10.0), None);
        assert_eq!(p.cursor(), Some(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn left_drag_rotates() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 0.0, 0.0);
        press(&mut p, MouseButton::Left, true);
        assert_eq!(
            move_to(&mut p, 5.0, -2.0),
            Some(ViewerCommand::RotateCamera {
                delta: Vec2::new(5.0, -2.0)
            })
        );
        press(&mut p, MouseButton::Left, false);
        assert_eq!(move_to(&mut p, 6.0, -2.0), None);
    }

    #[test]
    fn shift_left_and_right_drag_pan() {
        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 0.0, 0.0);
        let _ = p.handle_event(InputEvent::ModifiersChanged { shift: true });
        press(&mut p, MouseButton::Left, true);
        assert!(matches!(
            move_to(&mut p, 1.0, 1.0),
            Some(ViewerCommand::PanCamera { .. })
        ));

        let mut p = InputProcessor::new();
        let _ = move_to(&mut p, 0.0, 0.0);
        press(&mut p, MouseButton::Right, true);
        assert_eq!(
            move_to(&mut p, 3.0, 4.0),
            Some(ViewerCommand::PanCamera {
                delta: Vec2::new(3.0, 4.0)
            })
        );
    }

    #[test]
    fn wheel_and_middle_drag_zoom() {
        let mut p = InputProcessor::new();
        assert_eq!(
            p.handle_event(InputEvent::Scroll { delta: 2.0 }),
            Some(ViewerCommand::Zoom { delta: 2.0 })
        );

        let _ = move_to(&mut p, 0.0, 100.0);
        press(&mut p, MouseButton::Middle, true);
        match move_to(&mut p, 0.0, 80.0) {
            Some(ViewerCommand::Zoom { delta }) => assert!(delta > 0.0),
            other => panic!("expected zoom, got {other:?}"),
        }
    }

    #[test]
    fn default_bindings_recenter_on_q() {
        let p = InputProcessor::new();
        assert_eq!(
            p.handle_key_press("KeyQ"),
            Some(ViewerCommand::RecenterCamera)
        );
        assert_eq!(p.handle_key_press("KeyZ"), None);
    }

    #[test]
    fn custom_binding_replaces_lookup() {
        let mut bindings = KeyBindings::default();
        bindings.bind("KeyR", KeyCommandTag::RecenterCamera);
        let p = InputProcessor::with_key_bindings(bindings);
        assert_eq!(
            p.handle_key_press("KeyR"),
            Some(ViewerCommand::RecenterCamera)
        );
    }
}
