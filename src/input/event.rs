//! Window-system independent pointer events.
//!
//! Hosts translate their own events into [`InputEvent`]; with the `viewer`
//! feature, [`InputEvent::from_window_event`] does it for winit.

/// Scroll lines reported for one pixel of touchpad scrolling.
pub const LINES_PER_PIXEL: f32 = 0.01;

/// Mouse button as seen by the orbit controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Orbit (or pan while shift is held).
    Left,
    /// Pan.
    Right,
    /// Zoom by vertical drag.
    Middle,
}

/// A pointer or modifier change, consumed by
/// [`InputProcessor::handle_event`](super::InputProcessor::handle_event).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Absolute cursor position in physical pixels.
    CursorMoved {
        /// Pixels from the left edge.
        x: f32,
        /// Pixels from the top edge.
        y: f32,
    },
    /// A button went down or up.
    MouseButton {
        /// The button.
        button: MouseButton,
        /// `true` on press.
        pressed: bool,
    },
    /// Wheel movement in lines; positive moves toward the target.
    Scroll {
        /// Lines scrolled.
        delta: f32,
    },
    /// Shift went down or up.
    ModifiersChanged {
        /// Whether shift is now held.
        shift: bool,
    },
}

impl InputEvent {
    /// Scroll event from a pixel-precise (touchpad) delta.
    #[must_use]
    pub fn scroll_pixels(pixels: f32) -> Self {
        Self::Scroll {
            delta: pixels * LINES_PER_PIXEL,
        }
    }
}

#[cfg(feature = "viewer")]
mod winit_events {
    use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
    use winit::keyboard::PhysicalKey;

    use super::{InputEvent, MouseButton};

    impl From<winit::event::MouseButton> for MouseButton {
        fn from(button: winit::event::MouseButton) -> Self {
            match button {
                winit::event::MouseButton::Right => Self::Right,
                winit::event::MouseButton::Middle => Self::Middle,
                // Back/forward/other buttons orbit like the primary one.
                _ => Self::Left,
            }
        }
    }

    impl InputEvent {
        /// Translate the pointer and modifier events of a winit window.
        /// Everything else, keys included, yields `None`.
        #[must_use]
        pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
            match event {
                WindowEvent::CursorMoved { position, .. } => Some(Self::CursorMoved {
                    x: position.x as f32,
                    y: position.y as f32,
                }),
                WindowEvent::MouseInput { button, state, .. } => Some(Self::MouseButton {
                    button: MouseButton::from(*button),
                    pressed: *state == ElementState::Pressed,
                }),
                WindowEvent::MouseWheel { delta, .. } => Some(match delta {
                    MouseScrollDelta::LineDelta(_, lines) => Self::Scroll { delta: *lines },
                    MouseScrollDelta::PixelDelta(pos) => Self::scroll_pixels(pos.y as f32),
                }),
                WindowEvent::ModifiersChanged(modifiers) => Some(Self::ModifiersChanged {
                    shift: modifiers.state().shift_key(),
                }),
                _ => None,
            }
        }
    }

    /// Binding name for a fresh key press (`"KeyQ"`), or `None` for
    /// releases, auto-repeat and keys winit cannot identify.
    #[must_use]
    pub fn key_binding_name(event: &KeyEvent) -> Option<String> {
        if event.state != ElementState::Pressed || event.repeat {
            return None;
        }
        let PhysicalKey::Code(code) = event.physical_key else {
            return None;
        };
        Some(format!("{code:?}"))
    }
}

#[cfg(feature = "viewer")]
pub use winit_events::key_binding_name;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_scroll_is_scaled_to_lines() {
        let InputEvent::Scroll { delta } = InputEvent::scroll_pixels(250.0) else {
            panic!("expected a scroll event");
        };
        approx::assert_relative_eq!(delta, 2.5, epsilon = 1e-5);
        let InputEvent::Scroll { delta } = InputEvent::scroll_pixels(-100.0) else {
            panic!("expected a scroll event");
        };
        approx::assert_relative_eq!(delta, -1.0, epsilon = 1e-5);
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn winit_buttons_map_to_orbit_buttons() {
        use winit::event::MouseButton as W;
        assert_eq!(MouseButton::from(W::Left), MouseButton::Left);
        assert_eq!(MouseButton::from(W::Right), MouseButton::Right);
        assert_eq!(MouseButton::from(W::Middle), MouseButton::Middle);
        assert_eq!(MouseButton::from(W::Back), MouseButton::Left);
    }

    #[cfg(feature = "viewer")]
    #[test]
    fn non_pointer_window_events_are_ignored() {
        use winit::event::WindowEvent;
        assert_eq!(InputEvent::from_window_event(&WindowEvent::Focused(true)), None);
        assert_eq!(
            InputEvent::from_window_event(&WindowEvent::Resized(
                winit::dpi::PhysicalSize::new(800, 600)
            )),
            None
        );
    }
}
