//! Input handling: event types and the input processor that converts raw
//! window events into engine commands.

/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into engine commands.
pub mod processor;

#[cfg(feature = "viewer")]
pub use event::key_binding_name;
pub use event::{InputEvent, MouseButton};
pub use processor::{InputProcessor, KeyBindings, KeyCommandTag};
