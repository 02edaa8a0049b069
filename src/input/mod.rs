//! Input handling: event types, the click/drag state machine, and the
//! input processor that converts raw window events into view commands.

/// Platform-agnostic input events.
pub mod event;
/// Bindable keyboard actions.
pub mod keyboard;
/// Click-vs-drag state machine and cursor tracking.
pub(crate) mod mouse;
/// Converts raw events into view commands.
pub mod processor;

pub use event::{InputEvent, MouseButton};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
