//! Converts raw platform events into view commands.
//!
//! The `InputProcessor` owns all transient input state (cursor tracking,
//! held buttons, click-vs-drag detection) and the key-binding map. It is
//! the only thing that sits between raw window events and
//! [`InteractionController::execute`](crate::controller::InteractionController::execute).

use glam::Vec2;

use super::event::{InputEvent, MouseButton};
use super::keyboard::KeyAction;
use super::mouse::{ClickResult, InputState};
use crate::controller::ViewCommand;
use crate::options::KeybindingOptions;

/// Pixels of middle-button drag per unit of dolly.
const DOLLY_PIXELS_PER_UNIT: f32 = 100.0;

/// Converts raw window events into [`ViewCommand`]s.
///
/// # Usage
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(event) {
///     controller.execute(&scene, cmd);
/// }
/// if let Some(cmd) = input.handle_key_press("Escape") {
///     controller.execute(&scene, cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Cursor tracking and click state machine.
    state: InputState,
    /// Key string → action mapping.
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::new()
        }
    }

    /// Replace the key bindings.
    pub fn set_key_bindings(&mut self, key_bindings: KeybindingOptions) {
        self.key_bindings = key_bindings;
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> Vec2 {
        self.state.mouse_pos
    }

    /// Whether the primary mouse button is held.
    #[must_use]
    pub fn primary_pressed(&self) -> bool {
        self.state.held_button() == Some(MouseButton::Left)
    }

    /// Release any held button without triggering click detection.
    ///
    /// Used when the window loses focus mid-drag.
    pub fn release_mouse_state(&mut self) {
        self.state.release();
    }

    /// Look up a key press and return the corresponding command, if bound.
    #[must_use]
    pub fn handle_key_press(&self, key: &str) -> Option<ViewCommand> {
        self.key_bindings.lookup(key).map(|action| match action {
            KeyAction::CycleFocus => ViewCommand::CycleFocus,
            KeyAction::ResetView => ViewCommand::ResetView,
        })
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(Vec2::new(x, y))
            }
            InputEvent::MouseButton { button, pressed } => {
                self.handle_mouse_button(button, pressed)
            }
            InputEvent::Scroll { delta } => Some(ViewCommand::Dolly { delta }),
        }
    }

    /// Cursor moved: while a button is held, produce a drag command.
    fn handle_cursor_moved(&mut self, pos: Vec2) -> Option<ViewCommand> {
        let delta = self.state.handle_mouse_position(pos);
        if delta == Vec2::ZERO {
            return None;
        }

        match self.state.held_button()? {
            MouseButton::Left => Some(ViewCommand::PanGround { delta }),
            MouseButton::Right => Some(ViewCommand::Orbit { delta }),
            MouseButton::Middle => Some(ViewCommand::Dolly {
                delta: -delta.y / DOLLY_PIXELS_PER_UNIT,
            }),
        }
    }

    /// Button press/release: track state, produce a click on release.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
    ) -> Option<ViewCommand> {
        if pressed {
            if self.state.held_button().is_none() {
                self.state.handle_mouse_down(button);
            }
            return None;
        }

        match self.state.process_mouse_up(button) {
            ClickResult::Click { pos } => {
                Some(ViewCommand::Click { x: pos.x, y: pos.y })
            }
            ClickResult::DragEnded | ClickResult::NoAction => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::CursorMoved { x, y }
    }

    fn button(button: MouseButton, pressed: bool) -> InputEvent {
        InputEvent::MouseButton { button, pressed }
    }

    #[test]
    fn click_without_travel() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(moved(100.0, 50.0)), None);
        assert_eq!(input.handle_event(button(MouseButton::Left, true)), None);
        assert_eq!(
            input.handle_event(button(MouseButton::Left, false)),
            Some(ViewCommand::Click { x: 100.0, y: 50.0 })
        );
    }

    #[test]
    fn primary_drag_pans_by_successive_deltas() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(moved(10.0, 10.0));
        let _ = input.handle_event(button(MouseButton::Left, true));
        assert!(input.primary_pressed());
        assert_eq!(
            input.handle_event(moved(20.0, 15.0)),
            Some(ViewCommand::PanGround {
                delta: Vec2::new(10.0, 5.0)
            })
        );
        assert_eq!(
            input.handle_event(moved(25.0, 15.0)),
            Some(ViewCommand::PanGround {
                delta: Vec2::new(5.0, 0.0)
            })
        );
        // Dragged, so release is not a click.
        assert_eq!(input.handle_event(button(MouseButton::Left, false)), None);
    }

    #[test]
    fn secondary_drag_orbits() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(button(MouseButton::Right, true));
        assert_eq!(
            input.handle_event(moved(3.0, 4.0)),
            Some(ViewCommand::Orbit {
                delta: Vec2::new(3.0, 4.0)
            })
        );
    }

    #[test]
    fn hover_produces_nothing() {
        let mut input = InputProcessor::new();
        assert_eq!(input.handle_event(moved(3.0, 4.0)), None);
        assert_eq!(input.handle_event(moved(30.0, 40.0)), None);
    }

    #[test]
    fn scroll_dollies() {
        let mut input = InputProcessor::new();
        assert_eq!(
            input.handle_event(InputEvent::Scroll { delta: 1.5 }),
            Some(ViewCommand::Dolly { delta: 1.5 })
        );
    }

    #[test]
    fn key_bindings_map_to_commands() {
        let input = InputProcessor::new();
        assert_eq!(
            input.handle_key_press("Escape"),
            Some(ViewCommand::ResetView)
        );
        assert_eq!(input.handle_key_press("Tab"), Some(ViewCommand::CycleFocus));
        assert_eq!(input.handle_key_press("KeyQ"), None);
    }

    #[test]
    fn released_state_suppresses_click() {
        let mut input = InputProcessor::new();
        let _ = input.handle_event(button(MouseButton::Left, true));
        input.release_mouse_state();
        assert_eq!(input.handle_event(button(MouseButton::Left, false)), None);
    }
}
