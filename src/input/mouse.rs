use glam::Vec2;

use super::event::MouseButton;

/// Pointer travel (pixels) after which a press counts as a drag, not a
/// click.
const DRAG_THRESHOLD: f32 = 4.0;

/// Result of releasing a mouse button.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ClickResult {
    /// Press and release without meaningful travel: a click at `pos`.
    Click {
        /// Release position in pixels.
        pos: Vec2,
    },
    /// The press turned into a drag; no click.
    DragEnded,
    /// Release of a button that was never pressed (e.g. focus regained
    /// mid-press) or of a non-primary button.
    NoAction,
}

/// Tracks cursor position, held buttons, and click-vs-drag detection.
#[derive(Debug, Clone, Default)]
pub(crate) struct InputState {
    /// Last known cursor position.
    pub mouse_pos: Vec2,
    /// Button currently held, with the position it went down at.
    pressed: Option<(MouseButton, Vec2)>,
    /// Whether the current press has travelled past the drag threshold.
    is_dragging: bool,
}

impl InputState {
    /// Record a button press at the current cursor position.
    pub fn handle_mouse_down(&mut self, button: MouseButton) {
        self.pressed = Some((button, self.mouse_pos));
        self.is_dragging = false;
    }

    /// Update the cursor position and return the delta since the last one.
    pub fn handle_mouse_position(&mut self, pos: Vec2) -> Vec2 {
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;
        if let Some((_, down_at)) = self.pressed {
            if pos.distance(down_at) > DRAG_THRESHOLD {
                self.is_dragging = true;
            }
        }
        delta
    }

    /// The button currently held, if any.
    pub fn held_button(&self) -> Option<MouseButton> {
        self.pressed.map(|(button, _)| button)
    }

    /// Process a release and classify it.
    pub fn process_mouse_up(&mut self, button: MouseButton) -> ClickResult {
        let Some((held, _)) = self.pressed else {
            return ClickResult::NoAction;
        };
        if held != button {
            return ClickResult::NoAction;
        }
        self.pressed = None;
        let was_dragging = std::mem::take(&mut self.is_dragging);

        if was_dragging {
            ClickResult::DragEnded
        } else if button == MouseButton::Left {
            ClickResult::Click {
                pos: self.mouse_pos,
            }
        } else {
            ClickResult::NoAction
        }
    }

    /// Forget any held button without producing a click.
    pub fn release(&mut self) {
        self.pressed = None;
        self.is_dragging = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_release_in_place_is_a_click() {
        let mut state = InputState::default();
        let _ = state.handle_mouse_position(Vec2::new(10.0, 20.0));
        state.handle_mouse_down(MouseButton::Left);
        let _ = state.handle_mouse_position(Vec2::new(11.0, 21.0));
        assert_eq!(
            state.process_mouse_up(MouseButton::Left),
            ClickResult::Click {
                pos: Vec2::new(11.0, 21.0)
            }
        );
    }

    #[test]
    fn travel_past_threshold_is_a_drag() {
        let mut state = InputState::default();
        state.handle_mouse_down(MouseButton::Left);
        let _ = state.handle_mouse_position(Vec2::new(30.0, 0.0));
        assert_eq!(
            state.process_mouse_up(MouseButton::Left),
            ClickResult::DragEnded
        );
        assert_eq!(state.held_button(), None);
    }

    #[test]
    fn unmatched_release_is_ignored() {
        let mut state = InputState::default();
        assert_eq!(
            state.process_mouse_up(MouseButton::Left),
            ClickResult::NoAction
        );
        state.handle_mouse_down(MouseButton::Right);
        assert_eq!(
            state.process_mouse_up(MouseButton::Left),
            ClickResult::NoAction
        );
        assert_eq!(state.held_button(), Some(MouseButton::Right));
        assert_eq!(
            state.process_mouse_up(MouseButton::Right),
            ClickResult::NoAction
        );
    }
}
