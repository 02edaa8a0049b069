/// Platform-agnostic input events.
///
/// These are fed into an [`InputProcessor`](super::InputProcessor) which
/// converts them into [`ViewCommand`](crate::controller::ViewCommand)
/// values.
///
/// # Example
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(InputEvent::CursorMoved { x: 100.0, y: 200.0 }) {
///     controller.execute(&scene, cmd);
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Cursor moved to absolute screen position.
    CursorMoved {
        /// Horizontal position in physical pixels.
        x: f32,
        /// Vertical position in physical pixels.
        y: f32,
    },
    /// Mouse button pressed or released.
    MouseButton {
        /// Which button changed.
        button: MouseButton,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Scroll wheel (positive = toward the target).
    Scroll {
        /// Scroll amount.
        delta: f32,
    },
}

/// Platform-agnostic mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary (left) mouse button: click to focus, drag to pan.
    Left,
    /// Secondary (right) mouse button: drag to orbit.
    Right,
    /// Middle mouse button: drag to dolly.
    Middle,
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index. Unknown buttons are ignored.
    #[must_use]
    pub fn from_dom_index(index: i16) -> Option<Self> {
        match index {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

#[cfg(feature = "viewer")]
impl MouseButton {
    /// Map a winit button. Back, forward, and other buttons are ignored.
    #[must_use]
    pub fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        match button {
            winit::event::MouseButton::Left => Some(Self::Left),
            winit::event::MouseButton::Right => Some(Self::Right),
            winit::event::MouseButton::Middle => Some(Self::Middle),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_button_indices() {
        assert_eq!(MouseButton::from_dom_index(0), Some(MouseButton::Left));
        assert_eq!(MouseButton::from_dom_index(1), Some(MouseButton::Middle));
        assert_eq!(MouseButton::from_dom_index(2), Some(MouseButton::Right));
        assert_eq!(MouseButton::from_dom_index(3), None);
    }
}
