//! The controller's complete interactive vocabulary.
//!
//! Every user-facing operation, whether triggered by a pointer gesture, a
//! key press, a menu, or a programmatic call, is represented as a
//! `ViewCommand`. Hosts construct commands and pass them to
//! [`InteractionController::execute`](super::InteractionController::execute).

use glam::Vec2;

use crate::scene::ObjectId;

/// A single interaction request.
///
/// # Example
///
/// ```ignore
/// controller.execute(&scene, ViewCommand::Click { x: 400.0, y: 300.0 });
/// controller.execute(&scene, ViewCommand::ResetView);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ViewCommand {
    // ── Pointer ─────────────────────────────────────────────────────
    /// Primary click at a pixel position (origin top-left).
    Click {
        /// Horizontal pixel coordinate.
        x: f32,
        /// Vertical pixel coordinate.
        y: f32,
    },

    /// Primary-button drag: slide the camera over the ground plane.
    PanGround {
        /// Pointer movement in pixels since the last event.
        delta: Vec2,
    },

    /// Secondary-button drag: orbit around the controls target.
    Orbit {
        /// Pointer movement in pixels since the last event.
        delta: Vec2,
    },

    /// Scroll or middle-button drag (positive = toward the target).
    Dolly {
        /// Dolly amount.
        delta: f32,
    },

    // ── Navigation ──────────────────────────────────────────────────
    /// Focus the next object in id order; after the last, return to the
    /// overview.
    CycleFocus,

    /// Animate back to the overview pose.
    ResetView,

    /// Animate to the framed view of one object.
    FocusOn {
        /// Object to focus.
        object: ObjectId,
    },

    // ── Window ──────────────────────────────────────────────────────
    /// The drawable area changed size.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
}

/// Notifications queued for the host, drained with
/// [`InteractionController::drain_events`](super::InteractionController::drain_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// A transition toward an object began.
    FocusStarted(ObjectId),
    /// The camera settled on an object.
    Focused(ObjectId),
    /// A transition back to the overview began.
    OverviewStarted,
    /// The camera is back at the overview and free to orbit.
    OverviewRestored,
}

impl ViewEvent {
    /// Visibility of an info card describing the focused object: shown as
    /// soon as a focus starts, hidden as soon as the return to the
    /// overview starts. `None` leaves it unchanged.
    #[must_use]
    pub fn info_card_visible(self) -> Option<bool> {
        match self {
            Self::FocusStarted(_) | Self::Focused(_) => Some(true),
            Self::OverviewStarted | Self::OverviewRestored => Some(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn info_card_follows_focus() {
        let id = ObjectId(3);
        assert_eq!(ViewEvent::FocusStarted(id).info_card_visible(), Some(true));
        assert_eq!(ViewEvent::Focused(id).info_card_visible(), Some(true));
        assert_eq!(ViewEvent::OverviewStarted.info_card_visible(), Some(false));
        assert_eq!(ViewEvent::OverviewRestored.info_card_visible(), Some(false));
    }
}
