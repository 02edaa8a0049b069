//! Small shared helpers.

/// Easing curves for camera transitions.
pub mod easing;
/// Frame delta clock with smoothed FPS.
pub mod frame_timing;
