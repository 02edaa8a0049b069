//! Camera system for 3D scene viewing.
//!
//! Provides a perspective camera, its GPU uniform, and orbit-style
//! controls with distance and polar-angle limits and damping.

/// Orbit-style controls: rotate, dolly, limits, and damping.
pub mod controls;
/// Core camera struct, viewport, and GPU uniform types.
pub mod core;

pub use self::controls::OrbitControls;
pub use self::core::{Camera, CameraPose, CameraUniform, Viewport};
