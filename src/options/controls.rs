use std::f32::consts::FRAC_PI_2;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Controls", inline)]
#[serde(default)]
/// Orbit limits and pointer sensitivities.
pub struct ControlsOptions {
    /// Closest the orbit may bring the camera to its target.
    #[schemars(title = "Min Distance", range(min = 0.0, max = 100.0), extend("step" = 1.0))]
    pub min_distance: f32,
    /// Farthest the orbit may take the camera from its target.
    #[schemars(title = "Max Distance", range(min = 1.0, max = 500.0), extend("step" = 1.0))]
    pub max_distance: f32,
    /// Smallest polar angle from +Y, in radians.
    #[schemars(skip)]
    pub min_polar_angle: f32,
    /// Largest polar angle from +Y, in radians (π/2 keeps the camera
    /// above the horizon).
    #[schemars(skip)]
    pub max_polar_angle: f32,
    /// Whether orbit input eases out over several frames.
    #[schemars(title = "Damping")]
    pub enable_damping: bool,
    /// Fraction of the pending orbit applied per frame when damping.
    #[schemars(title = "Damping Factor", range(min = 0.01, max = 1.0), extend("step" = 0.01))]
    pub damping_factor: f32,
    /// Orbit sensitivity multiplier.
    #[schemars(title = "Rotate Speed", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub rotate_speed: f32,
    /// Dolly sensitivity multiplier.
    #[schemars(title = "Zoom Speed", range(min = 0.01, max = 0.5), extend("step" = 0.01))]
    pub zoom_speed: f32,
    /// World units of ground-plane pan per pixel of primary-button drag.
    #[schemars(title = "Drag Scale", range(min = 0.0005, max = 0.05), extend("step" = 0.0005))]
    pub drag_scale: f32,
}

impl Default for ControlsOptions {
    fn default() -> Self {
        Self {
            min_distance: 18.0,
            max_distance: 50.0,
            min_polar_angle: 0.0,
            max_polar_angle: FRAC_PI_2,
            enable_damping: true,
            damping_factor: 0.05,
            rotate_speed: 1.0,
            zoom_speed: 0.1,
            drag_scale: 0.002,
        }
    }
}
