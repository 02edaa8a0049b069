use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Transition", inline)]
#[serde(default)]
/// Timing of camera focus/overview transitions.
pub struct TransitionOptions {
    /// Duration of every transition in seconds.
    #[schemars(title = "Duration", range(min = 0.1, max = 5.0), extend("step" = 0.1))]
    pub duration_secs: f32,
    /// Easing curve applied to transition progress.
    #[schemars(skip)]
    pub easing: EasingFunction,
}

impl Default for TransitionOptions {
    fn default() -> Self {
        Self {
            duration_secs: 1.0,
            easing: EasingFunction::DEFAULT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Framing", inline)]
#[serde(default)]
/// How a focused object is framed relative to its bounding box.
///
/// The camera is placed at `center + size * extent_scale + bias` and
/// looks at `center + look_at_offset`.
pub struct FramingOptions {
    /// Per-axis multiplier on the box's full size.
    #[schemars(skip)]
    pub extent_scale: [f32; 3],
    /// Fixed offset added after scaling (downward/backward by default).
    #[schemars(skip)]
    pub bias: [f32; 3],
    /// Offset of the look-at point from the box center.
    #[schemars(skip)]
    pub look_at_offset: [f32; 3],
    /// Shortest allowed distance between the camera and the box center.
    #[schemars(title = "Min Framing Distance", range(min = 0.5, max = 100.0), extend("step" = 0.5))]
    pub min_distance: f32,
}

impl Default for FramingOptions {
    fn default() -> Self {
        Self {
            extent_scale: [0.5, 1.5, 2.5],
            bias: [0.0, -15.0, -20.0],
            look_at_offset: [5.0, 0.0, 0.0],
            min_distance: 5.0,
        }
    }
}
