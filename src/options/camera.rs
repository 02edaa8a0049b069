use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::CameraPose;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Camera", inline)]
#[serde(default)]
/// Camera projection and startup pose.
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    #[schemars(title = "Field of View", range(min = 20.0, max = 120.0), extend("step" = 1.0))]
    pub fovy: f32,
    /// Near clipping plane distance.
    #[schemars(skip)]
    pub znear: f32,
    /// Far clipping plane distance.
    #[schemars(skip)]
    pub zfar: f32,
    /// Eye position at startup.
    #[schemars(skip)]
    pub initial_position: [f32; 3],
    /// Look-at target at startup (also the orbit center).
    #[schemars(skip)]
    pub initial_target: [f32; 3],
}

impl CameraOptions {
    /// Startup pose described by these options.
    #[must_use]
    pub fn initial_pose(&self) -> CameraPose {
        CameraPose {
            position: self.initial_position.into(),
            target: self.initial_target.into(),
            fovy: self.fovy,
        }
    }
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 75.0,
            znear: 1.0,
            zfar: 10_000.0,
            initial_position: [0.0, 25.0, 45.0],
            initial_target: [0.0, 0.0, 0.0],
        }
    }
}
