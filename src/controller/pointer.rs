//! Free camera input: ground pan, orbit, and dolly. Only honored while
//! idle, so user input and transitions never write the camera in the same
//! frame.

use glam::{Vec2, Vec3};

use super::InteractionController;

impl InteractionController {
    /// Slide the camera over the ground by a primary-button drag of
    /// `delta` pixels, then let the controls re-aim it. The move is exact:
    /// orbit limits are not re-applied to a pan.
    pub fn pan_ground(&mut self, delta: Vec2) {
        if !self.focus.is_idle() {
            log::trace!("pan ignored while {:?}", self.focus);
            return;
        }
        let k = self.drag_scale;
        self.camera.eye -= Vec3::new(delta.x * k, 0.0, delta.y * k);
        let _ = self.controls.update(&mut self.camera);
    }

    /// Orbit around the controls target by a drag of `delta` pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        if !self.focus.is_idle() {
            log::trace!("orbit ignored while {:?}", self.focus);
            return;
        }
        self.controls.rotate(delta, self.viewport.height);
    }

    /// Move toward (positive) or away from the controls target.
    pub fn dolly(&mut self, delta: f32) {
        if !self.focus.is_idle() {
            log::trace!("dolly ignored while {:?}", self.focus);
            return;
        }
        self.controls.dolly(delta);
    }
}
