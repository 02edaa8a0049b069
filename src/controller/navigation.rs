//! Click routing and programmatic focus/overview requests.

use super::{FocusState, InteractionController, ViewEvent};
use crate::error::Degradation;
use crate::picking;
use crate::scene::{ObjectId, Scene};
use crate::transition::Destination;

impl InteractionController {
    /// Route a primary click at pixel `(x, y)`.
    ///
    /// A visible label under the pointer wins over the 3D pick.
    pub fn handle_click(&mut self, scene: &Scene, x: f32, y: f32) {
        if let Some(id) = self.labels.hit_test(x, y) {
            log::debug!("click ({x}, {y}) on label of {id}");
            self.route_pick(scene, Some(id));
            return;
        }
        let target = picking::pick(scene, &self.camera, self.viewport, x, y);
        log::debug!("click ({x}, {y}) picked {target:?}");
        self.route_pick(scene, target.object());
    }

    /// Route a click on the label of `object`.
    pub fn handle_label_click(&mut self, scene: &Scene, object: ObjectId) {
        self.route_pick(scene, Some(object));
    }

    /// Animate to the framed view of `object`. No-op when already
    /// focused on it or heading there.
    pub fn focus_on(&mut self, scene: &Scene, object: ObjectId) {
        if self.focus.routing_object() == Some(object) {
            log::trace!("focus_on({object}): already there");
            return;
        }
        self.start_focus(scene, object);
    }

    /// Animate back to the overview. No-op when idle or already heading
    /// there.
    pub fn reset_view(&mut self) {
        if self.focus.routing_object().is_none() {
            log::trace!("reset_view: already at overview");
            return;
        }
        self.start_overview();
    }

    /// Focus the next object in id order. After the last object, return
    /// to the overview.
    pub fn cycle_focus(&mut self, scene: &Scene) {
        let current = self.focus.routing_object();
        match scene.next_after(current) {
            Some(next) => self.start_focus(scene, next),
            None if current.is_some() => self.start_overview(),
            None => log::trace!("cycle_focus: scene is empty"),
        }
    }

    fn route_pick(&mut self, scene: &Scene, hit: Option<ObjectId>) {
        match (self.focus.routing_object(), hit) {
            (None, Some(object)) => self.start_focus(scene, object),
            (None, None) => Degradation::NoHit.report(),
            (Some(current), Some(object)) if current == object => {
                self.start_overview();
            }
            (Some(_), Some(object)) => self.start_focus(scene, object),
            (Some(_), None) => {
                Degradation::NoHit.report();
                self.start_overview();
            }
        }
    }

    fn start_focus(&mut self, scene: &Scene, object: ObjectId) {
        let Some(tracked) = scene.object(object) else {
            Degradation::UnknownObject(object).report();
            return;
        };
        self.labels.set_visible(false);
        self.controls.enabled = false;
        self.controls.stop();
        let id = self.transitions.focus(tracked, &self.camera);
        self.current = Some(id);
        self.focus = FocusState::Transitioning {
            toward: Destination::Object(object),
        };
        self.events.push_back(ViewEvent::FocusStarted(object));
        log::info!("focusing on {object} '{}'", tracked.name);
    }

    fn start_overview(&mut self) {
        self.controls.enabled = false;
        self.controls.stop();
        let id = self.transitions.overview(&self.camera);
        self.current = Some(id);
        self.focus = FocusState::Transitioning {
            toward: Destination::Overview,
        };
        self.events.push_back(ViewEvent::OverviewStarted);
        log::info!("returning to overview");
    }
}
