//! Screen-space labels that follow tracked objects.
//!
//! Every frame [`LabelProjector::update`] projects each object's world
//! position through the camera and moves its overlay element so the
//! element is centered on the projected point. Elements are anything
//! implementing [`LabelElement`]: an in-memory [`OverlayLabel`] for the
//! native viewer, or a DOM node in the browser front-end.

mod overlay;

use std::fmt;

use glam::{Vec2, Vec3};
pub use overlay::OverlayLabel;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::camera::{Camera, Viewport};
use crate::error::Degradation;
use crate::scene::{ObjectId, Scene};

/// A positionable overlay element.
pub trait LabelElement: fmt::Debug {
    /// Move the element's top-left corner to `pos` (pixels).
    fn set_position(&mut self, pos: Vec2);
    /// Show or hide the element.
    fn set_visible(&mut self, visible: bool);
    /// Current rendered width and height in pixels.
    fn rendered_size(&self) -> Vec2;
}

/// Overlay attached to one tracked object.
#[derive(Debug)]
pub struct Label {
    object: ObjectId,
    text: String,
    screen_pos: Vec2,
    visible: bool,
    element: Box<dyn LabelElement>,
}

impl Label {
    /// Object this label follows.
    #[must_use]
    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// Label text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Top-left pixel position from the latest update.
    #[must_use]
    pub fn screen_pos(&self) -> Vec2 {
        self.screen_pos
    }

    /// Whether the label is shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Rendered size of the underlying element.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.element.rendered_size()
    }

    fn contains(&self, point: Vec2) -> bool {
        let max = self.screen_pos + self.size();
        point.x >= self.screen_pos.x
            && point.y >= self.screen_pos.y
            && point.x <= max.x
            && point.y <= max.y
    }
}

/// Top-left pixel position that centers an element of `size` on the
/// projection of `world`.
#[must_use]
pub fn project_to_pixels(
    camera: &Camera,
    viewport: Viewport,
    world: Vec3,
    size: Vec2,
) -> Vec2 {
    let ndc = camera.project(world);
    viewport.ndc_to_pixel(ndc.truncate()) - size * 0.5
}

/// Owns the `ObjectId → Label` map and keeps every label on its object.
#[derive(Debug)]
pub struct LabelProjector {
    labels: FxHashMap<ObjectId, Label>,
    visible: bool,
    /// Objects already reported as missing a label.
    reported_missing: FxHashSet<ObjectId>,
}

impl Default for LabelProjector {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelProjector {
    /// Empty projector; labels start visible.
    #[must_use]
    pub fn new() -> Self {
        Self {
            labels: FxHashMap::default(),
            visible: true,
            reported_missing: FxHashSet::default(),
        }
    }

    /// Attach `element` as the label of `object`, replacing any previous
    /// one. The new label takes the projector's current visibility.
    pub fn register(
        &mut self,
        object: ObjectId,
        text: impl Into<String>,
        mut element: Box<dyn LabelElement>,
    ) {
        element.set_visible(self.visible);
        let label = Label {
            object,
            text: text.into(),
            screen_pos: Vec2::ZERO,
            visible: self.visible,
            element,
        };
        let _ = self.reported_missing.remove(&object);
        if self.labels.insert(object, label).is_some() {
            log::debug!("labels: replaced label for {object}");
        }
    }

    /// Register an [`OverlayLabel`] sized for the object's name for every
    /// object in `scene` that has no label yet.
    pub fn register_scene(&mut self, scene: &Scene) {
        for object in scene.objects() {
            if !self.labels.contains_key(&object.id) {
                self.register(
                    object.id,
                    object.name.clone(),
                    Box::new(OverlayLabel::for_text(&object.name)),
                );
            }
        }
    }

    /// Drop labels whose object is no longer in `scene`, hiding their
    /// elements. Returns how many were removed.
    pub fn prune(&mut self, scene: &Scene) -> usize {
        let before = self.labels.len();
        self.labels.retain(|id, label| {
            let alive = scene.object(*id).is_some();
            if !alive {
                label.element.set_visible(false);
                log::debug!("label for removed object {id} dropped");
            }
            alive
        });
        self.reported_missing.retain(|id| scene.object(*id).is_some());
        before - self.labels.len()
    }

    /// Detach and return the label of `object`.
    pub fn remove(&mut self, object: ObjectId) -> Option<Label> {
        self.labels.remove(&object)
    }

    /// Show or hide every label.
    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
        for label in self.labels.values_mut() {
            label.visible = visible;
            label.element.set_visible(visible);
        }
    }

    /// Whether labels are currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reproject every tracked object's label.
    ///
    /// Objects without a label are skipped; each is reported once.
    pub fn update(&mut self, scene: &Scene, camera: &Camera, viewport: Viewport) {
        for object in scene.objects() {
            let Some(label) = self.labels.get_mut(&object.id) else {
                if self.reported_missing.insert(object.id) {
                    Degradation::MissingLabelElement(object.id).report();
                }
                continue;
            };
            let pos = project_to_pixels(
                camera,
                viewport,
                object.position,
                label.element.rendered_size(),
            );
            label.screen_pos = pos;
            label.element.set_position(pos);
        }
    }

    /// Label of `object`, if registered.
    #[must_use]
    pub fn get(&self, object: ObjectId) -> Option<&Label> {
        self.labels.get(&object)
    }

    /// Last projected position of `object`'s label.
    #[must_use]
    pub fn screen_position(&self, object: ObjectId) -> Option<Vec2> {
        self.labels.get(&object).map(Label::screen_pos)
    }

    /// The visible label under pixel `(x, y)`. Overlaps resolve to the
    /// lowest object id.
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ObjectId> {
        let point = Vec2::new(x, y);
        self.labels
            .values()
            .filter(|label| label.visible && label.contains(point))
            .map(Label::object)
            .min()
    }

    /// All labels, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &Label> {
        self.labels.values()
    }

    /// Number of registered labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether no labels are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
