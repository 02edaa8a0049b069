//! The collection of placed objects the viewer frames and labels.
//!
//! Objects are owned by [`Scene`] and addressed by [`ObjectId`]. Every
//! object carries a world-space [`Aabb`]; the designated [`GroundPlane`]
//! is kept apart so picking can exclude it.

mod bounds;

use std::fmt;

pub use bounds::Aabb;
use glam::Vec3;

/// Stable identity of a tracked object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placed object with a world position and world-space bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedObject {
    /// Identity within the owning scene.
    pub id: ObjectId,
    /// Display name, also used as label text.
    pub name: String,
    /// World-space anchor position (label anchor, fallback framing point).
    pub position: Vec3,
    /// World-space bounding box.
    pub bounds: Aabb,
}

impl TrackedObject {
    /// Bounds usable for framing: the real box when it has volume,
    /// otherwise a zero-size box at the object's position.
    #[must_use]
    pub fn framing_bounds(&self) -> Aabb {
        if self.bounds.is_degenerate() {
            Aabb::from_center_half_extents(self.position, Vec3::ZERO)
        } else {
            self.bounds
        }
    }
}

/// A finite horizontal ground square, excluded from object picks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPlane {
    /// Height of the plane (world Y).
    pub height: f32,
    /// Half of the side length of the square, centered on the origin.
    pub half_size: f32,
}

impl Default for GroundPlane {
    fn default() -> Self {
        Self {
            height: 0.0,
            half_size: 500.0,
        }
    }
}

/// Scene collection: tracked objects in insertion order plus the ground.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    objects: Vec<TrackedObject>,
    ground: Option<GroundPlane>,
    next_id: u32,
}

impl Scene {
    /// Create an empty scene with no ground plane.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with the default 1000×1000 ground at y = 0.
    #[must_use]
    pub fn with_ground() -> Self {
        Self {
            ground: Some(GroundPlane::default()),
            ..Self::default()
        }
    }

    /// Replace (or remove) the ground plane.
    pub fn set_ground(&mut self, ground: Option<GroundPlane>) {
        self.ground = ground;
    }

    /// The designated ground plane, if any.
    #[must_use]
    pub fn ground(&self) -> Option<&GroundPlane> {
        self.ground.as_ref()
    }

    /// Add a loaded object and return its id.
    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
        bounds: Aabb,
    ) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let name = name.into();
        log::debug!("scene: added {id} '{name}' at {position}");
        self.objects.push(TrackedObject {
            id,
            name,
            position,
            bounds,
        });
        id
    }

    /// Add an object whose bounds are a box of `size` centered on
    /// `position`.
    pub fn add_box(
        &mut self,
        name: impl Into<String>,
        position: Vec3,
        size: Vec3,
    ) -> ObjectId {
        self.add_object(
            name,
            position,
            Aabb::from_center_half_extents(position, size * 0.5),
        )
    }

    /// Move an object, translating its bounds with it. Returns `false`
    /// when the id is unknown.
    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> bool {
        let Some(object) = self.objects.iter_mut().find(|o| o.id == id)
        else {
            return false;
        };
        let delta = position - object.position;
        object.position = position;
        object.bounds = object.bounds.translated(delta);
        true
    }

    /// Remove an object. Returns it if it existed.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<TrackedObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Look up an object by id.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&TrackedObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// All objects in insertion order.
    #[must_use]
    pub fn objects(&self) -> &[TrackedObject] {
        &self.objects
    }

    /// Number of tracked objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// The object following `current` in id order, wrapping to `None`
    /// after the last one. `None` as input yields the first object.
    #[must_use]
    pub fn next_after(&self, current: Option<ObjectId>) -> Option<ObjectId> {
        let mut ids: Vec<ObjectId> = self.objects.iter().map(|o| o.id).collect();
        ids.sort_unstable();
        match current {
            None => ids.first().copied(),
            Some(cur) => ids.into_iter().find(|id| *id > cur),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_and_stable() {
        let mut scene = Scene::new();
        let a = scene.add_box("A", Vec3::ZERO, Vec3::ONE);
        let b = scene.add_box("B", Vec3::X, Vec3::ONE);
        assert_eq!(a, ObjectId(0));
        assert_eq!(b, ObjectId(1));
        let _ = scene.remove_object(a);
        let c = scene.add_box("C", Vec3::Y, Vec3::ONE);
        assert_eq!(c, ObjectId(2));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn set_position_moves_bounds() {
        let mut scene = Scene::new();
        let id = scene.add_box("A", Vec3::ZERO, Vec3::splat(2.0));
        assert!(scene.set_position(id, Vec3::new(3.0, 0.0, 0.0)));
        let obj = scene.object(id).unwrap();
        assert_eq!(obj.bounds.center(), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(obj.bounds.half_extents(), Vec3::ONE);
        assert!(!scene.set_position(ObjectId(99), Vec3::ZERO));
    }

    #[test]
    fn framing_bounds_fall_back_to_position() {
        let mut scene = Scene::new();
        let id = scene.add_object(
            "flat",
            Vec3::new(1.0, 2.0, 3.0),
            Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ZERO),
        );
        let framing = scene.object(id).unwrap().framing_bounds();
        assert_eq!(framing.center(), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(framing.half_extents(), Vec3::ZERO);
    }

    #[test]
    fn next_after_cycles_then_returns_none() {
        let mut scene = Scene::new();
        let a = scene.add_box("A", Vec3::ZERO, Vec3::ONE);
        let b = scene.add_box("B", Vec3::X, Vec3::ONE);
        assert_eq!(scene.next_after(None), Some(a));
        assert_eq!(scene.next_after(Some(a)), Some(b));
        assert_eq!(scene.next_after(Some(b)), None);
    }
}
