//! Screen-space object picking by CPU ray casting.
//!
//! A pointer position is unprojected into a world ray and tested against
//! every tracked object's bounding box and the ground plane. The nearest
//! hit wins; a ground hit (or nothing) is reported distinctly so callers
//! can treat it as a background click.

mod ray;

pub use ray::Ray;

use crate::camera::{Camera, Viewport};
use crate::scene::{ObjectId, Scene};

/// What a pointer position resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickTarget {
    /// The nearest hit is a tracked object.
    Object(ObjectId),
    /// The nearest hit is the ground plane.
    Ground,
    /// Nothing under the pointer.
    None,
}

impl PickTarget {
    /// The picked object, if any. Ground and empty space both yield
    /// `None`.
    #[must_use]
    pub fn object(self) -> Option<ObjectId> {
        match self {
            Self::Object(id) => Some(id),
            Self::Ground | Self::None => None,
        }
    }
}

/// Resolve a pixel position (origin top-left) to the nearest hit.
#[must_use]
pub fn pick(
    scene: &Scene,
    camera: &Camera,
    viewport: Viewport,
    x: f32,
    y: f32,
) -> PickTarget {
    let Some(ray) = Ray::from_screen(camera, viewport, x, y) else {
        log::trace!("pick: no ray under ({x}, {y})");
        return PickTarget::None;
    };
    pick_with_ray(scene, &ray)
}

/// Nearest hit along an already-built ray.
#[must_use]
pub fn pick_with_ray(scene: &Scene, ray: &Ray) -> PickTarget {
    let mut best: Option<(f32, PickTarget)> = None;

    for object in scene.objects() {
        if let Some(t) = ray.intersect_aabb(&object.bounds) {
            if best.is_none_or(|(best_t, _)| t < best_t) {
                best = Some((t, PickTarget::Object(object.id)));
            }
        }
    }

    if let Some(t) = scene.ground().and_then(|g| ray.intersect_ground(g)) {
        if best.is_none_or(|(best_t, _)| t < best_t) {
            best = Some((t, PickTarget::Ground));
        }
    }

    best.map_or(PickTarget::None, |(_, target)| target)
}

/// Resolve a pixel position to the nearest object, treating a ground hit
/// as no hit.
#[must_use]
pub fn pick_object(
    scene: &Scene,
    camera: &Camera,
    viewport: Viewport,
    x: f32,
    y: f32,
) -> Option<ObjectId> {
    pick(scene, camera, viewport, x, y).object()
}
