use glam::Vec3;

use crate::camera::{Camera, Viewport};
use crate::scene::{Aabb, GroundPlane};

/// A half-line in world space with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Unit direction.
    pub direction: Vec3,
}

impl Ray {
    /// Ray from `origin` along `direction` (normalized here). `None` when
    /// the direction has no length.
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Option<Self> {
        let direction = direction.try_normalize()?;
        Some(Self { origin, direction })
    }

    /// Ray from the camera through a pixel of the viewport.
    ///
    /// The ray starts on the near plane and passes through the matching
    /// point on the far plane.
    #[must_use]
    pub fn from_screen(
        camera: &Camera,
        viewport: Viewport,
        x: f32,
        y: f32,
    ) -> Option<Self> {
        let ndc = viewport.pixel_to_ndc(x, y);
        let (near, far) = camera.unproject_ndc(ndc);
        if !near.is_finite() || !far.is_finite() {
            return None;
        }
        Self::new(near, far - near)
    }

    /// Point at distance `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Entry distance into `bounds` (slab test). A ray starting inside
    /// the box reports 0. `None` on a miss or when the box is behind.
    #[must_use]
    pub fn intersect_aabb(&self, bounds: &Aabb) -> Option<f32> {
        let inv = self.direction.recip();
        let t1 = (bounds.min - self.origin) * inv;
        let t2 = (bounds.max - self.origin) * inv;

        // NaN from 0 * inf (ray in a slab plane) is dropped by min/max.
        let t_near = t1.min(t2).max_element();
        let t_far = t1.max(t2).min_element();

        if t_far < 0.0 || t_near > t_far || t_near.is_nan() || t_far.is_nan() {
            return None;
        }
        Some(t_near.max(0.0))
    }

    /// Distance to the ground square, if the ray crosses it in front of
    /// the origin.
    #[must_use]
    pub fn intersect_ground(&self, ground: &GroundPlane) -> Option<f32> {
        if self.direction.y.abs() <= f32::EPSILON {
            return None;
        }
        let t = (ground.height - self.origin.y) / self.direction.y;
        if t < 0.0 {
            return None;
        }
        let hit = self.at(t);
        (hit.x.abs() <= ground.half_size && hit.z.abs() <= ground.half_size)
            .then_some(t)
    }
}
