use glam::Vec3;

/// Extents at or below this are treated as zero volume.
const DEGENERATE_EPSILON: f32 = 1e-6;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box from two corners in any order.
    #[must_use]
    pub fn from_corners(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Box from a center and non-negative half-extents.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let half = half_extents.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Smallest box containing every point. `None` for an empty slice.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest
            .iter()
            .fold((*first, *first), |(lo, hi), p| (lo.min(*p), hi.max(*p)));
        Some(Self { min, max })
    }

    /// Box center.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half of the size along each axis.
    #[must_use]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// A box is degenerate when any extent is (near) zero or any corner is
    /// not finite. Such a box cannot frame an object.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        if !self.min.is_finite() || !self.max.is_finite() {
            return true;
        }
        self.size().min_element() <= DEGENERATE_EPSILON
    }

    /// The same box shifted by `delta`.
    #[must_use]
    pub fn translated(&self, delta: Vec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Whether `point` lies inside or on the box.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_are_normalized() {
        let b = Aabb::from_corners(Vec3::new(1.0, -1.0, 2.0), Vec3::ZERO);
        assert_eq!(b.min, Vec3::new(0.0, -1.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn center_and_extents() {
        let b = Aabb::from_center_half_extents(
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 2.0, 3.0),
        );
        assert_eq!(b.center(), Vec3::new(0.0, 1.0, 1.0));
        assert_eq!(b.size(), Vec3::new(2.0, 4.0, 6.0));
        assert!(b.contains(Vec3::new(0.5, 2.5, -1.0)));
        assert!(!b.contains(Vec3::new(1.5, 0.0, 0.0)));
    }

    #[test]
    fn flat_or_nan_boxes_are_degenerate() {
        let flat =
            Aabb::from_center_half_extents(Vec3::ZERO, Vec3::new(1.0, 0.0, 1.0));
        assert!(flat.is_degenerate());
        let nan = Aabb {
            min: Vec3::splat(f32::NAN),
            max: Vec3::ONE,
        };
        assert!(nan.is_degenerate());
        let solid = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        assert!(!solid.is_degenerate());
    }

    #[test]
    fn from_points_covers_all() {
        assert!(Aabb::from_points(&[]).is_none());
        let b = Aabb::from_points(&[
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-1.0, 2.0, 0.5),
        ])
        .unwrap();
        assert_eq!(b.min, Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(b.max, Vec3::new(1.0, 2.0, 0.5));
    }
}
