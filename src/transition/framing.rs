use glam::Vec3;

use crate::error::Degradation;
use crate::options::FramingOptions;
use crate::scene::TrackedObject;

/// Camera placement that frames one object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusPose {
    /// Eye position.
    pub position: Vec3,
    /// Look-at point.
    pub look_at: Vec3,
}

/// Compute the framed view of `object`.
///
/// The eye sits at `center + size * extent_scale + bias` and looks at
/// `center + look_at_offset`. Objects without usable bounds are framed as
/// a point at their position. The eye is never closer to the center than
/// `min_distance`.
#[must_use]
pub fn focus_pose(object: &TrackedObject, framing: &FramingOptions) -> FocusPose {
    if object.bounds.is_degenerate() {
        Degradation::DegenerateBounds(object.id).report();
    }
    let bounds = object.framing_bounds();
    let center = bounds.center();
    let size = bounds.size();

    let extent_scale = Vec3::from_array(framing.extent_scale);
    let bias = Vec3::from_array(framing.bias);
    let offset = size * extent_scale + bias;

    let min_distance = framing.min_distance.max(0.0);
    let offset = if offset.length() < min_distance {
        let direction = offset
            .try_normalize()
            .or_else(|| bias.try_normalize())
            .unwrap_or(Vec3::Z);
        direction * min_distance
    } else {
        offset
    };

    FocusPose {
        position: center + offset,
        look_at: center + Vec3::from_array(framing.look_at_offset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Aabb, ObjectId};

    fn object(position: Vec3, bounds: Aabb) -> TrackedObject {
        TrackedObject {
            id: ObjectId(0),
            name: "A".into(),
            position,
            bounds,
        }
    }

    #[test]
    fn default_framing_formula() {
        let obj = object(
            Vec3::new(0.0, 1.0, 1.0),
            Aabb::from_center_half_extents(Vec3::new(0.0, 1.0, 1.0), Vec3::ONE),
        );
        let pose = focus_pose(&obj, &FramingOptions::default());
        // size (2,2,2) * (0.5,1.5,2.5) + (0,-15,-20) + center
        assert!((pose.position - Vec3::new(1.0, -11.0, -14.0)).length() < 1e-5);
        assert!((pose.look_at - Vec3::new(5.0, 1.0, 1.0)).length() < 1e-5);
    }

    #[test]
    fn degenerate_bounds_frame_the_position() {
        let position = Vec3::new(4.0, 2.0, -3.0);
        let obj = object(position, Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ZERO));
        let pose = focus_pose(&obj, &FramingOptions::default());
        assert!((pose.position - (position + Vec3::new(0.0, -15.0, -20.0))).length() < 1e-5);
    }

    #[test]
    fn short_offset_is_stretched_to_min_distance() {
        let framing = FramingOptions {
            bias: [0.0, 0.0, 1.0],
            min_distance: 5.0,
            ..FramingOptions::default()
        };
        let obj = object(Vec3::ZERO, Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ZERO));
        let pose = focus_pose(&obj, &framing);
        assert!((pose.position - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
    }

    #[test]
    fn zero_offset_and_bias_fall_back_to_plus_z() {
        let framing = FramingOptions {
            bias: [0.0; 3],
            min_distance: 5.0,
            ..FramingOptions::default()
        };
        let obj = object(Vec3::X, Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ZERO));
        let pose = focus_pose(&obj, &framing);
        assert!((pose.position - Vec3::new(1.0, 0.0, 5.0)).length() < 1e-5);
    }
}
