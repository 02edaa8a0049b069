//! CPU-side instance data for the scene and overlay passes.
//!
//! Building these is pure, so it is tested without a GPU.

use crate::label::LabelProjector;
use crate::scene::{ObjectId, Scene};

/// Box color for unfocused objects.
const OBJECT_COLOR: [f32; 4] = [0.62, 0.66, 0.72, 1.0];
/// Box color for the focused (or focus-bound) object.
const FOCUS_COLOR: [f32; 4] = [0.95, 0.68, 0.25, 1.0];
/// Ground color.
const GROUND_COLOR: [f32; 4] = [0.22, 0.27, 0.22, 1.0];
/// Label background color.
const LABEL_COLOR: [f32; 4] = [0.08, 0.08, 0.1, 0.75];

/// One vertex of the unit cube mesh. Must match the WGSL vertex inputs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CubeVertex {
    /// Corner position in `[-1, 1]^3`.
    pub position: [f32; 3],
    /// Face normal.
    pub normal: [f32; 3],
}

/// Per-instance box data. Must match the WGSL instance inputs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BoxInstance {
    /// xyz = box center, w unused.
    pub center: [f32; 4],
    /// xyz = half extents, w unused.
    pub half_extents: [f32; 4],
    /// RGBA color.
    pub color: [f32; 4],
}

/// Per-instance label rectangle in pixels. Must match the WGSL inputs.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LabelInstance {
    /// x, y = top-left corner, z, w = width, height.
    pub rect: [f32; 4],
    /// RGBA color.
    pub color: [f32; 4],
}

/// Non-indexed unit cube: 6 faces, 2 triangles each, counter-clockwise
/// from outside.
#[must_use]
pub fn cube_vertices() -> Vec<CubeVertex> {
    // (normal, tangent u, tangent v) with u x v = normal.
    let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]),
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, -1.0], [0.0, 1.0, 0.0], [1.0, 0.0, 0.0]),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut vertices = Vec::with_capacity(36);
    for (n, u, v) in faces {
        for (a, b) in corners {
            let position = [
                n[0] + u[0] * a + v[0] * b,
                n[1] + u[1] * a + v[1] * b,
                n[2] + u[2] * a + v[2] * b,
            ];
            vertices.push(CubeVertex { position, normal: n });
        }
    }
    vertices
}

/// The ground mesh: the cube's top face flattened onto `y = 0`.
///
/// Single-sided: with back-face culling it is invisible from below, so a
/// camera framing an object from under the ground still sees the object.
#[must_use]
pub fn ground_vertices() -> Vec<CubeVertex> {
    cube_vertices()
        .into_iter()
        .filter(|v| v.normal == [0.0, 1.0, 0.0])
        .map(|v| CubeVertex {
            position: [v.position[0], 0.0, v.position[2]],
            normal: v.normal,
        })
        .collect()
}

/// Instance placing [`ground_vertices`] at the scene's ground plane.
#[must_use]
pub fn ground_instance(scene: &Scene) -> Option<BoxInstance> {
    scene.ground().map(|ground| BoxInstance {
        center: [0.0, ground.height, 0.0, 0.0],
        half_extents: [ground.half_size, 1.0, ground.half_size, 0.0],
        color: GROUND_COLOR,
    })
}

/// Instances for the ground (first, when present) followed by every
/// object. `highlight` is drawn in the focus color.
#[must_use]
pub fn box_instances(scene: &Scene, highlight: Option<ObjectId>) -> Vec<BoxInstance> {
    let mut instances = Vec::with_capacity(scene.len() + 1);
    instances.extend(ground_instance(scene));
    for object in scene.objects() {
        let bounds = object.framing_bounds();
        let color = if highlight == Some(object.id) {
            FOCUS_COLOR
        } else {
            OBJECT_COLOR
        };
        instances.push(BoxInstance {
            center: bounds.center().extend(0.0).to_array(),
            half_extents: bounds.half_extents().extend(0.0).to_array(),
            color,
        });
    }
    instances
}

/// Rectangles for every visible label, ordered by object id so overlaps
/// draw consistently.
#[must_use]
pub fn label_instances(labels: &LabelProjector) -> Vec<LabelInstance> {
    let mut visible: Vec<_> = labels.labels().filter(|l| l.is_visible()).collect();
    visible.sort_unstable_by_key(|l| l.object());
    visible
        .into_iter()
        .map(|label| {
            let pos = label.screen_pos();
            let size = label.size();
            LabelInstance {
                rect: [pos.x, pos.y, size.x, size.y],
                color: LABEL_COLOR,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::label::OverlayLabel;

    #[test]
    fn cube_faces_wind_outward() {
        let vertices = cube_vertices();
        assert_eq!(vertices.len(), 36);
        for tri in vertices.chunks(3) {
            let a = Vec3::from_array(tri[0].position);
            let b = Vec3::from_array(tri[1].position);
            let c = Vec3::from_array(tri[2].position);
            let n = Vec3::from_array(tri[0].normal);
            assert!((b - a).cross(c - a).dot(n) > 0.0);
        }
    }

    #[test]
    fn ground_is_single_sided_and_faces_up() {
        let vertices = ground_vertices();
        assert_eq!(vertices.len(), 6);
        for tri in vertices.chunks(3) {
            let a = Vec3::from_array(tri[0].position);
            let b = Vec3::from_array(tri[1].position);
            let c = Vec3::from_array(tri[2].position);
            assert!((b - a).cross(c - a).dot(Vec3::Y) > 0.0);
        }
        assert!(vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn ground_instance_sits_on_the_plane() {
        let mut scene = Scene::with_ground();
        scene.set_ground(Some(crate::scene::GroundPlane {
            height: 2.0,
            half_size: 10.0,
        }));
        let ground = ground_instance(&scene).unwrap();
        assert_eq!(ground.center[1], 2.0);
        assert_eq!(ground.half_extents[0], 10.0);
        assert_eq!(ground_instance(&Scene::new()), None);
    }

    #[test]
    fn ground_comes_first_and_highlight_is_colored() {
        let mut scene = Scene::with_ground();
        let a = scene.add_box("A", Vec3::ONE, Vec3::splat(2.0));
        let _ = scene.add_box("B", Vec3::X * 5.0, Vec3::splat(2.0));
        let instances = box_instances(&scene, Some(a));
        assert_eq!(instances.len(), 3);
        assert_eq!(instances[0].color, GROUND_COLOR);
        assert_eq!(instances[1].color, FOCUS_COLOR);
        assert_eq!(instances[2].color, OBJECT_COLOR);
        assert_eq!(instances[1].half_extents, [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn hidden_labels_are_not_drawn() {
        let mut labels = LabelProjector::new();
        labels.register(ObjectId(1), "B", Box::new(OverlayLabel::new(Vec2::new(30.0, 10.0))));
        labels.register(ObjectId(0), "A", Box::new(OverlayLabel::new(Vec2::new(20.0, 10.0))));
        let rects = label_instances(&labels);
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].rect[2], 20.0);
        labels.set_visible(false);
        assert!(label_instances(&labels).is_empty());
    }
}
