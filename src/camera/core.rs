use glam::{Mat4, Vec2, Vec3, Vec4};

/// Position, look-at target, and field of view of the camera at one
/// instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Eye position in world space.
    pub position: Vec3,
    /// Look-at target in world space.
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fovy: f32,
}

/// Drawable area in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Viewport of the given size; zero dimensions are raised to 1.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Width / height.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    /// Pixel coordinates (origin top-left, y down) to normalized device
    /// coordinates (origin center, y up).
    #[must_use]
    pub fn pixel_to_ndc(&self, x: f32, y: f32) -> Vec2 {
        Vec2::new(
            (x / self.width) * 2.0 - 1.0,
            -(y / self.height) * 2.0 + 1.0,
        )
    }

    /// Normalized device coordinates to pixel coordinates.
    #[must_use]
    pub fn ndc_to_pixel(&self, ndc: Vec2) -> Vec2 {
        let half_w = self.width / 2.0;
        let half_h = self.height / 2.0;
        Vec2::new(ndc.x * half_w + half_w, -(ndc.y * half_h) + half_h)
    }
}

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix and viewport size.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Viewport size in pixels (for screen-space overlays).
    pub viewport: [f32; 2],
    /// Padding for GPU alignment.
    pub(crate) _pad: [f32; 2],
}

impl Camera {
    /// Camera at `pose` with the given aspect ratio and clip planes.
    #[must_use]
    pub fn new(pose: CameraPose, aspect: f32, znear: f32, zfar: f32) -> Self {
        Self {
            eye: pose.position,
            target: pose.target,
            up: Vec3::Y,
            aspect,
            fovy: pose.fovy,
            znear,
            zfar,
        }
    }

    /// Snapshot of the current pose.
    #[must_use]
    pub fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.eye,
            target: self.target,
            fovy: self.fovy,
        }
    }

    /// Re-aim the camera at `point` without moving it.
    pub fn look_at(&mut self, point: Vec3) {
        self.target = point;
    }

    /// Recompute the aspect ratio for a new viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
    }

    /// World-to-view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// View-to-clip matrix. `perspective_rh` uses the [0,1] depth range
    /// (wgpu convention).
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to normalized device coordinates.
    ///
    /// Points behind the camera still divide by `w` and land somewhere
    /// outside (or mirrored across) the viewport.
    #[must_use]
    pub fn project(&self, world: Vec3) -> Vec3 {
        let clip = self.build_matrix() * world.extend(1.0);
        if clip.w.abs() <= f32::EPSILON {
            return Vec3::new(f32::MAX, f32::MAX, clip.z);
        }
        clip.truncate() / clip.w
    }

    /// World-space points on the near and far planes under an NDC
    /// position.
    #[must_use]
    pub fn unproject_ndc(&self, ndc: Vec2) -> (Vec3, Vec3) {
        let inv = self.build_matrix().inverse();
        let near = inv * Vec4::new(ndc.x, ndc.y, 0.0, 1.0);
        let far = inv * Vec4::new(ndc.x, ndc.y, 1.0, 1.0);
        (near.truncate() / near.w, far.truncate() / far.w)
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.0,
            viewport: [1.0, 1.0],
            _pad: [0.0; 2],
        }
    }

    /// Update uniform fields from the camera and viewport.
    pub fn update(&mut self, camera: &Camera, viewport: Viewport) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.viewport = [viewport.width, viewport.height];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> Camera {
        Camera::new(
            CameraPose {
                position: Vec3::new(0.0, 0.0, 10.0),
                target: Vec3::ZERO,
                fovy: 60.0,
            },
            1.0,
            0.1,
            100.0,
        )
    }

    #[test]
    fn target_projects_to_center() {
        let ndc = camera().project(Vec3::ZERO);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn pixel_ndc_mapping_round_trips_center_and_corner() {
        let vp = Viewport::new(800.0, 600.0);
        assert_eq!(vp.pixel_to_ndc(400.0, 300.0), Vec2::ZERO);
        assert_eq!(vp.pixel_to_ndc(0.0, 0.0), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.ndc_to_pixel(Vec2::new(1.0, -1.0)), Vec2::new(800.0, 600.0));
    }

    #[test]
    fn unprojected_ray_passes_through_target() {
        let cam = camera();
        let (near, far) = cam.unproject_ndc(Vec2::ZERO);
        let dir = (far - near).normalize();
        assert!((dir - Vec3::NEG_Z).length() < 1e-4);
        assert!(near.x.abs() < 1e-4 && near.y.abs() < 1e-4);
    }

    #[test]
    fn zero_viewport_is_clamped() {
        let vp = Viewport::new(0.0, 0.0);
        assert_eq!(vp.aspect(), 1.0);
    }
}
