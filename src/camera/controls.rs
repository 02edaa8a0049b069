use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use super::core::Camera;
use crate::options::ControlsOptions;

/// Keeps the polar angle away from the poles where `look_at` degenerates.
const POLE_EPSILON: f32 = 1e-4;

/// Pending rotations below this are treated as settled.
const SETTLE_EPSILON: f32 = 1e-5;

/// Orbit-style camera controls: the camera circles `target` on a sphere.
///
/// Input (rotate, dolly) accumulates into pending deltas that
/// [`update`](Self::update) applies once per frame, with optional damping.
/// Limits are enforced when queued input is applied and once after
/// construction or new options. A camera moved directly (a ground pan, an
/// animation) keeps its position and is only re-aimed at `target`.
/// While `enabled` is false, input is ignored and no limits apply.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Whether user input and orbit limits are active.
    pub enabled: bool,
    /// Orbit center; the camera looks here after every update.
    pub target: Vec3,
    min_distance: f32,
    max_distance: f32,
    min_polar_angle: f32,
    max_polar_angle: f32,
    damping_factor: f32,
    rotate_speed: f32,
    zoom_speed: f32,
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
    /// Limits changed since they were last applied.
    limits_dirty: bool,
}

impl OrbitControls {
    /// Controls orbiting `target` with limits from `options`.
    #[must_use]
    pub fn new(target: Vec3, options: &ControlsOptions) -> Self {
        let mut controls = Self {
            enabled: true,
            target,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            damping_factor: 0.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
            limits_dirty: true,
        };
        controls.apply_options(options);
        controls
    }

    /// Re-read limits and speeds from options.
    pub fn apply_options(&mut self, options: &ControlsOptions) {
        self.min_distance = options.min_distance.max(0.0);
        self.max_distance = options.max_distance.max(self.min_distance);
        self.min_polar_angle = options.min_polar_angle.clamp(0.0, PI);
        self.max_polar_angle =
            options.max_polar_angle.clamp(self.min_polar_angle, PI);
        self.damping_factor = if options.enable_damping {
            options.damping_factor.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.rotate_speed = options.rotate_speed;
        self.zoom_speed = options.zoom_speed;
        self.limits_dirty = true;
    }

    /// Queue an orbit by a pointer drag of `delta` pixels.
    ///
    /// A drag across the full viewport height is one full turn.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if !self.enabled {
            return;
        }
        let per_pixel = TAU / viewport_height.max(1.0) * self.rotate_speed;
        self.pending_theta -= delta.x * per_pixel;
        self.pending_phi -= delta.y * per_pixel;
    }

    /// Queue a dolly (positive = toward the target).
    pub fn dolly(&mut self, delta: f32) {
        if !self.enabled {
            return;
        }
        self.pending_scale *= (1.0 - delta * self.zoom_speed).clamp(0.1, 10.0);
    }

    /// Drop any queued rotation or dolly.
    pub fn stop(&mut self) {
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
    }

    /// Whether queued rotation is still being damped out.
    #[must_use]
    pub fn is_settling(&self) -> bool {
        self.pending_theta.abs() > SETTLE_EPSILON
            || self.pending_phi.abs() > SETTLE_EPSILON
            || (self.pending_scale - 1.0).abs() > SETTLE_EPSILON
    }

    /// Apply queued input and limits, then aim the camera at `target`.
    ///
    /// With nothing queued and limits already applied, the eye is left
    /// exactly where it is. Returns `true` if the eye moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let moved = self.enabled && self.orbit(camera);
        camera.look_at(self.target);
        moved
    }

    fn orbit(&mut self, camera: &mut Camera) -> bool {
        if !self.is_settling() && !self.limits_dirty {
            return false;
        }
        self.limits_dirty = false;
        let offset = camera.eye - self.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            self.stop();
            return false;
        }

        let theta = offset.x.atan2(offset.z);
        let phi = (offset.y / radius).clamp(-1.0, 1.0).acos();

        let step = if self.damping_factor > 0.0 {
            self.damping_factor
        } else {
            1.0
        };
        let new_theta = theta + self.pending_theta * step;
        let new_phi = (phi + self.pending_phi * step)
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(POLE_EPSILON, PI - POLE_EPSILON);
        let scale = 1.0 + (self.pending_scale - 1.0) * step;
        let new_radius =
            (radius * scale).clamp(self.min_distance, self.max_distance);

        if self.damping_factor > 0.0 {
            self.pending_theta *= 1.0 - self.damping_factor;
            self.pending_phi *= 1.0 - self.damping_factor;
            self.pending_scale = 1.0 + (self.pending_scale - 1.0) * (1.0 - self.damping_factor);
            if !self.is_settling() {
                self.stop();
            }
        } else {
            self.stop();
        }

        let unchanged = (new_theta - theta).abs() <= SETTLE_EPSILON
            && (new_phi - phi).abs() <= SETTLE_EPSILON
            && (new_radius - radius).abs() <= SETTLE_EPSILON * radius.max(1.0);
        if unchanged {
            return false;
        }

        let sin_phi = new_phi.sin();
        let offset = Vec3::new(
            new_radius * sin_phi * new_theta.sin(),
            new_radius * new_phi.cos(),
            new_radius * sin_phi * new_theta.cos(),
        );
        camera.eye = self.target + offset;
        true
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;
    use crate::camera::core::CameraPose;

    fn options() -> ControlsOptions {
        ControlsOptions {
            min_distance: 18.0,
            max_distance: 50.0,
            max_polar_angle: FRAC_PI_2,
            enable_damping: false,
            ..ControlsOptions::default()
        }
    }

    fn camera_at(position: Vec3) -> Camera {
        Camera::new(
            CameraPose {
                position,
                target: Vec3::ZERO,
                fovy: 75.0,
            },
            1.0,
            1.0,
            1000.0,
        )
    }

    #[test]
    fn distance_is_clamped_to_limits() {
        let mut controls = OrbitControls::new(Vec3::ZERO, &options());
        let mut cam = camera_at(Vec3::new(0.0, 25.0, 45.0));
        assert!(controls.update(&mut cam));
        assert!((cam.eye.length() - 50.0).abs() < 1e-3);

        let mut controls = OrbitControls::new(Vec3::ZERO, &options());
        let mut near = camera_at(Vec3::new(0.0, 0.0, 5.0));
        assert!(controls.update(&mut near));
        assert!((near.eye.length() - 18.0).abs() < 1e-3);
    }

    #[test]
    fn polar_angle_keeps_camera_above_horizon() {
        let mut controls = OrbitControls::new(Vec3::ZERO, &options());
        let mut cam = camera_at(Vec3::new(0.0, -10.0, 20.0));
        assert!(controls.update(&mut cam));
        assert!(cam.eye.y >= -1e-3);
    }

    #[test]
    fn settled_camera_is_untouched() {
        let mut controls = OrbitControls::new(Vec3::ZERO, &options());
        let start = Vec3::new(3.0, 20.0, 25.0);
        let mut cam = camera_at(start);
        assert!(!controls.update(&mut cam));
        assert_eq!(cam.eye, start);
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn rotate_orbits_at_constant_distance() {
        let mut controls = OrbitControls::new(Vec3::ZERO, &options());
        let mut cam = camera_at(Vec3::new(0.0, 20.0, 20.0));
        let before = cam.eye.length();
        controls.rotate(Vec2::new(100.0, 0.0), 600.0);
        assert!(controls.update(&mut cam));
        assert!((cam.eye.length() - before).abs() < 1e-3);
        assert!(cam.eye.x.abs() > 1.0);
    }

    #[test]
    fn disabled_controls_ignore_input_and_limits() {
        let mut controls = OrbitControls::new(Vec3::ZERO, &options());
        controls.enabled = false;
        controls.target = Vec3::new(5.0, 0.0, 0.0);
        let start = Vec3::new(0.0, -15.0, -20.0);
        let mut cam = camera_at(start);
        controls.rotate(Vec2::new(50.0, 50.0), 600.0);
        controls.dolly(1.0);
        assert!(!controls.update(&mut cam));
        assert_eq!(cam.eye, start);
        assert_eq!(cam.target, Vec3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn direct_moves_are_not_pulled_back_onto_limits() {
        let mut controls = OrbitControls::new(Vec3::ZERO, &options());
        let mut cam = camera_at(Vec3::new(0.0, 30.0, 40.0));
        let _ = controls.update(&mut cam);
        cam.eye.z += 5.0;
        let moved = cam.eye;
        assert!(!controls.update(&mut cam));
        assert!(!controls.update(&mut cam));
        assert_eq!(cam.eye, moved);
        assert!(cam.eye.length() > 50.0);

        controls.dolly(0.1);
        assert!(controls.update(&mut cam));
        assert!(cam.eye.length() <= 50.0 + 1e-3);
    }

    #[test]
    fn new_options_reapply_limits() {
        let mut controls = OrbitControls::new(Vec3::ZERO, &options());
        let mut cam = camera_at(Vec3::new(0.0, 30.0, 40.0));
        let _ = controls.update(&mut cam);
        controls.apply_options(&ControlsOptions {
            max_distance: 30.0,
            ..options()
        });
        assert!(controls.update(&mut cam));
        assert!((cam.eye.length() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn damping_spreads_rotation_over_frames() {
        let opts = ControlsOptions {
            enable_damping: true,
            damping_factor: 0.25,
            ..options()
        };
        let mut controls = OrbitControls::new(Vec3::ZERO, &opts);
        let mut cam = camera_at(Vec3::new(0.0, 20.0, 20.0));
        controls.rotate(Vec2::new(60.0, 0.0), 600.0);
        assert!(controls.update(&mut cam));
        assert!(controls.is_settling());
        for _ in 0..200 {
            let _ = controls.update(&mut cam);
        }
        assert!(!controls.is_settling());
    }
}
