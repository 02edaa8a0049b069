//! Focus state machine tying picking, transitions, orbit controls, and
//! labels together.
//!
//! [`InteractionController`] owns the camera and everything that writes
//! to it. Pointer and keyboard input arrive as [`ViewCommand`]s; the
//! controller decides whether they pick, drag, or animate, and
//! [`frame`](InteractionController::frame) advances the world once per
//! display refresh in a fixed order: transition tick, completion, controls
//! update, label projection.

mod command;
mod navigation;
mod pointer;

use std::collections::VecDeque;

pub use command::{ViewCommand, ViewEvent};

use crate::camera::{Camera, CameraPose, OrbitControls, Viewport};
use crate::label::LabelProjector;
use crate::options::Options;
use crate::scene::{ObjectId, Scene};
use crate::transition::{
    Destination, TransitionEngine, TransitionId, TransitionOutcome,
};

/// Where the camera is, from the interaction point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusState {
    /// Overview; free orbit and drag.
    #[default]
    Idle,
    /// A camera transition is running.
    Transitioning {
        /// Where it is heading.
        toward: Destination,
    },
    /// Settled on one object.
    Focused(ObjectId),
}

impl FocusState {
    /// Whether free camera input is allowed.
    #[must_use]
    pub fn is_idle(self) -> bool {
        self == Self::Idle
    }

    /// The object clicks are routed against: the focused object, or the
    /// one a transition is heading to. `None` at (or toward) the
    /// overview.
    #[must_use]
    pub fn routing_object(self) -> Option<ObjectId> {
        match self {
            Self::Focused(id)
            | Self::Transitioning {
                toward: Destination::Object(id),
            } => Some(id),
            Self::Idle
            | Self::Transitioning {
                toward: Destination::Overview,
            } => None,
        }
    }
}

/// Camera-focus interaction controller.
///
/// Invariants kept by every method:
/// - orbit controls are enabled iff the state is [`FocusState::Idle`];
/// - labels are visible iff the state is [`FocusState::Idle`];
/// - at most one transition runs, and only its completion is honored.
#[derive(Debug)]
pub struct InteractionController {
    camera: Camera,
    controls: OrbitControls,
    transitions: TransitionEngine,
    labels: LabelProjector,
    focus: FocusState,
    /// Transition whose completion will be honored.
    current: Option<TransitionId>,
    viewport: Viewport,
    drag_scale: f32,
    events: VecDeque<ViewEvent>,
}

impl InteractionController {
    /// Controller with the camera at the configured startup pose.
    ///
    /// The controls settle the camera into their limits once before the
    /// overview pose is recorded, so returning to the overview never
    /// fights the limits.
    #[must_use]
    pub fn new(options: &Options, viewport: Viewport) -> Self {
        let camera_options = &options.camera;
        let mut camera = Camera::new(
            camera_options.initial_pose(),
            viewport.aspect(),
            camera_options.znear,
            camera_options.zfar,
        );
        let mut controls =
            OrbitControls::new(camera.target, &options.controls);
        let _ = controls.update(&mut camera);
        let overview = camera.pose();
        log::debug!(
            "overview pose recorded at {} looking at {}",
            overview.position,
            overview.target
        );

        Self {
            camera,
            controls,
            transitions: TransitionEngine::new(
                overview,
                options.transition.clone(),
                options.framing.clone(),
            ),
            labels: LabelProjector::new(),
            focus: FocusState::Idle,
            current: None,
            viewport,
            drag_scale: options.controls.drag_scale,
            events: VecDeque::new(),
        }
    }

    /// Re-read options. The overview pose and a running transition are
    /// kept.
    pub fn apply_options(&mut self, options: &Options) {
        self.controls.apply_options(&options.controls);
        self.transitions
            .set_options(options.transition.clone(), options.framing.clone());
        self.drag_scale = options.controls.drag_scale;
        self.camera.fovy = options.camera.fovy;
        self.camera.znear = options.camera.znear;
        self.camera.zfar = options.camera.zfar;
    }

    /// Dispatch one command.
    pub fn execute(&mut self, scene: &Scene, command: ViewCommand) {
        match command {
            ViewCommand::Click { x, y } => self.handle_click(scene, x, y),
            ViewCommand::PanGround { delta } => self.pan_ground(delta),
            ViewCommand::Orbit { delta } => self.orbit(delta),
            ViewCommand::Dolly { delta } => self.dolly(delta),
            ViewCommand::CycleFocus => self.cycle_focus(scene),
            ViewCommand::ResetView => self.reset_view(),
            ViewCommand::FocusOn { object } => self.focus_on(scene, object),
            ViewCommand::Resize { width, height } => {
                self.resize(Viewport::new(width as f32, height as f32));
            }
        }
    }

    /// Advance one frame by `dt` seconds.
    pub fn frame(&mut self, scene: &Scene, dt: f32) {
        if let Some(outcome) =
            self.transitions
                .tick(dt, &mut self.camera, &mut self.controls)
        {
            self.complete_transition(outcome);
        }
        let _ = self.controls.update(&mut self.camera);
        self.labels.update(scene, &self.camera, self.viewport);
    }

    /// Settle into a transition's destination: focus state, label
    /// visibility, and controls change together. Outcomes of superseded
    /// transitions are discarded.
    pub fn complete_transition(&mut self, outcome: TransitionOutcome) {
        if self.current != Some(outcome.id) {
            log::debug!("ignoring stale completion of {}", outcome.id);
            return;
        }
        self.current = None;
        match outcome.destination {
            Destination::Object(id) => {
                self.focus = FocusState::Focused(id);
                self.labels.set_visible(false);
                self.controls.enabled = false;
                self.events.push_back(ViewEvent::Focused(id));
                log::info!("focused on {id}");
            }
            Destination::Overview => {
                self.focus = FocusState::Idle;
                self.labels.set_visible(true);
                self.controls.stop();
                self.controls.enabled = true;
                self.events.push_back(ViewEvent::OverviewRestored);
                log::info!("overview restored");
            }
        }
    }

    /// Adopt a new drawable size. Focus state is untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.resize(viewport);
        log::debug!("viewport resized to {}x{}", viewport.width, viewport.height);
    }

    /// Take all queued notifications.
    pub fn drain_events(&mut self) -> impl Iterator<Item = ViewEvent> + '_ {
        self.events.drain(..)
    }

    /// The camera.
    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// The orbit controls.
    #[must_use]
    pub fn controls(&self) -> &OrbitControls {
        &self.controls
    }

    /// The label projector.
    #[must_use]
    pub fn labels(&self) -> &LabelProjector {
        &self.labels
    }

    /// Mutable label projector, for registering and removing labels.
    pub fn labels_mut(&mut self) -> &mut LabelProjector {
        &mut self.labels
    }

    /// The transition engine.
    #[must_use]
    pub fn transitions(&self) -> &TransitionEngine {
        &self.transitions
    }

    /// Current focus state.
    #[must_use]
    pub fn focus_state(&self) -> FocusState {
        self.focus
    }

    /// Current viewport.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Pose recorded at startup that reset transitions return to.
    #[must_use]
    pub fn overview_pose(&self) -> CameraPose {
        self.transitions.overview_pose()
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec2, Vec3};

    use super::*;
    use crate::label::OverlayLabel;
    use crate::transition::focus_pose;

    const DT: f32 = 1.0 / 60.0;

    struct Fixture {
        scene: Scene,
        controller: InteractionController,
        a: ObjectId,
        b: ObjectId,
    }

    fn fixture() -> Fixture {
        let mut scene = Scene::with_ground();
        let a = scene.add_box("Building A", Vec3::new(0.0, 1.0, 1.0), Vec3::splat(2.0));
        let b = scene.add_box("Building B", Vec3::new(-20.0, 3.0, 0.0), Vec3::new(4.0, 6.0, 4.0));
        let mut controller =
            InteractionController::new(&Options::default(), Viewport::new(800.0, 600.0));
        controller.labels_mut().register_scene(&scene);
        controller.frame(&scene, 0.0);
        Fixture {
            scene,
            controller,
            a,
            b,
        }
    }

    impl Fixture {
        /// Run frames until no transition is running.
        fn settle(&mut self) {
            for _ in 0..600 {
                self.controller.frame(&self.scene, DT);
                if !self.controller.transitions().is_active() {
                    return;
                }
            }
        }

        fn screen_point_of(&self, id: ObjectId) -> Vec2 {
            let object = self.scene.object(id).unwrap();
            let ndc = self.controller.camera().project(object.position);
            self.controller.viewport().ndc_to_pixel(ndc.truncate())
        }

        fn click_object(&mut self, id: ObjectId) {
            let p = self.screen_point_of(id);
            self.controller
                .execute(&self.scene, ViewCommand::Click { x: p.x, y: p.y });
        }

        fn events(&mut self) -> Vec<ViewEvent> {
            self.controller.drain_events().collect()
        }
    }

    fn assert_idle_at_overview(controller: &InteractionController) {
        let overview = controller.overview_pose();
        assert_eq!(controller.focus_state(), FocusState::Idle);
        assert!((controller.camera().eye - overview.position).length() < 1e-4);
        assert!((controller.camera().target - overview.target).length() < 1e-4);
        assert!(controller.labels().is_visible());
        assert!(controller.controls().enabled);
    }

    #[test]
    fn overview_is_recorded_inside_orbit_limits() {
        let f = fixture();
        let overview = f.controller.overview_pose();
        let distance = (overview.position - overview.target).length();
        assert!(distance <= 50.0 + 1e-3);
        assert_idle_at_overview(&f.controller);
    }

    #[test]
    fn clicking_object_while_idle_focuses_it() {
        let mut f = fixture();
        let a = f.a;
        f.click_object(a);
        assert_eq!(
            f.controller.focus_state(),
            FocusState::Transitioning {
                toward: Destination::Object(a)
            }
        );
        assert!(!f.controller.controls().enabled);
        assert!(!f.controller.labels().is_visible());

        f.settle();
        assert_eq!(f.controller.focus_state(), FocusState::Focused(a));
        assert!(!f.controller.labels().is_visible());
        assert!(!f.controller.controls().enabled);
        assert_eq!(f.events(), vec![ViewEvent::FocusStarted(a), ViewEvent::Focused(a)]);
    }

    #[test]
    fn building_at_0_1_1_is_framed_by_its_offset_pose() {
        let mut f = fixture();
        let a = f.a;
        f.click_object(a);
        f.settle();
        let expected = focus_pose(f.scene.object(a).unwrap(), &Default::default());
        assert!((expected.position - Vec3::new(1.0, -11.0, -14.0)).length() < 1e-4);
        assert!((f.controller.camera().eye - expected.position).length() < 1e-3);
        assert!((f.controller.camera().target - expected.look_at).length() < 1e-4);
        assert!(f.controller.labels().labels().all(|l| !l.is_visible()));
    }

    #[test]
    fn background_click_while_focused_returns_to_overview() {
        let mut f = fixture();
        let a = f.a;
        f.click_object(a);
        f.settle();
        f.controller
            .execute(&f.scene, ViewCommand::Click { x: 1.0, y: 1.0 });
        assert_eq!(
            f.controller.focus_state(),
            FocusState::Transitioning {
                toward: Destination::Overview
            }
        );
        f.settle();
        assert_idle_at_overview(&f.controller);
    }

    #[test]
    fn background_click_while_idle_is_a_no_op() {
        let mut f = fixture();
        let before = f.controller.camera().clone();
        f.controller
            .execute(&f.scene, ViewCommand::Click { x: 1.0, y: 1.0 });
        assert_eq!(f.controller.focus_state(), FocusState::Idle);
        assert!(!f.controller.transitions().is_active());
        assert_eq!(f.controller.camera(), &before);
    }

    #[test]
    fn reset_view_while_idle_is_idempotent() {
        let mut f = fixture();
        let before = f.controller.camera().clone();
        f.controller.reset_view();
        f.controller.reset_view();
        assert!(!f.controller.transitions().is_active());
        assert_eq!(f.controller.focus_state(), FocusState::Idle);
        assert_eq!(f.controller.camera(), &before);
        assert!(f.events().is_empty());
    }

    #[test]
    fn label_clicked_twice_toggles_back_to_overview() {
        let mut f = fixture();
        let a = f.a;
        f.controller.handle_label_click(&f.scene, a);
        f.settle();
        assert_eq!(f.controller.focus_state(), FocusState::Focused(a));
        f.controller.handle_label_click(&f.scene, a);
        f.settle();
        assert_idle_at_overview(&f.controller);
        assert_eq!(
            f.events(),
            vec![
                ViewEvent::FocusStarted(a),
                ViewEvent::Focused(a),
                ViewEvent::OverviewStarted,
                ViewEvent::OverviewRestored,
            ]
        );
    }

    #[test]
    fn label_click_through_hit_test_focuses() {
        let mut f = fixture();
        let a = f.a;
        let label_pos = f.controller.labels().screen_position(a).unwrap();
        let size = f.controller.labels().get(a).unwrap().size();
        let center = label_pos + size * 0.5;
        f.controller
            .execute(&f.scene, ViewCommand::Click { x: center.x, y: center.y });
        assert_eq!(
            f.controller.focus_state(),
            FocusState::Transitioning {
                toward: Destination::Object(a)
            }
        );
    }

    #[test]
    fn retarget_goes_straight_to_second_object() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        f.controller.focus_on(&f.scene, a);
        f.settle();
        let _ = f.events();

        f.controller.handle_label_click(&f.scene, b);
        for _ in 0..600 {
            f.controller.frame(&f.scene, DT);
            assert_ne!(f.controller.focus_state(), FocusState::Idle);
            assert!(!f.controller.labels().is_visible());
            if !f.controller.transitions().is_active() {
                break;
            }
        }
        assert_eq!(f.controller.focus_state(), FocusState::Focused(b));
        assert_eq!(f.events(), vec![ViewEvent::FocusStarted(b), ViewEvent::Focused(b)]);
    }

    #[test]
    fn superseded_transition_never_completes() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        f.controller.focus_on(&f.scene, a);
        let first = f.controller.transitions().current_id().unwrap();
        for _ in 0..10 {
            f.controller.frame(&f.scene, DT);
        }
        f.controller.focus_on(&f.scene, b);

        // A late completion for the first transition is ignored.
        f.controller.complete_transition(TransitionOutcome {
            id: first,
            destination: Destination::Object(a),
        });
        assert_eq!(
            f.controller.focus_state(),
            FocusState::Transitioning {
                toward: Destination::Object(b)
            }
        );

        f.settle();
        let expected = focus_pose(f.scene.object(b).unwrap(), &Default::default());
        assert!((f.controller.camera().eye - expected.position).length() < 1e-3);
        let events = f.events();
        assert_eq!(events.iter().filter(|e| matches!(e, ViewEvent::Focused(_))).count(), 1);
        assert!(!events.contains(&ViewEvent::Focused(a)));
    }

    #[test]
    fn pan_drag_moves_camera_by_exact_ground_delta() {
        let mut f = fixture();
        let before = f.controller.camera().eye;
        let target = f.controller.controls().target;
        let delta = Vec2::new(50.0, 100.0);
        f.controller.execute(&f.scene, ViewCommand::PanGround { delta });
        let k = Options::default().controls.drag_scale;
        let moved = f.controller.camera().eye - before;
        assert!((moved - Vec3::new(-delta.x * k, 0.0, -delta.y * k)).length() < 1e-5);
        assert_eq!(f.controller.controls().target, target);
        assert_eq!(f.controller.camera().target, target);
    }

    #[test]
    fn pan_away_from_target_is_not_clamped_to_orbit_limits() {
        let mut f = fixture();
        let before = f.controller.camera().eye;
        let overview = f.controller.overview_pose();
        assert!(((before - overview.target).length() - 50.0).abs() < 1e-3);
        let delta = Vec2::new(0.0, -100.0);
        f.controller.execute(&f.scene, ViewCommand::PanGround { delta });
        let k = Options::default().controls.drag_scale;
        let expected = Vec3::new(0.0, 0.0, -delta.y * k);
        assert!((f.controller.camera().eye - before - expected).length() < 1e-5);

        // Later frames keep the panned position.
        for _ in 0..10 {
            f.controller.frame(&f.scene, DT);
        }
        assert!((f.controller.camera().eye - before - expected).length() < 1e-5);
        assert!((f.controller.camera().eye - overview.target).length() > 50.0);
    }

    #[test]
    fn drags_are_ignored_unless_idle() {
        let mut f = fixture();
        let a = f.a;
        f.controller.focus_on(&f.scene, a);
        f.controller.frame(&f.scene, DT);
        let eye = f.controller.camera().eye;
        f.controller.execute(
            &f.scene,
            ViewCommand::PanGround {
                delta: Vec2::new(100.0, 100.0),
            },
        );
        f.controller.execute(
            &f.scene,
            ViewCommand::Orbit {
                delta: Vec2::new(100.0, 0.0),
            },
        );
        f.controller.execute(&f.scene, ViewCommand::Dolly { delta: 1.0 });
        assert_eq!(f.controller.camera().eye, eye);
        assert!(!f.controller.controls().is_settling());
    }

    #[test]
    fn orbit_while_idle_moves_camera_around_target() {
        let mut f = fixture();
        let before = f.controller.camera().eye;
        let target = f.controller.controls().target;
        f.controller.execute(
            &f.scene,
            ViewCommand::Orbit {
                delta: Vec2::new(40.0, 0.0),
            },
        );
        for _ in 0..120 {
            f.controller.frame(&f.scene, DT);
        }
        let after = f.controller.camera().eye;
        assert!((after - before).length() > 1e-2);
        let r0 = (before - target).length();
        let r1 = (after - target).length();
        assert!((r0 - r1).abs() < 1e-2);
    }

    #[test]
    fn focus_on_same_target_is_a_no_op() {
        let mut f = fixture();
        let a = f.a;
        f.controller.focus_on(&f.scene, a);
        let id = f.controller.transitions().current_id();
        f.controller.focus_on(&f.scene, a);
        assert_eq!(f.controller.transitions().current_id(), id);
        f.settle();
        f.controller.focus_on(&f.scene, a);
        assert!(!f.controller.transitions().is_active());
        assert_eq!(f.controller.focus_state(), FocusState::Focused(a));
    }

    #[test]
    fn unknown_object_is_ignored() {
        let mut f = fixture();
        f.controller.focus_on(&f.scene, ObjectId(999));
        assert_eq!(f.controller.focus_state(), FocusState::Idle);
        assert!(!f.controller.transitions().is_active());
    }

    #[test]
    fn cycle_focus_walks_objects_then_returns_home() {
        let mut f = fixture();
        let (a, b) = (f.a, f.b);
        f.controller.execute(&f.scene, ViewCommand::CycleFocus);
        f.settle();
        assert_eq!(f.controller.focus_state(), FocusState::Focused(a));
        f.controller.execute(&f.scene, ViewCommand::CycleFocus);
        f.settle();
        assert_eq!(f.controller.focus_state(), FocusState::Focused(b));
        f.controller.execute(&f.scene, ViewCommand::CycleFocus);
        f.settle();
        assert_idle_at_overview(&f.controller);
    }

    #[test]
    fn reset_mid_focus_reverses_from_current_position() {
        let mut f = fixture();
        let a = f.a;
        f.controller.focus_on(&f.scene, a);
        for _ in 0..15 {
            f.controller.frame(&f.scene, DT);
        }
        let midway = f.controller.camera().eye;
        f.controller.execute(&f.scene, ViewCommand::ResetView);
        f.controller.frame(&f.scene, 0.0);
        assert!((f.controller.camera().eye - midway).length() < 1e-4);
        f.settle();
        assert_idle_at_overview(&f.controller);
    }

    #[test]
    fn resize_updates_projection_but_not_focus() {
        let mut f = fixture();
        let a = f.a;
        f.controller.focus_on(&f.scene, a);
        f.settle();
        f.controller.execute(
            &f.scene,
            ViewCommand::Resize {
                width: 1920,
                height: 1080,
            },
        );
        assert_eq!(f.controller.focus_state(), FocusState::Focused(a));
        assert!((f.controller.camera().aspect - 1920.0 / 1080.0).abs() < 1e-6);
        assert_eq!(f.controller.viewport(), Viewport::new(1920.0, 1080.0));
    }

    #[test]
    fn labels_follow_objects_every_frame() {
        let mut f = fixture();
        let b = f.b;
        let before = f.controller.labels().screen_position(b).unwrap();
        assert!(f.scene.set_position(b, Vec3::new(-10.0, 3.0, 0.0)));
        f.controller.frame(&f.scene, DT);
        let after = f.controller.labels().screen_position(b).unwrap();
        assert!(after.x > before.x);
    }

    #[test]
    fn registered_overlay_labels_report_visibility() {
        let mut f = fixture();
        let extra = f.scene.add_box("C", Vec3::new(10.0, 1.0, 0.0), Vec3::ONE);
        f.controller
            .labels_mut()
            .register(extra, "C", Box::new(OverlayLabel::for_text("C")));
        f.controller.focus_on(&f.scene, extra);
        assert!(!f.controller.labels().get(extra).unwrap().is_visible());
    }
}
