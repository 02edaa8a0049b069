//! Animated camera moves between the overview and focused poses.
//!
//! [`TransitionEngine`] holds at most one in-flight transition. Starting
//! another drops the current one before it can write again, so a
//! superseded transition never applies a late step or reports completion.
//! The owner drives it with [`tick`](TransitionEngine::tick) once per
//! frame, before the orbit controls update.

mod framing;

use std::fmt;

pub use framing::{focus_pose, FocusPose};
use glam::Vec3;

use crate::animation::Tween;
use crate::camera::{Camera, CameraPose, OrbitControls};
use crate::options::{FramingOptions, TransitionOptions};
use crate::scene::{ObjectId, TrackedObject};

/// Identity of one started transition. Ids increase monotonically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionId(u64);

impl fmt::Display for TransitionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transition {}", self.0)
    }
}

/// Where a transition is heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The framed view of one object.
    Object(ObjectId),
    /// The recorded overview pose.
    Overview,
}

impl fmt::Display for Destination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(id) => write!(f, "object {id}"),
            Self::Overview => f.write_str("overview"),
        }
    }
}

/// Reported by [`TransitionEngine::tick`] on the frame a transition
/// finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The finished transition.
    pub id: TransitionId,
    /// Where it ended.
    pub destination: Destination,
}

#[derive(Debug, Clone)]
struct ActiveTransition {
    id: TransitionId,
    destination: Destination,
    position: Tween<Vec3>,
    look_at: Vec3,
}

/// Owner of the single in-flight camera transition.
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    active: Option<ActiveTransition>,
    next_id: u64,
    overview: CameraPose,
    options: TransitionOptions,
    framing: FramingOptions,
}

impl TransitionEngine {
    /// Engine returning to `overview` for reset transitions.
    #[must_use]
    pub fn new(
        overview: CameraPose,
        options: TransitionOptions,
        framing: FramingOptions,
    ) -> Self {
        Self {
            active: None,
            next_id: 0,
            overview,
            options,
            framing,
        }
    }

    /// Replace timing and framing options. A running transition keeps
    /// its original timing.
    pub fn set_options(
        &mut self,
        options: TransitionOptions,
        framing: FramingOptions,
    ) {
        self.options = options;
        self.framing = framing;
    }

    /// Pose that [`overview`](Self::overview) returns to.
    #[must_use]
    pub fn overview_pose(&self) -> CameraPose {
        self.overview
    }

    /// Record a new overview pose.
    pub fn set_overview_pose(&mut self, pose: CameraPose) {
        self.overview = pose;
    }

    /// Start moving from the camera's current position to the framed view
    /// of `object`, replacing any running transition.
    pub fn focus(
        &mut self,
        object: &TrackedObject,
        camera: &Camera,
    ) -> TransitionId {
        let pose = focus_pose(object, &self.framing);
        self.start(
            Destination::Object(object.id),
            camera.eye,
            pose.position,
            pose.look_at,
        )
    }

    /// Start moving back to the overview pose, replacing any running
    /// transition.
    pub fn overview(&mut self, camera: &Camera) -> TransitionId {
        self.start(
            Destination::Overview,
            camera.eye,
            self.overview.position,
            self.overview.target,
        )
    }

    fn start(
        &mut self,
        destination: Destination,
        from: Vec3,
        to: Vec3,
        look_at: Vec3,
    ) -> TransitionId {
        if let Some(previous) = self.active.take() {
            log::debug!(
                "{} toward {} superseded",
                previous.id,
                previous.destination
            );
        }
        let id = TransitionId(self.next_id);
        self.next_id += 1;
        self.active = Some(ActiveTransition {
            id,
            destination,
            position: Tween::new(
                from,
                to,
                self.options.duration_secs,
                self.options.easing,
            ),
            look_at,
        });
        log::debug!("{id} toward {destination} started");
        id
    }

    /// Advance the running transition by `dt` seconds, writing the camera
    /// position and the look-at to both the camera and the controls.
    ///
    /// Returns the outcome on the frame the transition finishes; the
    /// engine is idle afterwards.
    pub fn tick(
        &mut self,
        dt: f32,
        camera: &mut Camera,
        controls: &mut OrbitControls,
    ) -> Option<TransitionOutcome> {
        let active = self.active.as_mut()?;
        let step = active.position.advance(dt);
        camera.eye = step.value;
        camera.look_at(active.look_at);
        controls.target = active.look_at;

        if !step.finished {
            return None;
        }
        let done = self.active.take()?;
        log::debug!("{} toward {} finished", done.id, done.destination);
        Some(TransitionOutcome {
            id: done.id,
            destination: done.destination,
        })
    }

    /// Drop the running transition without applying anything more.
    /// Returns its id if one was running.
    pub fn cancel(&mut self) -> Option<TransitionId> {
        let cancelled = self.active.take()?;
        log::debug!("{} cancelled", cancelled.id);
        Some(cancelled.id)
    }

    /// Whether a transition is running.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Destination of the running transition.
    #[must_use]
    pub fn destination(&self) -> Option<Destination> {
        self.active.as_ref().map(|a| a.destination)
    }

    /// Id of the running transition.
    #[must_use]
    pub fn current_id(&self) -> Option<TransitionId> {
        self.active.as_ref().map(|a| a.id)
    }
}
