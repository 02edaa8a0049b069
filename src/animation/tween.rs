use glam::Vec3;

use crate::util::easing::EasingFunction;

/// Values a [`Tween`] can interpolate.
pub trait Lerp: Copy {
    /// Linear blend: `self` at `t = 0`, `other` at `t = 1`.
    #[must_use]
    fn lerp_to(self, other: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

/// One advance of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenStep<T> {
    /// Interpolated value after the advance.
    pub value: T,
    /// Eased progress in `[0, 1]`.
    pub progress: f32,
    /// Whether this advance reached the end.
    pub finished: bool,
}

/// A fixed-duration eased interpolation between two values.
///
/// Time only moves when [`advance`](Self::advance) is called, so a tween
/// is driven by whoever owns it, once per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Tween<T> {
    from: T,
    to: T,
    duration: f32,
    elapsed: f32,
    easing: EasingFunction,
}

impl<T: Lerp> Tween<T> {
    /// A tween from `from` to `to` over `duration` seconds. Non-positive
    /// durations finish on the first advance.
    #[must_use]
    pub fn new(from: T, to: T, duration: f32, easing: EasingFunction) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            elapsed: 0.0,
            easing,
        }
    }

    /// Raw (uneased) time fraction in `[0, 1]`.
    #[must_use]
    pub fn time_fraction(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).min(1.0)
        }
    }

    /// Whether the end has been reached.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.time_fraction() >= 1.0
    }

    /// Current interpolated value.
    #[must_use]
    pub fn value(&self) -> T {
        let t = self.time_fraction();
        if t >= 1.0 {
            return self.to;
        }
        self.from.lerp_to(self.to, self.easing.evaluate(t))
    }

    /// Move time forward by `dt` seconds and return the new value.
    pub fn advance(&mut self, dt: f32) -> TweenStep<T> {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed = (self.elapsed + dt).min(self.duration);
        }
        let finished = self.is_finished();
        TweenStep {
            value: self.value(),
            progress: self.easing.evaluate(self.time_fraction()),
            finished,
        }
    }
}
