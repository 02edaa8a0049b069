//! Frame-driven interpolation used by camera transitions.

mod tween;

pub use tween::{Lerp, Tween, TweenStep};
