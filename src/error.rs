//! Crate-level error types.
//!
//! [`VantageError`] covers setup failures that a host must handle (GPU
//! initialization, options files, the event loop). [`Degradation`]
//! covers conditions inside the interaction core that are absorbed with
//! a safe default and only logged.

use std::fmt;

use crate::gpu::render_context::RenderContextError;
use crate::scene::ObjectId;

/// Errors produced by the vantage crate.
#[derive(Debug)]
pub enum VantageError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Viewer event-loop failure.
    Viewer(String),
    /// Browser front-end setup failure.
    Web(String),
}

impl fmt::Display for VantageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
            Self::Web(msg) => write!(f, "web front-end error: {msg}"),
        }
    }
}

impl std::error::Error for VantageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for VantageError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for VantageError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// A non-fatal condition absorbed by the interaction core.
///
/// None of these abort a frame. Each has a fixed fallback: a miss is a
/// reset request, degenerate bounds fall back to point framing, a
/// missing label is skipped, and an unknown object is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Degradation {
    /// A pick found nothing usable (background or ground).
    NoHit,
    /// The object has no usable bounding box.
    DegenerateBounds(ObjectId),
    /// A tracked object has no label overlay registered.
    MissingLabelElement(ObjectId),
    /// A programmatic request named an object the scene does not hold.
    UnknownObject(ObjectId),
}

impl Degradation {
    /// Log this condition at the level its fallback warrants.
    pub fn report(self) {
        match self {
            Self::NoHit => log::debug!("{self}"),
            _ => log::warn!("{self}"),
        }
    }
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoHit => write!(f, "pick hit nothing selectable"),
            Self::DegenerateBounds(id) => write!(
                f,
                "object {id} has degenerate bounds, framing its position"
            ),
            Self::MissingLabelElement(id) => {
                write!(f, "object {id} has no label element, skipping it")
            }
            Self::UnknownObject(id) => {
                write!(f, "object {id} is not in the scene")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_error_keeps_source() {
        let err = VantageError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().starts_with("I/O error"));
    }

    #[test]
    fn degradation_messages_name_the_object() {
        let msg = Degradation::MissingLabelElement(ObjectId(7)).to_string();
        assert!(msg.contains("#7"), "{msg}");
    }
}
