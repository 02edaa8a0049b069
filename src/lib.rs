// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Interactive 3D scene viewer with click-to-focus camera transitions.
//!
//! Vantage shows a set of tracked objects on a ground plane. Clicking an
//! object (or its label) animates the camera to a framing pose around it;
//! clicking empty space while focused animates back to the overview.
//! Labels follow their objects on screen every frame.
//!
//! # Key entry points
//!
//! - [`controller::InteractionController`] - focus state machine, pointer
//!   navigation, and per-frame update; runs without a GPU
//! - [`picking`] - ray casting from screen pixels into the scene
//! - [`label::LabelProjector`] - world-to-screen label placement
//! - [`transition::TransitionEngine`] - cancel-and-replace camera tweens
//! - [`engine::ViewerEngine`] - controller plus wgpu renderer for a surface
//! - [`Viewer`] - standalone winit window (feature `viewer`)
//!
//! # Architecture
//!
//! Input arrives as platform-agnostic [`InputEvent`]s. The
//! [`input::InputProcessor`] turns them into [`ViewCommand`]s, which the
//! controller executes against the [`Scene`]. Each frame the controller
//! advances the active transition, applies orbit damping, and projects
//! labels; the renderer then draws boxes and label markers from the
//! controller's camera.

pub mod animation;
pub mod camera;
pub mod controller;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod label;
pub mod options;
pub mod picking;
pub mod renderer;
pub mod scene;
pub mod transition;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use controller::{FocusState, InteractionController, ViewCommand, ViewEvent};
pub use engine::ViewerEngine;
pub use error::VantageError;
pub use input::{InputEvent, MouseButton};
pub use options::Options;
pub use scene::{ObjectId, Scene};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
