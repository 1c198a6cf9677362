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
// Complexity limits (thresholds in clippy.toml)
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

//! Interactive 3D model viewer built on wgpu.
//!
//! astroview shows one glTF model over a drifting, slowly spinning star
//! field. The model can be dragged to rotate, nudged with the arrow or
//! WASD keys, and eased to front/side/back views; the camera orbits, pans
//! and zooms with damping. A small control panel toggles background music
//! and its volume.
//!
//! # Key entry points
//!
//! - [`Viewer`] - standalone winit window (feature `viewer`)
//! - [`engine::ViewerEngine`] - GPU context, renderer and frame loop
//! - [`engine::ViewerState`] - all viewer logic, GPU-free and testable
//! - [`options::Options`] - runtime configuration (camera, lights, model,
//!   stars, audio, assets, key bindings)
//!
//! # Architecture
//!
//! The model and the music load on background threads and are polled once
//! per frame; everything else runs on the event-loop thread. Each frame
//! applies finished loads, advances camera damping, the star field and view
//! transitions, then draws the stars and the lit model in a single pass.

pub mod animation;
pub mod assets;
pub mod audio;
pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod gui;
pub mod input;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::{ViewerCommand, ViewerEngine, ViewerState};
pub use error::ViewerError;
pub use input::{InputEvent, InputProcessor, MouseButton};
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
