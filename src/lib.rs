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

//! Stereo cameras for 3D viewers: red/cyan anaglyph, side-by-side and
//! top/bottom eye pairs.
//!
//! A host view renders through a [`camera::Camera`]. The stereo camera
//! renders each eye into an offscreen target owned by the camera, then
//! composites both eyes into the host's output with textured quads and
//! color write masks.
//!
//! # Key entry points
//!
//! - [`camera::StereoCamera`] - the two-eye camera
//! - [`view::View`] - owns the active camera and drives a frame
//! - [`tool::StereoTool`] - switches a view between mono and stereo
//! - [`options::Options`] - stereo parameters with TOML presets
//! - [`render::Renderer`] - the host renderer contract, implemented by
//!   [`gpu::GpuRenderer`] (wgpu) and [`render::RecordingRenderer`]
//!   (headless command log)

pub mod camera;
pub mod error;
pub mod geometry;
pub mod gpu;
pub mod options;
pub mod render;
pub mod tool;
pub mod view;
