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

//! Batch molecular visualization through POV-Ray.
//!
//! ccpoviz reads a chemical structure, resolves layered options, turns the
//! structure into a POV-Ray scene through a mustache template and runs
//! POV-Ray on it. Pictures of a whole project share one look through a
//! project option file while each molecule can still adjust the camera.
//!
//! # Key entry points
//!
//! - [`driver::render_driver`] - the whole pipeline, as run by the binary
//! - [`options::Options`] - typed configuration; [`options::chain`] merges
//!   the option layers
//! - [`scene::SceneDescription`] - the render context of a structure
//! - [`template::TemplateSet`] - the scene template and its partials
//!
//! # Architecture
//!
//! The pipeline is synchronous: structure → options → scene description →
//! `.pov` text → `povray` child process → image. Geometry is computed with
//! glam in double precision and formatted to POV-Ray text before it reaches
//! the template, so templates only substitute and iterate.

pub mod driver;
pub mod error;
pub mod options;
pub mod pov;
pub mod povray;
pub mod scene;
pub mod structure;
pub mod template;

pub use error::CcpovizError;
