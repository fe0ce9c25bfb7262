//! glibc-check-core
//!
//! Core library for discovering which glibc symbol versions a compiled
//! executable depends on, and for asserting constraints over them.
//!
//! This crate defines the version model, the ELF-backed extraction service,
//! and the expression-based constraint evaluator.
//!
//! The goal is to keep all substantive logic here so it is fully testable and
//! reusable from multiple frontends (CLI, build scripts, etc.).

pub mod analysis;
pub mod model;
pub mod services;

pub use analysis::{find_violations, ConstraintError};
pub use model::{ParseError, Version, VersionSet};
pub use services::extract::{extract, versions_from_tags, ExtractError, OpenFailure};

/// Returns the library version as encoded at compile time.
///
/// Useful for tests and for frontends to report consistent version info.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
