//! Release readiness diagnostics for `doctor`
//!
//! - **tool-uv**, **tool-npm**: required for publishing (error when missing)
//! - **tool-bun**: JavaScript lockfile and build (warning when missing)
//! - **manifest-versions**: both manifests define a version and agree

mod manifests;
mod runner;
mod tools;
mod trait_def;

pub use runner::create_default_runner;
pub use trait_def::{Check, CheckContext, Severity};
