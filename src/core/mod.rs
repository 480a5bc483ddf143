//! Core building blocks shared by every command
//!
//! - **config**: release.toml parsing and validation
//! - **context**: resolved project layout (absolute paths)
//! - **error**: error types with exit codes and help messages
//! - **logging**: tracing subscriber setup
//! - **probe**: tool availability checks
//! - **process**: external command execution

pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod probe;
pub mod process;
