//! CLI command implementations
//!
//! ## Release phases
//! - **check**: start a release, resolve the next version
//! - **prepare**: sync versions into every manifest, regenerate lockfiles
//! - **build**: build both packages
//! - **publish**: publish both packages with trusted publishing
//! - **release**: all four phases in one run
//!
//! ## Inspection
//! - **status**: current versions and the release in flight
//! - **doctor**: tool availability and manifest readiness

pub mod doctor;
pub mod release;
pub mod status;

pub use doctor::run_doctor;
pub use release::{run_build, run_check, run_prepare, run_publish, run_release};
pub use status::run_status;
