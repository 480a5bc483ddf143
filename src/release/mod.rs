//! Release orchestration across the Python and JavaScript packages
//!
//! One release moves through four phases, each gated on the previous one:
//!
//! 1. **check**: read the Python manifest version and resolve the next one
//! 2. **prepare**: write the new version into every tracked file, regenerate lockfiles
//! 3. **build**: `uv build`, then the configured bun script
//! 4. **publish**: `uv publish` and `npm publish`, both with trusted publishing
//!
//! The Python manifest is the single source of truth for the current version.
//! Nothing is rolled back on failure; the persisted [`state::ReleaseState`]
//! records how far the release got.

pub mod ecosystem;
pub mod info;
pub mod pipeline;
pub mod state;
pub mod version;

pub use ecosystem::Ecosystem;
pub use info::ReleaseInfo;
pub use pipeline::{PipelineState, PublishOptions, ReleasePipeline};
pub use state::ReleaseState;
pub use version::ReleaseType;
