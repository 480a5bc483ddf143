//! Release phase commands
//!
//! Each phase runs in its own process. State is carried between them in
//! `.cross-release/state.json` and rewritten after every successful phase.

use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::probe::SystemProbe;
use crate::core::process::SystemRunner;
use crate::release::{PublishOptions, ReleaseInfo, ReleasePipeline, ReleaseState, ReleaseType};
use std::env;

fn load_context() -> ReleaseResult<ProjectContext> {
  ProjectContext::build(&env::current_dir()?)
}

fn load_state(ctx: &ProjectContext) -> ReleaseResult<ReleaseState> {
  ReleaseState::load(ctx)?.ok_or_else(|| {
    ReleaseError::with_help(
      "No release in progress",
      "Run `cross-release check --release-type <major|minor|patch>` first.",
    )
  })
}

/// Start a new release: resolve the next version
pub fn run_check(release_type: &str) -> ReleaseResult<()> {
  let release_type: ReleaseType = release_type.parse()?;
  let ctx = load_context()?;
  let (probe, runner) = (SystemProbe, SystemRunner);

  println!("🔍 Checking {} release...", release_type);
  let mut info = ReleaseInfo::new(release_type);
  let mut pipeline = ReleasePipeline::new(&ctx, &probe, &runner);
  pipeline.check(&mut info)?;
  print_versions(&info);

  ReleaseState::new(info, pipeline.state()).save(&ctx)?;
  Ok(())
}

/// Write the resolved version everywhere and regenerate lockfiles
pub fn run_prepare() -> ReleaseResult<()> {
  let ctx = load_context()?;
  let state = load_state(&ctx)?;
  let (probe, runner) = (SystemProbe, SystemRunner);

  let mut pipeline = ReleasePipeline::resume(&ctx, &probe, &runner, state.phase);
  prepare(&mut pipeline, &state.info)?;

  ReleaseState::new(state.info, pipeline.state()).save(&ctx)?;
  Ok(())
}

pub fn run_build() -> ReleaseResult<()> {
  let ctx = load_context()?;
  let state = load_state(&ctx)?;
  let (probe, runner) = (SystemProbe, SystemRunner);

  let mut pipeline = ReleasePipeline::resume(&ctx, &probe, &runner, state.phase);
  println!("🔨 Building packages...");
  pipeline.build()?;
  println!("✅ Build complete");

  ReleaseState::new(state.info, pipeline.state()).save(&ctx)?;
  Ok(())
}

pub fn run_publish(repository: Option<String>, npm_registry: Option<String>) -> ReleaseResult<()> {
  let ctx = load_context()?;
  let state = load_state(&ctx)?;
  let (probe, runner) = (SystemProbe, SystemRunner);

  let mut pipeline = ReleasePipeline::resume(&ctx, &probe, &runner, state.phase);
  publish(&mut pipeline, &state.info, repository.as_deref(), npm_registry)?;

  ReleaseState::new(state.info, pipeline.state()).save(&ctx)?;
  Ok(())
}

/// All four phases in one process
pub fn run_release(release_type: &str, repository: Option<String>, npm_registry: Option<String>) -> ReleaseResult<()> {
  let release_type: ReleaseType = release_type.parse()?;
  let ctx = load_context()?;
  let (probe, runner) = (SystemProbe, SystemRunner);

  let mut info = ReleaseInfo::new(release_type);
  let mut pipeline = ReleasePipeline::new(&ctx, &probe, &runner);

  println!("🔍 Checking {} release...", release_type);
  pipeline.check(&mut info)?;
  print_versions(&info);
  ReleaseState::new(info.clone(), pipeline.state()).save(&ctx)?;

  prepare(&mut pipeline, &info)?;
  ReleaseState::new(info.clone(), pipeline.state()).save(&ctx)?;

  println!("🔨 Building packages...");
  pipeline.build()?;
  ReleaseState::new(info.clone(), pipeline.state()).save(&ctx)?;

  publish(&mut pipeline, &info, repository.as_deref(), npm_registry)?;
  ReleaseState::new(info, pipeline.state()).save(&ctx)?;
  Ok(())
}

fn prepare(pipeline: &mut ReleasePipeline<'_>, info: &ReleaseInfo) -> ReleaseResult<()> {
  println!("📝 Preparing release {}...", info.version().unwrap_or("?"));
  let outcome = pipeline.prepare(info)?;
  for (path, reason) in &outcome.sync.skipped {
    tracing::debug!(file = %path.display(), %reason, "not updated");
  }
  println!(
    "✅ Prepared: {} file(s) updated, {} lockfile(s) regenerated",
    outcome.sync.updated.len(),
    outcome.locked.len()
  );
  Ok(())
}

fn publish(
  pipeline: &mut ReleasePipeline<'_>,
  info: &ReleaseInfo,
  repository: Option<&str>,
  npm_registry: Option<String>,
) -> ReleaseResult<()> {
  println!("🚀 Publishing {}...", info.version().unwrap_or("?"));
  pipeline.publish(repository, &PublishOptions { npm_registry })?;
  println!("✅ Published {}", info.version().unwrap_or("?"));
  Ok(())
}

fn print_versions(info: &ReleaseInfo) {
  println!(
    "✅ {} → {}",
    info.previous_version().unwrap_or("?"),
    info.version().unwrap_or("?")
  );
}
