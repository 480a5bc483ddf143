//! Release lifecycle: check → prepare → build → publish
//!
//! The pipeline owns nothing but its position in the lifecycle. Versions live
//! in [`ReleaseInfo`], files are re-read on every phase, and every external
//! command goes through the injected [`CommandRunner`]; tool availability
//! comes from the injected [`ToolProbe`].

use super::ecosystem::Ecosystem;
use super::info::ReleaseInfo;
use super::version;
use crate::core::context::ProjectContext;
use crate::core::error::{PipelineError, ReleaseError, ReleaseResult};
use crate::core::probe::ToolProbe;
use crate::core::process::{CommandRunner, CommandSpec};
use crate::manifest::{self, ManifestKind, ManifestSynchronizer, SyncReport};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position in the release lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineState {
  Idle,
  Checked,
  Prepared,
  Built,
  Published,
}

impl fmt::Display for PipelineState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      PipelineState::Idle => "idle",
      PipelineState::Checked => "checked",
      PipelineState::Prepared => "prepared",
      PipelineState::Built => "built",
      PipelineState::Published => "published",
    };
    f.write_str(name)
  }
}

/// Registry overrides for `publish`, unset means the tool's own configuration
///
/// `repository` (the Python registry) is passed separately, matching the
/// hook signature; the remaining overrides ride along here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublishOptions {
  /// npm registry passed as `--registry`
  pub npm_registry: Option<String>,
}

/// What `prepare` did, for reporting
#[derive(Debug, Clone, Default)]
pub struct PrepareOutcome {
  pub sync: SyncReport,
  pub locked: Vec<Ecosystem>,
  pub lock_skipped: Vec<Ecosystem>,
}

/// Drives one release through its lifecycle phases
pub struct ReleasePipeline<'a> {
  ctx: &'a ProjectContext,
  probe: &'a dyn ToolProbe,
  runner: &'a dyn CommandRunner,
  state: PipelineState,
}

impl<'a> ReleasePipeline<'a> {
  /// New pipeline at `Idle`
  pub fn new(ctx: &'a ProjectContext, probe: &'a dyn ToolProbe, runner: &'a dyn CommandRunner) -> Self {
    Self::resume(ctx, probe, runner, PipelineState::Idle)
  }

  /// Pipeline continuing from a previously reached state
  pub fn resume(
    ctx: &'a ProjectContext,
    probe: &'a dyn ToolProbe,
    runner: &'a dyn CommandRunner,
    state: PipelineState,
  ) -> Self {
    Self {
      ctx,
      probe,
      runner,
      state,
    }
  }

  pub fn state(&self) -> PipelineState {
    self.state
  }

  fn expect_state(&self, phase: &'static str, expected: PipelineState) -> ReleaseResult<()> {
    if self.state != expected {
      return Err(
        PipelineError::PhaseOutOfOrder {
          phase,
          expected: expected.to_string(),
          actual: self.state.to_string(),
        }
        .into(),
      );
    }
    Ok(())
  }

  /// Resolve the current version and compute the next one
  pub fn check(&mut self, info: &mut ReleaseInfo) -> ReleaseResult<()> {
    self.expect_state("check", PipelineState::Idle)?;

    let source = self.ctx.manifest_path(Ecosystem::Python);
    let current = manifest::read_version(&source, Ecosystem::Python.manifest_kind())?;
    let (previous, next) = version::resolve(&current, info.release_type())?;

    self.warn_on_drift(&current);

    info.set_versions(previous, next)?;
    tracing::info!(
      release_type = %info.release_type(),
      previous = info.previous_version().unwrap_or_default(),
      next = info.version().unwrap_or_default(),
      "release checked"
    );

    self.state = PipelineState::Checked;
    Ok(())
  }

  /// JS manifest disagreeing with the Python one is reported, not fatal
  fn warn_on_drift(&self, python_version: &str) {
    let js_manifest = self.ctx.manifest_path(Ecosystem::JavaScript);
    match manifest::read_version(&js_manifest, Ecosystem::JavaScript.manifest_kind()) {
      Ok(js_version) if js_version != python_version => {
        println!(
          "⚠️  {} is at {} but {} is at {}; both will be set to the new version",
          js_manifest.display(),
          js_version,
          self.ctx.manifest_path(Ecosystem::Python).display(),
          python_version
        );
      }
      Ok(_) => {}
      Err(e) => tracing::debug!(error = %e, "could not read JS manifest version during check"),
    }
  }

  /// Write the new version everywhere and regenerate lockfiles
  pub fn prepare(&mut self, info: &ReleaseInfo) -> ReleaseResult<PrepareOutcome> {
    self.expect_state("prepare", PipelineState::Checked)?;

    let new_version = info
      .version()
      .ok_or_else(|| ReleaseError::with_help("Release has no version", "Run `cross-release check` first."))?;

    let mut synchronizer = Ecosystem::ALL
      .into_iter()
      .fold(ManifestSynchronizer::new(), |sync, ecosystem| {
        sync.require(self.ctx.manifest_path(ecosystem), ecosystem.manifest_kind())
      })
      .mirror(self.ctx.root_manifest_path(), ManifestKind::WorkspaceRoot);
    if let Some(version_file) = self.ctx.version_file_path()? {
      synchronizer = synchronizer.embedded(version_file);
    }

    let sync = synchronizer.sync(new_version)?;
    for path in &sync.updated {
      println!("   Updated {}", path.display());
    }

    let mut outcome = PrepareOutcome {
      sync,
      ..Default::default()
    };

    for ecosystem in Ecosystem::ALL {
      let tool = ecosystem.lock_tool();
      if !self.probe.is_available(tool) {
        println!("   Skipping {} lockfile ({} not available)", ecosystem, tool);
        outcome.lock_skipped.push(ecosystem);
        continue;
      }

      let spec = CommandSpec::new(ecosystem.lock_argv(), self.ctx.require_package_dir(ecosystem)?)?;
      self.runner.run(&spec)?;
      outcome.locked.push(ecosystem);
    }

    self.state = PipelineState::Prepared;
    Ok(outcome)
  }

  /// Build every package, Python first
  pub fn build(&mut self) -> ReleaseResult<()> {
    self.expect_state("build", PipelineState::Prepared)?;

    for ecosystem in Ecosystem::ALL {
      let spec = CommandSpec::new(
        ecosystem.build_argv(&self.ctx.config),
        self.ctx.require_package_dir(ecosystem)?,
      )?;
      self.runner.run(&spec)?;
    }

    self.state = PipelineState::Built;
    Ok(())
  }

  /// Publish every package with trusted publishing, Python first
  pub fn publish(&mut self, repository: Option<&str>, opts: &PublishOptions) -> ReleaseResult<()> {
    self.expect_state("publish", PipelineState::Built)?;

    for ecosystem in Ecosystem::ALL {
      let registry = match ecosystem {
        Ecosystem::Python => repository,
        Ecosystem::JavaScript => opts.npm_registry.as_deref(),
      };

      let mut spec = CommandSpec::new(
        ecosystem.publish_argv(registry),
        self.ctx.require_package_dir(ecosystem)?,
      )?;
      for (key, value) in ecosystem.publish_env() {
        spec = spec.env(*key, *value);
      }
      self.runner.run(&spec)?;
    }

    self.state = PipelineState::Published;
    Ok(())
  }
}
