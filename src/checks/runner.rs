//! Check runner for executing diagnostics

use super::manifests::ManifestVersionCheck;
use super::tools::ToolCheck;
use super::trait_def::{Check, CheckContext, CheckResult, Severity};
use crate::release::Ecosystem;

pub struct CheckRunner {
  checks: Vec<Box<dyn Check>>,
}

impl CheckRunner {
  pub fn new() -> Self {
    Self { checks: Vec::new() }
  }

  pub fn add_check(&mut self, check: Box<dyn Check>) {
    self.checks.push(check);
  }

  /// Run all checks and collect results
  pub fn run_all(&self, ctx: &CheckContext<'_>) -> Vec<CheckResult> {
    self
      .checks
      .iter()
      .map(|check| match check.run(ctx) {
        Ok(result) => result,
        Err(err) => CheckResult::error(
          check.name(),
          format!("Check failed to run: {}", err),
          Some("Re-run with --verbose for details"),
        ),
      })
      .collect()
  }

  pub fn checks(&self) -> &[Box<dyn Check>] {
    &self.checks
  }
}

impl Default for CheckRunner {
  fn default() -> Self {
    Self::new()
  }
}

/// Runner with every built-in check
///
/// A missing `uv` or `npm` blocks publishing. A missing `bun` only blocks
/// the JavaScript build; lockfile regeneration is skipped without it.
pub fn create_default_runner() -> CheckRunner {
  let mut runner = CheckRunner::new();
  runner.add_check(Box::new(ToolCheck::new(
    Ecosystem::Python.publish_tool(),
    "Python lock, build and publish",
    Severity::Error,
  )));
  runner.add_check(Box::new(ToolCheck::new(
    Ecosystem::JavaScript.lock_tool(),
    "JavaScript lockfile and build",
    Severity::Warning,
  )));
  runner.add_check(Box::new(ToolCheck::new(
    Ecosystem::JavaScript.publish_tool(),
    "JavaScript publish with provenance",
    Severity::Error,
  )));
  runner.add_check(Box::new(ManifestVersionCheck));
  runner
}
