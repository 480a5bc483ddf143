//! Manifest readiness: both package manifests define a version, and agree

use super::trait_def::{Check, CheckContext, CheckResult};
use crate::core::error::ReleaseResult;
use crate::manifest::{self, ManifestKind};
use crate::release::Ecosystem;
use serde_json::json;

pub struct ManifestVersionCheck;

impl Check for ManifestVersionCheck {
  fn name(&self) -> &str {
    "manifest-versions"
  }

  fn description(&self) -> &str {
    "Python and JavaScript manifests define a version"
  }

  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult> {
    let python_path = ctx.project.manifest_path(Ecosystem::Python);
    let js_path = ctx.project.manifest_path(Ecosystem::JavaScript);

    let python = match manifest::read_version(&python_path, ManifestKind::PyProject) {
      Ok(v) => v,
      Err(e) => {
        return Ok(CheckResult::error(
          self.name(),
          e.to_string(),
          Some("Set [project].version or [tool.poetry].version in the Python manifest"),
        ));
      }
    };
    let js = match manifest::read_version(&js_path, ManifestKind::PackageJson) {
      Ok(v) => v,
      Err(e) => {
        return Ok(CheckResult::error(
          self.name(),
          e.to_string(),
          Some("Add a top-level \"version\" to package.json"),
        ));
      }
    };

    let details = json!({ "python": python, "js": js });
    if python != js {
      return Ok(
        CheckResult::warning(
          self.name(),
          format!("Versions differ: Python {} vs JavaScript {}", python, js),
          Some("The next `prepare` sets both to the same version"),
        )
        .with_details(details),
      );
    }

    Ok(CheckResult::pass(self.name(), format!("Both packages at {}", python)).with_details(details))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::checks::Severity;
  use crate::core::config::ReleaseConfig;
  use crate::core::context::ProjectContext;
  use crate::core::probe::ToolProbe;
  use std::fs;
  use tempfile::TempDir;

  struct NoTools;

  impl ToolProbe for NoTools {
    fn is_available(&self, _tool: &str) -> bool {
      false
    }
  }

  fn run_with(python: &str, js: &str) -> CheckResult {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("python")).unwrap();
    fs::create_dir_all(dir.path().join("js")).unwrap();
    fs::write(dir.path().join("python/pyproject.toml"), python).unwrap();
    fs::write(dir.path().join("js/package.json"), js).unwrap();

    let project = ProjectContext::from_config(dir.path(), ReleaseConfig::default()).unwrap();
    let ctx = CheckContext {
      project: &project,
      probe: &NoTools,
    };
    ManifestVersionCheck.run(&ctx).unwrap()
  }

  #[test]
  fn test_matching_versions_pass() {
    let result = run_with("[project]\nversion = \"1.0.0\"\n", "{\"version\": \"1.0.0\"}");
    assert!(result.passed);
  }

  #[test]
  fn test_drift_is_warning() {
    let result = run_with("[project]\nversion = \"1.1.0\"\n", "{\"version\": \"1.0.0\"}");
    assert!(!result.passed);
    assert_eq!(result.severity, Severity::Warning);
  }

  #[test]
  fn test_missing_field_is_error() {
    let result = run_with("[project]\nname = \"x\"\n", "{\"version\": \"1.0.0\"}");
    assert_eq!(result.severity, Severity::Error);
  }
}
