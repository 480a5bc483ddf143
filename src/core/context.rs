//! Project context - resolve once, pass everywhere
//!
//! Holds the workspace root (absolute) and the loaded configuration, and turns
//! configured relative paths into the absolute paths that command specs and
//! manifest edits need.

use crate::core::config::ReleaseConfig;
use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use crate::manifest::{self, ManifestKind};
use crate::release::ecosystem::Ecosystem;
use std::path::{Path, PathBuf};

/// Directory (under the workspace root) holding persisted release state
pub const STATE_DIR: &str = ".cross-release";

/// Resolved project layout shared by every command
#[derive(Debug, Clone)]
pub struct ProjectContext {
  /// Workspace root directory (absolute path)
  pub root: PathBuf,

  /// Loaded configuration (defaults when no release.toml exists)
  pub config: ReleaseConfig,
}

impl ProjectContext {
  /// Build context from a root directory, loading release.toml if present
  pub fn build(workspace_root: &Path) -> ReleaseResult<Self> {
    let config = ReleaseConfig::load(workspace_root)?;
    Self::from_config(workspace_root, config)
  }

  /// Build context from an already-loaded configuration
  pub fn from_config(workspace_root: &Path, config: ReleaseConfig) -> ReleaseResult<Self> {
    let root = std::path::absolute(workspace_root)
      .with_context(|| format!("Failed to resolve workspace root {}", workspace_root.display()))?;
    Ok(Self { root, config })
  }

  /// Get workspace root as Path reference (convenience)
  pub fn workspace_root(&self) -> &Path {
    &self.root
  }

  /// Absolute package directory for an ecosystem
  pub fn package_dir(&self, ecosystem: Ecosystem) -> PathBuf {
    let relative = match ecosystem {
      Ecosystem::Python => &self.config.python.path,
      Ecosystem::JavaScript => &self.config.js.path,
    };
    self.root.join(relative)
  }

  /// Package directory, or an error when it does not exist
  pub fn require_package_dir(&self, ecosystem: Ecosystem) -> ReleaseResult<PathBuf> {
    let dir = self.package_dir(ecosystem);
    if !dir.is_dir() {
      return Err(ReleaseError::Config(ConfigError::PackageDirMissing {
        ecosystem: ecosystem.config_section().to_string(),
        path: dir,
      }));
    }
    Ok(dir)
  }

  /// Absolute path of an ecosystem's manifest
  pub fn manifest_path(&self, ecosystem: Ecosystem) -> PathBuf {
    self.package_dir(ecosystem).join(ecosystem.manifest_file())
  }

  /// Absolute path of the workspace root manifest
  pub fn root_manifest_path(&self) -> PathBuf {
    self.root.join(&self.config.workspace.root_manifest)
  }

  /// Absolute path of the file holding `__version__`, if one can be determined
  ///
  /// Uses the configured file when set, otherwise `<package>/__init__.py`
  /// derived from the Python project name. Resolved fresh on every call.
  pub fn version_file_path(&self) -> ReleaseResult<Option<PathBuf>> {
    let python_dir = self.package_dir(Ecosystem::Python);

    if let Some(configured) = &self.config.python.version_file {
      return Ok(Some(python_dir.join(configured)));
    }

    let name = manifest::read_name(&self.manifest_path(Ecosystem::Python), ManifestKind::PyProject)?;
    Ok(name.map(|name| python_dir.join(import_name(&name)).join("__init__.py")))
  }

  /// Persisted release state file
  pub fn state_path(&self) -> PathBuf {
    self.root.join(STATE_DIR).join("state.json")
  }
}

/// Python import name for a distribution name (`cross-docs` → `cross_docs`)
fn import_name(distribution: &str) -> String {
  distribution
    .trim()
    .to_lowercase()
    .chars()
    .map(|c| if c == '-' || c == '.' { '_' } else { c })
    .collect()
}
