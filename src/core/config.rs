use crate::core::error::{ConfigError, ReleaseError, ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Configuration for cross-release
/// Searched in order: release.toml, .release.toml, .config/release.toml
///
/// Every field has a default, so a repository laid out as `python/` + `js/`
/// needs no file at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseConfig {
  #[serde(default)]
  pub python: PythonConfig,
  #[serde(default)]
  pub js: JsConfig,
  #[serde(default)]
  pub workspace: WorkspaceConfig,
}

/// Python package settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PythonConfig {
  /// Package directory containing pyproject.toml (default: "python")
  #[serde(default = "default_python_path")]
  pub path: PathBuf,

  /// File holding `__version__`, relative to `path`
  /// (default: `<package name>/__init__.py`)
  #[serde(default)]
  pub version_file: Option<PathBuf>,
}

fn default_python_path() -> PathBuf {
  PathBuf::from("python")
}

impl Default for PythonConfig {
  fn default() -> Self {
    Self {
      path: default_python_path(),
      version_file: None,
    }
  }
}

/// JavaScript package settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsConfig {
  /// Package directory containing package.json (default: "js")
  #[serde(default = "default_js_path")]
  pub path: PathBuf,

  /// package.json script run by `bun run` during build (default: "build")
  #[serde(default = "default_build_script")]
  pub build_script: String,
}

fn default_js_path() -> PathBuf {
  PathBuf::from("js")
}

fn default_build_script() -> String {
  "build".to_string()
}

impl Default for JsConfig {
  fn default() -> Self {
    Self {
      path: default_js_path(),
      build_script: default_build_script(),
    }
  }
}

/// Workspace-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceConfig {
  /// Root manifest mirrored best-effort (default: "pyproject.toml")
  #[serde(default = "default_root_manifest")]
  pub root_manifest: PathBuf,
}

fn default_root_manifest() -> PathBuf {
  PathBuf::from("pyproject.toml")
}

impl Default for WorkspaceConfig {
  fn default() -> Self {
    Self {
      root_manifest: default_root_manifest(),
    }
  }
}

impl ReleaseConfig {
  /// Find config file in search order: release.toml, .release.toml, .config/release.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = [
      path.join("release.toml"),
      path.join(".release.toml"),
      path.join(".config").join("release.toml"),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load(path: &Path) -> ReleaseResult<Self> {
    let Some(config_path) = Self::find_config_path(path) else {
      tracing::debug!(root = %path.display(), "no release.toml found, using defaults");
      return Ok(Self::default());
    };

    let content = fs::read_to_string(&config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: ReleaseConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .validate()
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    tracing::debug!(config = %config_path.display(), "loaded configuration");
    Ok(config)
  }

  /// Validate configuration values
  pub fn validate(&self) -> ReleaseResult<()> {
    non_empty_path("python.path", &self.python.path)?;
    non_empty_path("js.path", &self.js.path)?;
    non_empty_path("workspace.root_manifest", &self.workspace.root_manifest)?;

    if let Some(version_file) = &self.python.version_file {
      non_empty_path("python.version_file", version_file)?;
      if version_file.is_absolute() || version_file.components().any(|c| c == Component::ParentDir) {
        return Err(ReleaseError::Config(ConfigError::InvalidPath {
          field: "python.version_file".to_string(),
          reason: "must be relative to python.path and stay inside it".to_string(),
        }));
      }
    }

    if self.js.build_script.trim().is_empty() {
      return Err(ReleaseError::with_help(
        "js.build_script must not be empty",
        "Set it to the package.json script that builds the JS package, e.g. \"build\".",
      ));
    }

    Ok(())
  }
}

fn non_empty_path(field: &str, path: &Path) -> ReleaseResult<()> {
  if path.as_os_str().is_empty() {
    return Err(ReleaseError::Config(ConfigError::InvalidPath {
      field: field.to_string(),
      reason: "path is empty".to_string(),
    }));
  }
  Ok(())
}
