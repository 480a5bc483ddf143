//! Manifest reading and writing across ecosystems
//!
//! Each manifest kind declares an ordered list of [`KeyPath`]s. Reads
//! and writes try them in order and use the first one that holds a string, so
//! "field lives somewhere else in this manifest" is a normal lookup outcome
//! rather than an error path.
//!
//! - **toml_doc**: `pyproject.toml` edits through `toml_edit` (comments and layout preserved)
//! - **json_doc**: `package.json` edits through `serde_json` (key order preserved, 2-space indent)
//! - **embedded**: the `__version__ = "x.y.z"` literal in Python sources
//! - **sync**: plan-then-commit synchronization of every tracked file

pub mod embedded;
pub mod json_doc;
pub mod sync;
pub mod toml_doc;

pub use sync::{ManifestSynchronizer, SyncReport};

use crate::core::error::{ReleaseResult, ResultExt, VersionError};
use std::fmt;
use std::fs;
use std::path::Path;

/// Dotted key path into a manifest (`tool.poetry.version`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPath(pub &'static [&'static str]);

impl KeyPath {
  pub fn keys(&self) -> &'static [&'static str] {
    self.0
  }
}

impl fmt::Display for KeyPath {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0.join("."))
  }
}

const POETRY_VERSION: KeyPath = KeyPath(&["tool", "poetry", "version"]);
const PROJECT_VERSION: KeyPath = KeyPath(&["project", "version"]);
const TOP_LEVEL_VERSION: KeyPath = KeyPath(&["version"]);

const PROJECT_NAME: KeyPath = KeyPath(&["project", "name"]);
const POETRY_NAME: KeyPath = KeyPath(&["tool", "poetry", "name"]);
const TOP_LEVEL_NAME: KeyPath = KeyPath(&["name"]);

/// On-disk encoding of a manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
  Toml,
  Json,
}

/// The manifests a release touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestKind {
  /// Python package `pyproject.toml`
  PyProject,
  /// JavaScript package `package.json`
  PackageJson,
  /// Workspace root `pyproject.toml` mirroring the release version
  WorkspaceRoot,
}

impl ManifestKind {
  /// Version locations in the order they are tried
  pub fn version_lookup(self) -> &'static [KeyPath] {
    match self {
      // Build-backend-specific location first, then standard project metadata
      ManifestKind::PyProject => &[POETRY_VERSION, PROJECT_VERSION],
      ManifestKind::PackageJson => &[TOP_LEVEL_VERSION],
      ManifestKind::WorkspaceRoot => &[PROJECT_VERSION],
    }
  }

  /// Package name locations in the order they are tried
  pub fn name_lookup(self) -> &'static [KeyPath] {
    match self {
      ManifestKind::PyProject | ManifestKind::WorkspaceRoot => &[PROJECT_NAME, POETRY_NAME],
      ManifestKind::PackageJson => &[TOP_LEVEL_NAME],
    }
  }

  pub fn format(self) -> ManifestFormat {
    match self {
      ManifestKind::PyProject | ManifestKind::WorkspaceRoot => ManifestFormat::Toml,
      ManifestKind::PackageJson => ManifestFormat::Json,
    }
  }

  fn tried(self) -> Vec<String> {
    self.version_lookup().iter().map(|l| l.to_string()).collect()
  }
}

/// Version found in manifest text, with where it was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FoundVersion {
  pub location: KeyPath,
  pub version: String,
}

/// Look up the version in manifest text
///
/// Returns `Ok(None)` when no location holds a string; parse failures are errors.
pub fn find_version(content: &str, kind: ManifestKind) -> ReleaseResult<Option<FoundVersion>> {
  match kind.format() {
    ManifestFormat::Toml => toml_doc::find_string(content, kind.version_lookup()),
    ManifestFormat::Json => json_doc::find_string(content, kind.version_lookup()),
  }
  .map(|found| found.map(|(location, version)| FoundVersion { location, version }))
}

/// Rewrite the version in manifest text
///
/// Returns `Ok(None)` when no location holds a string.
pub fn rewrite_version(content: &str, kind: ManifestKind, new_version: &str) -> ReleaseResult<Option<String>> {
  match kind.format() {
    ManifestFormat::Toml => toml_doc::replace_string(content, kind.version_lookup(), new_version),
    ManifestFormat::Json => json_doc::replace_string(content, kind.version_lookup(), new_version),
  }
}

/// Read the version from a manifest file
pub fn read_version(manifest_path: &Path, kind: ManifestKind) -> ReleaseResult<String> {
  let content =
    fs::read_to_string(manifest_path).with_context(|| format!("Failed to read {}", manifest_path.display()))?;

  let found = find_version(&content, kind).with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

  match found {
    Some(found) => {
      tracing::debug!(
        manifest = %manifest_path.display(),
        location = %found.location,
        version = %found.version,
        "read manifest version"
      );
      Ok(found.version)
    }
    None => Err(
      VersionError::VersionFieldNotFound {
        path: manifest_path.to_path_buf(),
        tried: kind.tried(),
      }
      .into(),
    ),
  }
}

/// Write a new version into a manifest file, preserving unrelated content
///
/// Single-target form of a [`ManifestSynchronizer`] pass with one required
/// target; `prepare` registers every manifest in one pass instead of calling this.
#[allow(dead_code)]
pub fn write_version(manifest_path: &Path, kind: ManifestKind, new_version: &str) -> ReleaseResult<()> {
  ManifestSynchronizer::new()
    .require(manifest_path, kind)
    .sync(new_version)
    .map(|_| ())
}

/// Read the package name from a manifest file, if it declares one
pub fn read_name(manifest_path: &Path, kind: ManifestKind) -> ReleaseResult<Option<String>> {
  let content =
    fs::read_to_string(manifest_path).with_context(|| format!("Failed to read {}", manifest_path.display()))?;

  let found = match kind.format() {
    ManifestFormat::Toml => toml_doc::find_string(&content, kind.name_lookup()),
    ManifestFormat::Json => json_doc::find_string(&content, kind.name_lookup()),
  }
  .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

  Ok(found.map(|(_, name)| name))
}
