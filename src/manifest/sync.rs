//! Version synchronization across every tracked file
//!
//! Synchronization happens in two steps. Planning reads, parses and edits
//! every target in memory; any error there aborts before a single byte is
//! written. Committing then writes the planned contents.
//!
//! Targets come in three strengths:
//! - **required** manifests must exist and define a version
//! - **mirror** manifests are updated when present and defining the field
//! - **embedded** literals are updated when the file and assignment exist

use super::{ManifestKind, embedded, rewrite_version};
use crate::core::error::{ReleaseResult, ResultExt, VersionError};
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TargetKind {
  Required(ManifestKind),
  Mirror(ManifestKind),
  Embedded,
}

#[derive(Debug, Clone)]
struct SyncTarget {
  path: PathBuf,
  kind: TargetKind,
}

/// Why a target was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  /// File does not exist
  Missing,
  /// File exists but has no version field or assignment
  NoVersion,
  /// File already holds the target version
  Unchanged,
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SkipReason::Missing => write!(f, "not present"),
      SkipReason::NoVersion => write!(f, "no version field"),
      SkipReason::Unchanged => write!(f, "already up to date"),
    }
  }
}

/// Edits computed for one synchronization pass, not yet written
#[derive(Debug, Default)]
pub struct SyncPlan {
  writes: Vec<(PathBuf, String)>,
  skipped: Vec<(PathBuf, SkipReason)>,
}

impl SyncPlan {
  /// Write every planned edit
  pub fn commit(self) -> ReleaseResult<SyncReport> {
    let mut updated = Vec::with_capacity(self.writes.len());
    for (path, contents) in self.writes {
      fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
      tracing::debug!(file = %path.display(), "wrote version");
      updated.push(path);
    }

    Ok(SyncReport {
      updated,
      skipped: self.skipped,
    })
  }
}

/// Outcome of a committed synchronization pass
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
  pub updated: Vec<PathBuf>,
  pub skipped: Vec<(PathBuf, SkipReason)>,
}

/// Propagates one version into a set of files
#[derive(Debug, Default, Clone)]
pub struct ManifestSynchronizer {
  targets: Vec<SyncTarget>,
}

impl ManifestSynchronizer {
  pub fn new() -> Self {
    Self::default()
  }

  /// Track a manifest that must exist and define a version
  pub fn require(mut self, path: impl Into<PathBuf>, kind: ManifestKind) -> Self {
    self.targets.push(SyncTarget {
      path: path.into(),
      kind: TargetKind::Required(kind),
    });
    self
  }

  /// Track a manifest updated only when present and defining a version
  pub fn mirror(mut self, path: impl Into<PathBuf>, kind: ManifestKind) -> Self {
    self.targets.push(SyncTarget {
      path: path.into(),
      kind: TargetKind::Mirror(kind),
    });
    self
  }

  /// Track a source file holding a `__version__` literal
  pub fn embedded(mut self, path: impl Into<PathBuf>) -> Self {
    self.targets.push(SyncTarget {
      path: path.into(),
      kind: TargetKind::Embedded,
    });
    self
  }

  /// Compute every edit in memory
  pub fn plan(&self, new_version: &str) -> ReleaseResult<SyncPlan> {
    let mut plan = SyncPlan::default();

    for target in &self.targets {
      let content = match fs::read_to_string(&target.path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound && !matches!(target.kind, TargetKind::Required(_)) => None,
        Err(e) => return Err(e).with_context(|| format!("Failed to read {}", target.path.display())),
      };

      let Some(content) = content else {
        tracing::debug!(file = %target.path.display(), "skipping absent file");
        plan.skipped.push((target.path.clone(), SkipReason::Missing));
        continue;
      };

      let rewritten = match target.kind {
        TargetKind::Required(kind) => {
          let updated = rewrite_version(&content, kind, new_version)
            .with_context(|| format!("Failed to parse {}", target.path.display()))?;
          Some(updated.ok_or_else(|| VersionError::VersionFieldNotFound {
            path: target.path.clone(),
            tried: kind.tried(),
          })?)
        }
        // A malformed mirror is still an error; only absence is tolerated
        TargetKind::Mirror(kind) => rewrite_version(&content, kind, new_version)
          .with_context(|| format!("Failed to parse {}", target.path.display()))?,
        TargetKind::Embedded => embedded::rewrite_literal(&content, new_version)?,
      };

      match rewritten {
        Some(updated) if updated == content => plan.skipped.push((target.path.clone(), SkipReason::Unchanged)),
        Some(updated) => plan.writes.push((target.path.clone(), updated)),
        None => {
          tracing::debug!(file = %target.path.display(), "no version to update");
          plan.skipped.push((target.path.clone(), SkipReason::NoVersion));
        }
      }
    }

    Ok(plan)
  }

  /// Plan and commit in one step
  pub fn sync(&self, new_version: &str) -> ReleaseResult<SyncReport> {
    self.plan(new_version)?.commit()
  }
}
