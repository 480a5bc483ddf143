//! Release record shared across lifecycle phases

use super::version::{ReleaseType, parse_version};
use crate::core::error::{ReleaseResult, VersionError};
use serde::{Deserialize, Serialize};

/// The release in flight
///
/// `release_type` is fixed at construction. `previous_version` and `version`
/// are written exactly once, during `check`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseInfo {
  release_type: ReleaseType,
  #[serde(default)]
  previous_version: Option<String>,
  #[serde(default)]
  version: Option<String>,
}

impl ReleaseInfo {
  pub fn new(release_type: ReleaseType) -> Self {
    Self {
      release_type,
      previous_version: None,
      version: None,
    }
  }

  pub fn release_type(&self) -> ReleaseType {
    self.release_type
  }

  pub fn previous_version(&self) -> Option<&str> {
    self.previous_version.as_deref()
  }

  pub fn version(&self) -> Option<&str> {
    self.version.as_deref()
  }

  /// Record the resolved versions
  ///
  /// Fails if either field is already set or `next` does not sort above
  /// `previous`.
  pub fn set_versions(&mut self, previous: String, next: String) -> ReleaseResult<()> {
    if self.previous_version.is_some() {
      return Err(VersionError::AlreadySet {
        field: "previous_version",
      }
      .into());
    }
    if self.version.is_some() {
      return Err(VersionError::AlreadySet { field: "version" }.into());
    }

    if parse_version(&next)? <= parse_version(&previous)? {
      return Err(VersionError::NotIncreasing { previous, next }.into());
    }

    self.previous_version = Some(previous);
    self.version = Some(next);
    Ok(())
  }
}
