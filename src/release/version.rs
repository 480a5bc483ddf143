//! Version resolution: current version + release type → next version

use crate::core::error::{ReleaseResult, VersionError};
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of version bump requested for a release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
  /// Major version bump (breaking changes)
  Major,
  /// Minor version bump (new features)
  Minor,
  /// Patch version bump (bug fixes)
  Patch,
}

impl ReleaseType {
  /// Apply bump to a semver version
  ///
  /// Pre-release and build metadata on the input are dropped.
  pub fn apply(&self, version: &Version) -> Version {
    match self {
      ReleaseType::Major => Version::new(version.major + 1, 0, 0),
      ReleaseType::Minor => Version::new(version.major, version.minor + 1, 0),
      ReleaseType::Patch => Version::new(version.major, version.minor, version.patch + 1),
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      ReleaseType::Major => "major",
      ReleaseType::Minor => "minor",
      ReleaseType::Patch => "patch",
    }
  }
}

impl fmt::Display for ReleaseType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ReleaseType {
  type Err = VersionError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "major" => Ok(ReleaseType::Major),
      "minor" => Ok(ReleaseType::Minor),
      "patch" => Ok(ReleaseType::Patch),
      _ => Err(VersionError::InvalidReleaseType { value: s.to_string() }),
    }
  }
}

/// Parse a manifest version
///
/// Accepts full semver, an optional leading `v`, and short numeric forms
/// (`1`, `1.2`) which are zero-padded.
pub fn parse_version(raw: &str) -> ReleaseResult<Version> {
  let trimmed = raw.trim();
  let candidate = trimmed.strip_prefix('v').unwrap_or(trimmed);

  let parts: Vec<&str> = candidate.split('.').collect();
  let is_short = (1..3).contains(&parts.len())
    && parts
      .iter()
      .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()));

  let padded;
  let candidate = if is_short {
    let mut full = parts.clone();
    full.resize(3, "0");
    padded = full.join(".");
    padded.as_str()
  } else {
    candidate
  };

  Version::parse(candidate).map_err(|e| {
    VersionError::InvalidVersion {
      value: raw.to_string(),
      reason: e.to_string(),
    }
    .into()
  })
}

/// Compute `(previous, next)` for a bump
///
/// `previous` is the current version exactly as written in the manifest.
/// Pure: the same inputs always give the same output.
pub fn resolve(current_version: &str, release_type: ReleaseType) -> ReleaseResult<(String, String)> {
  let current = parse_version(current_version)?;
  let next = release_type.apply(&current);
  Ok((current_version.to_string(), next.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::error::ReleaseError;

  #[test]
  fn test_release_type_apply() {
    let v = Version::new(1, 2, 3);

    assert_eq!(ReleaseType::Major.apply(&v).to_string(), "2.0.0");
    assert_eq!(ReleaseType::Minor.apply(&v).to_string(), "1.3.0");
    assert_eq!(ReleaseType::Patch.apply(&v).to_string(), "1.2.4");
  }

  #[test]
  fn test_resolve_keeps_previous_verbatim() {
    assert_eq!(
      resolve("1.2.3", ReleaseType::Patch).unwrap(),
      ("1.2.3".to_string(), "1.2.4".to_string())
    );
    assert_eq!(
      resolve("v0.9", ReleaseType::Minor).unwrap(),
      ("v0.9".to_string(), "0.10.0".to_string())
    );
  }

  #[test]
  fn test_prerelease_and_build_metadata_ignored() {
    assert_eq!(resolve("1.2.3-rc.1", ReleaseType::Patch).unwrap().1, "1.2.4");
    assert_eq!(resolve("1.2.3+build.7", ReleaseType::Minor).unwrap().1, "1.3.0");
  }

  #[test]
  fn test_next_is_strictly_greater_and_monotonic() {
    let starts = ["0.0.0", "0.1.9", "1.2.3", "1.2.3-alpha", "9.99.999", "2"];
    let kinds = [ReleaseType::Major, ReleaseType::Minor, ReleaseType::Patch];

    for start in starts {
      for kind in kinds {
        let (_, first) = resolve(start, kind).unwrap();
        let (_, second) = resolve(&first, kind).unwrap();
        let start_v = parse_version(start).unwrap();
        let first_v = parse_version(&first).unwrap();
        let second_v = parse_version(&second).unwrap();
        assert!(first_v > start_v, "{kind} from {start} gave {first}");
        assert!(second_v > first_v, "{kind} from {first} gave {second}");
      }
    }
  }

  #[test]
  fn test_resolve_is_idempotent() {
    assert_eq!(
      resolve("3.4.5", ReleaseType::Major).unwrap(),
      resolve("3.4.5", ReleaseType::Major).unwrap()
    );
  }

  #[test]
  fn test_release_type_parsing() {
    assert_eq!("major".parse::<ReleaseType>().unwrap(), ReleaseType::Major);
    assert_eq!(" Minor ".parse::<ReleaseType>().unwrap(), ReleaseType::Minor);
    assert_eq!("PATCH".parse::<ReleaseType>().unwrap(), ReleaseType::Patch);
    assert!(matches!(
      "prerelease".parse::<ReleaseType>(),
      Err(VersionError::InvalidReleaseType { .. })
    ));
    assert!("".parse::<ReleaseType>().is_err());
  }

  #[test]
  fn test_invalid_versions() {
    for raw in ["", "abc", "1.2.3.4", "1..2", "1.2.x"] {
      assert!(
        matches!(
          parse_version(raw),
          Err(ReleaseError::Version(VersionError::InvalidVersion { .. }))
        ),
        "{raw} should not parse"
      );
    }
  }
}
