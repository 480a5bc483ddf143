//! Embedded `__version__` literal in Python sources
//!
//! The literal is optional by convention: a missing file or a file without a
//! matching assignment is left alone and reported as "not updated".

use super::ManifestSynchronizer;
use crate::core::error::{ReleaseResult, ResultExt};
use regex::{Captures, Regex};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// `__version__ = "1.2.3"` with either quote style, optional type annotation
const VERSION_LITERAL: &str =
  r#"(?m)^(?P<lead>[ \t]*__version__[ \t]*(?::[^=\n]*)?=[ \t]*)(?P<open>["'])(?P<value>[0-9][0-9.]*)(?P<close>["'])"#;

/// Replace the quoted value of every `__version__` assignment in `content`
///
/// Returns `None` when no assignment matches.
pub fn rewrite_literal(content: &str, new_version: &str) -> ReleaseResult<Option<String>> {
  let pattern = Regex::new(VERSION_LITERAL)?;
  if !pattern.is_match(content) {
    return Ok(None);
  }

  let updated = pattern.replace_all(content, |caps: &Captures| {
    format!("{}{}{}{}", &caps["lead"], &caps["open"], new_version, &caps["close"])
  });
  Ok(Some(updated.into_owned()))
}

/// Read the current embedded version, if any
pub fn read_literal(source_path: &Path) -> ReleaseResult<Option<String>> {
  let content = match fs::read_to_string(source_path) {
    Ok(content) => content,
    Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
    Err(e) => return Err(e).with_context(|| format!("Failed to read {}", source_path.display())),
  };

  let pattern = Regex::new(VERSION_LITERAL)?;
  Ok(pattern.captures(&content).map(|caps| caps["value"].to_string()))
}

/// Update the embedded version literal in place
///
/// Single-target form of a [`ManifestSynchronizer`] pass; `prepare` registers
/// the same target alongside the manifests instead of calling this. Returns
/// true when the file was rewritten. Absent file, no match, or an
/// already-current value are all silent no-ops.
#[allow(dead_code)]
pub fn sync_embedded_literal(source_path: &Path, new_version: &str) -> ReleaseResult<bool> {
  let report = ManifestSynchronizer::new().embedded(source_path).sync(new_version)?;
  Ok(!report.updated.is_empty())
}
