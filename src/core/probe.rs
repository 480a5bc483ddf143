//! Tool availability probing
//!
//! Absence of a tool is an expected outcome, not an error: the pipeline uses
//! the answer to skip optional steps such as lockfile regeneration.

use std::process::{Command, Stdio};

/// Answers whether an external tool can be run
pub trait ToolProbe {
  /// True when `<tool> --version` exits successfully
  fn is_available(&self, tool: &str) -> bool;
}

/// Probes by running the tool's version query with output discarded
///
/// Results are never cached; installation state can change between runs.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl ToolProbe for SystemProbe {
  fn is_available(&self, tool: &str) -> bool {
    let available = Command::new(tool)
      .arg("--version")
      .stdin(Stdio::null())
      .stdout(Stdio::null())
      .stderr(Stdio::null())
      .status()
      .map(|status| status.success())
      .unwrap_or(false);

    tracing::debug!(tool, available, "probed tool");
    available
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_tool_is_unavailable() {
    assert!(!SystemProbe.is_available("cross-release-definitely-not-installed"));
  }

  #[cfg(unix)]
  #[test]
  fn test_failing_version_query_is_unavailable() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::TempDir::new().unwrap();
    let tool = dir.path().join("broken-tool");
    std::fs::write(&tool, "#!/bin/sh\nexit 7\n").unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert!(!SystemProbe.is_available(tool.to_str().unwrap()));
  }

  #[cfg(unix)]
  #[test]
  fn test_working_version_query_is_available() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::TempDir::new().unwrap();
    let tool = dir.path().join("good-tool");
    std::fs::write(&tool, "#!/bin/sh\necho good-tool 1.0.0\n").unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    assert!(SystemProbe.is_available(tool.to_str().unwrap()));
  }
}
