//! Integration tests for `status` and `doctor`

use crate::helpers::{TestProject, run_cross_release};
use anyhow::Result;

#[test]
fn test_status_json_without_release() -> Result<()> {
  let project = TestProject::new("0.9.0")?;

  let output = run_cross_release(&project, &["status", "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;

  assert_eq!(json["python"]["version"], "0.9.0");
  assert_eq!(json["js"]["version"], "0.9.0");
  assert_eq!(json["version_file"]["version"], "0.9.0");
  assert_eq!(json["drift"], false);
  assert!(json["release"].is_null());

  Ok(())
}

#[test]
fn test_status_reports_drift() -> Result<()> {
  let project = TestProject::new("0.9.0")?;
  project.write_file("js/package.json", "{\n  \"name\": \"@cross-docs/ui\",\n  \"version\": \"0.8.0\"\n}\n")?;

  let output = run_cross_release(&project, &["status"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("versions differ"), "stdout: {}", stdout);

  Ok(())
}

#[test]
fn test_doctor_with_all_tools_passes() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.install_all_tools()?;

  let output = run_cross_release(&project, &["doctor", "--json"])?;
  let results: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout)?;
  assert_eq!(results.len(), 4);
  assert!(results.iter().all(|r| r["passed"] == true));

  Ok(())
}

#[test]
fn test_doctor_missing_bun_is_warning() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.install_tool("uv", None)?;
  project.install_tool("npm", None)?;

  let output = run_cross_release(&project, &["doctor", "--json"])?;
  let results: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout)?;
  let bun = results
    .iter()
    .find(|r| r["check_name"] == "tool-bun")
    .ok_or_else(|| anyhow::anyhow!("tool-bun result missing"))?;
  assert_eq!(bun["passed"], false);
  assert_eq!(bun["severity"], "Warning");

  Ok(())
}

#[test]
fn test_doctor_missing_npm_fails() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.install_tool("uv", None)?;
  project.install_tool("bun", None)?;

  let output = project.run(&["doctor"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(String::from_utf8_lossy(&output.stdout).contains("tool-npm"));

  Ok(())
}

#[test]
fn test_doctor_lists_registered_checks() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.install_all_tools()?;

  let output = run_cross_release(&project, &["doctor"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("• tool-uv: Python lock, build and publish"), "stdout: {}", stdout);
  assert!(stdout.contains("• manifest-versions: Python and JavaScript manifests define a version"));
  assert!(stdout.contains("Summary: 4/4 checks passed"));

  Ok(())
}
