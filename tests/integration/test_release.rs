//! Integration tests for the release phase commands

use crate::helpers::{TestProject, run_cross_release};
use anyhow::Result;

#[test]
fn test_check_and_prepare_patch_release() -> Result<()> {
  let project = TestProject::new("1.2.3")?;
  project.install_all_tools()?;

  let output = run_cross_release(&project, &["check", "--release-type", "patch"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("1.2.3 → 1.2.4"), "stdout: {}", stdout);
  assert!(project.file_exists(".cross-release/state.json"));
  // check touches nothing but the state file
  assert!(project.read_file("python/pyproject.toml")?.contains("version = \"1.2.3\""));

  run_cross_release(&project, &["prepare"])?;

  let pyproject = project.read_file("python/pyproject.toml")?;
  assert!(pyproject.contains("version = \"1.2.4\"  # bumped by cross-release"));
  assert!(pyproject.contains("build-backend = \"hatchling.build\""));

  let package_json = project.read_file("js/package.json")?;
  assert_eq!(
    package_json,
    "{\n  \"name\": \"@cross-docs/ui\",\n  \"version\": \"1.2.4\",\n  \"scripts\": {\n    \"build\": \"vite build\"\n  }\n}\n"
  );

  assert!(
    project
      .read_file("python/cross_docs/__init__.py")?
      .contains("__version__ = \"1.2.4\"")
  );

  let calls = project.invocations()?;
  assert_eq!(calls.len(), 2, "calls: {:?}", calls);
  assert!(calls[0].starts_with(&format!("uv lock | cwd={}", project.dir("python"))));
  assert!(calls[1].starts_with(&format!("bun install | cwd={}", project.dir("js"))));

  Ok(())
}

#[test]
fn test_full_release_with_registry_overrides() -> Result<()> {
  let project = TestProject::new("0.4.1")?;
  project.install_all_tools()?;

  run_cross_release(
    &project,
    &[
      "release",
      "--release-type",
      "minor",
      "--repository",
      "https://test.pypi.org/legacy/",
      "--npm-registry",
      "https://npm.internal.example/",
    ],
  )?;

  assert!(project.read_file("js/package.json")?.contains("\"version\": \"0.5.0\""));

  let calls = project.invocations()?;
  let commands: Vec<&str> = calls.iter().map(|c| c.split(" | ").next().unwrap_or("")).collect();
  assert_eq!(
    commands,
    vec![
      "uv lock",
      "bun install",
      "uv build --out-dir dist",
      "bun run build",
      "uv publish --trusted-publishing always --publish-url https://test.pypi.org/legacy/",
      "npm publish --provenance --access public --registry https://npm.internal.example/",
    ]
  );

  assert!(calls[4].ends_with("provenance=unset"));
  assert!(calls[5].ends_with("provenance=true"));
  assert!(calls[5].contains(&format!("cwd={}", project.dir("js"))));

  let status = run_cross_release(&project, &["status", "--json"])?;
  let json: serde_json::Value = serde_json::from_slice(&status.stdout)?;
  assert_eq!(json["release"]["phase"], "published");
  assert_eq!(json["release"]["version"], "0.5.0");

  Ok(())
}

#[test]
fn test_publish_without_overrides_passes_no_registry() -> Result<()> {
  let project = TestProject::new("2.0.0")?;
  project.install_all_tools()?;

  for args in [
    &["check", "--release-type", "major"][..],
    &["prepare"][..],
    &["build"][..],
    &["publish"][..],
  ] {
    run_cross_release(&project, args)?;
  }

  let calls = project.invocations()?;
  assert!(
    calls
      .iter()
      .any(|c| c.starts_with("uv publish --trusted-publishing always | "))
  );
  assert!(
    calls
      .iter()
      .any(|c| c.starts_with("npm publish --provenance --access public | "))
  );
  assert!(!calls.iter().any(|c| c.contains("--publish-url") || c.contains("--registry")));
  assert!(project.read_file("python/pyproject.toml")?.contains("version = \"3.0.0\""));

  Ok(())
}

#[test]
fn test_python_build_failure_stops_release() -> Result<()> {
  let project = TestProject::new("1.2.3")?;
  project.install_tool("uv", Some(("build", 1)))?;
  project.install_tool("bun", None)?;
  project.install_tool("npm", None)?;

  run_cross_release(&project, &["check", "--release-type", "patch"])?;
  run_cross_release(&project, &["prepare"])?;

  let output = project.run(&["build"])?;
  assert_eq!(output.status.code(), Some(2));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(
    stderr.contains("Command failed: uv build --out-dir dist (exit code 1)"),
    "stderr: {}",
    stderr
  );

  let calls = project.invocations()?;
  assert!(!calls.iter().any(|c| c.starts_with("bun run")), "calls: {:?}", calls);

  let state: serde_json::Value = serde_json::from_str(&project.read_file(".cross-release/state.json")?)?;
  assert_eq!(state["phase"], "prepared");

  Ok(())
}

#[test]
fn test_missing_bun_skips_js_lockfile() -> Result<()> {
  let project = TestProject::new("0.1.0")?;
  project.install_tool("uv", None)?;
  project.install_tool("npm", None)?;

  run_cross_release(&project, &["check", "--release-type", "patch"])?;
  let output = run_cross_release(&project, &["prepare"])?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("Skipping JavaScript lockfile"), "stdout: {}", stdout);

  let calls = project.invocations()?;
  assert_eq!(calls.len(), 1);
  assert!(calls[0].starts_with("uv lock"));
  assert!(project.read_file("js/package.json")?.contains("\"version\": \"0.1.1\""));

  Ok(())
}

#[test]
fn test_root_manifest_is_mirrored_when_versioned() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.write_file(
    "pyproject.toml",
    "[project]\nname = \"cross-docs-workspace\"\nversion = \"1.0.0\"\n\n[tool.uv.workspace]\nmembers = [\"python\"]\n",
  )?;

  run_cross_release(&project, &["check", "--release-type", "minor"])?;
  run_cross_release(&project, &["prepare"])?;

  assert!(project.read_file("pyproject.toml")?.contains("version = \"1.1.0\""));
  Ok(())
}

#[test]
fn test_malformed_root_manifest_fails_prepare_without_writes() -> Result<()> {
  let project = TestProject::new("1.0.0")?;
  project.write_file("pyproject.toml", "[project\nversion = \"1.0.0\"\n")?;

  run_cross_release(&project, &["check", "--release-type", "patch"])?;
  let output = project.run(&["prepare"])?;
  assert!(!output.status.success());

  assert!(project.read_file("python/pyproject.toml")?.contains("version = \"1.0.0\""));
  assert!(project.read_file("js/package.json")?.contains("\"version\": \"1.0.0\""));
  Ok(())
}

#[test]
fn test_invalid_release_type_is_rejected() -> Result<()> {
  let project = TestProject::new("1.2.3")?;

  let output = project.run(&["check", "--release-type", "prerelease"])?;
  assert_eq!(output.status.code(), Some(1));
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Invalid release type 'prerelease'"), "stderr: {}", stderr);
  assert!(!project.file_exists(".cross-release/state.json"));

  Ok(())
}

#[test]
fn test_phase_without_check_is_rejected() -> Result<()> {
  let project = TestProject::new("1.2.3")?;
  project.install_all_tools()?;

  let output = project.run(&["prepare"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(String::from_utf8_lossy(&output.stderr).contains("No release in progress"));
  assert!(project.invocations()?.is_empty());

  Ok(())
}

#[test]
fn test_publish_before_build_is_out_of_order() -> Result<()> {
  let project = TestProject::new("1.2.3")?;
  project.install_all_tools()?;

  run_cross_release(&project, &["check", "--release-type", "patch"])?;
  let output = project.run(&["publish"])?;
  assert_eq!(output.status.code(), Some(3));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot run 'publish'"));
  assert!(project.invocations()?.is_empty());

  Ok(())
}
