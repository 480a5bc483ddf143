//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A two-package project with fake release tools on its own PATH
pub struct TestProject {
  _root: TempDir,
  pub path: PathBuf,
  bin: PathBuf,
  log: PathBuf,
}

impl TestProject {
  /// Python package `cross-docs` and JS package `@cross-docs/ui`, both at `version`
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let path = fs::canonicalize(root.path())?;
    let bin = path.join(".fake-bin");
    let log = path.join(".fake-bin.log");
    fs::create_dir_all(&bin)?;
    fs::create_dir_all(path.join("python/cross_docs"))?;
    fs::create_dir_all(path.join("js"))?;

    fs::write(
      path.join("python/pyproject.toml"),
      format!(
        r#"[project]
name = "cross-docs"
version = "{}"  # bumped by cross-release
requires-python = ">=3.10"

[build-system]
requires = ["hatchling"]
build-backend = "hatchling.build"
"#,
        version
      ),
    )?;
    fs::write(
      path.join("python/cross_docs/__init__.py"),
      format!("\"\"\"Cross docs.\"\"\"\n\n__version__ = \"{}\"\n", version),
    )?;
    fs::write(
      path.join("js/package.json"),
      format!(
        "{{\n  \"name\": \"@cross-docs/ui\",\n  \"version\": \"{}\",\n  \"scripts\": {{\n    \"build\": \"vite build\"\n  }}\n}}\n",
        version
      ),
    )?;

    Ok(Self {
      _root: root,
      path,
      bin,
      log,
    })
  }

  /// Install a fake tool that records each invocation
  ///
  /// `fail_on` makes the given subcommand exit with the given code.
  pub fn install_tool(&self, name: &str, fail_on: Option<(&str, i32)>) -> Result<()> {
    let failure = match fail_on {
      Some((subcommand, code)) => format!("if [ \"$1\" = \"{}\" ]; then exit {}; fi\n", subcommand, code),
      None => String::new(),
    };
    let script = format!(
      r#"#!/bin/sh
if [ "$1" = "--version" ]; then
  echo "{name} 0.0.0-fake"
  exit 0
fi
echo "{name} $* | cwd=$(pwd -P) | provenance=${{NPM_CONFIG_PROVENANCE:-unset}}" >> "{log}"
{failure}exit 0
"#,
      name = name,
      log = self.log.display(),
      failure = failure
    );

    let tool = self.bin.join(name);
    fs::write(&tool, script)?;
    fs::set_permissions(&tool, fs::Permissions::from_mode(0o755))?;
    Ok(())
  }

  /// Install working `uv`, `bun` and `npm`
  pub fn install_all_tools(&self) -> Result<()> {
    for tool in ["uv", "bun", "npm"] {
      self.install_tool(tool, None)?;
    }
    Ok(())
  }

  /// Recorded tool invocations, in order
  pub fn invocations(&self) -> Result<Vec<String>> {
    if !self.log.exists() {
      return Ok(Vec::new());
    }
    Ok(fs::read_to_string(&self.log)?.lines().map(String::from).collect())
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(fs::read_to_string(self.path.join(path))?)
  }

  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    fs::write(self.path.join(path), content)?;
    Ok(())
  }

  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  pub fn dir(&self, rel: &str) -> String {
    self.path.join(rel).display().to_string()
  }

  /// Run the binary and return its output regardless of exit status
  pub fn run(&self, args: &[&str]) -> Result<Output> {
    run_in(&self.path, &self.bin, args)
  }
}

fn run_in(cwd: &Path, bin: &Path, args: &[&str]) -> Result<Output> {
  Command::new(env!("CARGO_BIN_EXE_cross-release"))
    .current_dir(cwd)
    .args(args)
    .env("PATH", bin)
    .env_remove("RUST_LOG")
    .env_remove("NPM_CONFIG_PROVENANCE")
    .output()
    .context("Failed to run cross-release")
}

/// Run cross-release and fail unless it succeeds
pub fn run_cross_release(project: &TestProject, args: &[&str]) -> Result<Output> {
  let output = project.run(args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "cross-release command failed: cross-release {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}
