//! `status`: current versions and the release in flight

use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::manifest::{self, ManifestKind, embedded};
use crate::release::{Ecosystem, ReleaseState};
use serde::Serialize;
use std::env;
use std::path::PathBuf;

/// Version of one tracked file, `None` when absent or unreadable
#[derive(Debug, Clone, Serialize)]
pub struct FileVersion {
  pub path: PathBuf,
  pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
  pub python: FileVersion,
  pub js: FileVersion,
  pub root: FileVersion,
  pub version_file: Option<FileVersion>,
  /// Python and JavaScript manifests disagree
  pub drift: bool,
  pub release: Option<ReleaseState>,
}

impl StatusReport {
  pub fn gather(ctx: &ProjectContext) -> ReleaseResult<Self> {
    let python = manifest_version(ctx.manifest_path(Ecosystem::Python), ManifestKind::PyProject);
    let js = manifest_version(ctx.manifest_path(Ecosystem::JavaScript), ManifestKind::PackageJson);
    let root = manifest_version(ctx.root_manifest_path(), ManifestKind::WorkspaceRoot);

    let version_file = match ctx.version_file_path() {
      Ok(Some(path)) => {
        let version = embedded::read_literal(&path).unwrap_or_else(|e| {
          tracing::debug!(file = %path.display(), error = %e, "unreadable version file");
          None
        });
        Some(FileVersion { path, version })
      }
      Ok(None) => None,
      Err(e) => {
        tracing::debug!(error = %e, "could not determine version file");
        None
      }
    };

    let drift = matches!((&python.version, &js.version), (Some(p), Some(j)) if p != j);

    Ok(Self {
      python,
      js,
      root,
      version_file,
      drift,
      release: ReleaseState::load(ctx)?,
    })
  }
}

fn manifest_version(path: PathBuf, kind: ManifestKind) -> FileVersion {
  let version = match manifest::read_version(&path, kind) {
    Ok(version) => Some(version),
    Err(e) => {
      tracing::debug!(file = %path.display(), error = %e, "no version");
      None
    }
  };
  FileVersion { path, version }
}

pub fn run_status(json: bool) -> ReleaseResult<()> {
  let ctx = ProjectContext::build(&env::current_dir()?)?;
  let report = StatusReport::gather(&ctx)?;

  if json {
    println!(
      "{}",
      serde_json::to_string_pretty(&report)
        .map_err(|e| ReleaseError::message(format!("Serialization error: {}", e)))?
    );
  } else {
    print_status(&ctx, &report);
  }

  Ok(())
}

fn print_status(ctx: &ProjectContext, report: &StatusReport) {
  println!("📦 Versions");
  print_line(ctx, "Python", &report.python);
  print_line(ctx, "JavaScript", &report.js);
  if report.root.version.is_some() {
    print_line(ctx, "Workspace", &report.root);
  }
  if let Some(version_file) = &report.version_file {
    print_line(ctx, "__version__", version_file);
  }

  if report.drift {
    println!("\n⚠️  Python and JavaScript versions differ");
  }

  println!();
  match &report.release {
    Some(state) => {
      println!("🚀 Release in progress");
      println!("   type:    {}", state.info.release_type());
      println!(
        "   version: {} → {}",
        state.info.previous_version().unwrap_or("?"),
        state.info.version().unwrap_or("?")
      );
      println!("   phase:   {}", state.phase);
      println!("   updated: {}", state.updated_at.to_rfc3339());
    }
    None => println!("No release in progress"),
  }
}

fn print_line(ctx: &ProjectContext, label: &str, file: &FileVersion) {
  let shown = file.path.strip_prefix(ctx.workspace_root()).unwrap_or(&file.path);
  match &file.version {
    Some(version) => println!("   {:<11} {:<10} {}", label, version, shown.display()),
    None => println!("   {:<11} {:<10} {}", label, "-", shown.display()),
  }
}
