//! Per-ecosystem release policy
//!
//! Which tool locks, builds and publishes each package is fixed here rather
//! than configured. The JavaScript package builds with bun but publishes with
//! npm, since npm is the client that performs the provenance/OIDC handshake.

use crate::core::config::ReleaseConfig;
use crate::manifest::ManifestKind;
use std::fmt;

/// Build output directory for the Python package, relative to its package dir
pub const PYTHON_DIST_DIR: &str = "dist";

/// A package ecosystem taking part in the release
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecosystem {
  /// Python package published to PyPI with uv
  Python,
  /// JavaScript package built with bun, published to npm
  JavaScript,
}

impl Ecosystem {
  /// Every ecosystem, in execution order
  pub const ALL: [Ecosystem; 2] = [Ecosystem::Python, Ecosystem::JavaScript];

  pub fn label(self) -> &'static str {
    match self {
      Ecosystem::Python => "Python",
      Ecosystem::JavaScript => "JavaScript",
    }
  }

  /// release.toml section configuring this ecosystem
  pub fn config_section(self) -> &'static str {
    match self {
      Ecosystem::Python => "python",
      Ecosystem::JavaScript => "js",
    }
  }

  pub fn manifest_file(self) -> &'static str {
    match self {
      Ecosystem::Python => "pyproject.toml",
      Ecosystem::JavaScript => "package.json",
    }
  }

  pub fn manifest_kind(self) -> ManifestKind {
    match self {
      Ecosystem::Python => ManifestKind::PyProject,
      Ecosystem::JavaScript => ManifestKind::PackageJson,
    }
  }

  /// Tool whose availability gates lockfile regeneration
  pub fn lock_tool(self) -> &'static str {
    match self {
      Ecosystem::Python => "uv",
      Ecosystem::JavaScript => "bun",
    }
  }

  pub fn lock_argv(self) -> Vec<String> {
    match self {
      Ecosystem::Python => argv(&["uv", "lock"]),
      Ecosystem::JavaScript => argv(&["bun", "install"]),
    }
  }

  pub fn build_argv(self, config: &ReleaseConfig) -> Vec<String> {
    match self {
      // Explicit output directory: inside a uv workspace the default lands at the workspace root
      Ecosystem::Python => argv(&["uv", "build", "--out-dir", PYTHON_DIST_DIR]),
      Ecosystem::JavaScript => {
        let mut args = argv(&["bun", "run"]);
        args.push(config.js.build_script.clone());
        args
      }
    }
  }

  /// Tool that uploads the package
  pub fn publish_tool(self) -> &'static str {
    match self {
      Ecosystem::Python => "uv",
      Ecosystem::JavaScript => "npm",
    }
  }

  /// Flag selecting the registry on the publish command line
  pub fn registry_flag(self) -> &'static str {
    match self {
      Ecosystem::Python => "--publish-url",
      Ecosystem::JavaScript => "--registry",
    }
  }

  /// Publish argv with trusted publishing enabled
  ///
  /// Without an override no registry argument is passed, so the tool's own
  /// settings (`UV_PUBLISH_URL`, `.npmrc`, ...) decide.
  pub fn publish_argv(self, registry_override: Option<&str>) -> Vec<String> {
    let mut args = match self {
      Ecosystem::Python => argv(&["uv", "publish", "--trusted-publishing", "always"]),
      Ecosystem::JavaScript => argv(&["npm", "publish", "--provenance", "--access", "public"]),
    };
    if let Some(registry) = registry_override {
      args.push(self.registry_flag().to_string());
      args.push(registry.to_string());
    }
    args
  }

  /// Environment added to the publish child process only
  pub fn publish_env(self) -> &'static [(&'static str, &'static str)] {
    match self {
      Ecosystem::Python => &[],
      Ecosystem::JavaScript => &[("NPM_CONFIG_PROVENANCE", "true")],
    }
  }
}

impl fmt::Display for Ecosystem {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.label())
  }
}

fn argv(parts: &[&str]) -> Vec<String> {
  parts.iter().map(|s| s.to_string()).collect()
}
