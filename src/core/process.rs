//! External command execution
//!
//! Every release step that shells out (lock regeneration, build, publish) goes
//! through a [`CommandRunner`]. The system implementation passes stdout/stderr
//! straight through to the console and normalizes every failure, including a
//! missing executable, into `ProcessError::CommandFailed`.

use crate::core::error::{ProcessError, ReleaseResult};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

/// One external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  argv: Vec<String>,
  working_directory: PathBuf,
  environment_overrides: BTreeMap<String, String>,
}

impl CommandSpec {
  /// Create a spec running `argv` in `working_directory`
  ///
  /// The directory must already be absolute; callers resolve it.
  pub fn new<I, S>(argv: I, working_directory: impl AsRef<Path>) -> ReleaseResult<Self>
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    let argv: Vec<String> = argv.into_iter().map(Into::into).collect();
    if argv.is_empty() || argv[0].is_empty() {
      return Err(ProcessError::EmptyCommand.into());
    }

    let working_directory = working_directory.as_ref();
    if !working_directory.is_absolute() {
      return Err(
        ProcessError::RelativeWorkingDirectory {
          path: working_directory.to_path_buf(),
        }
        .into(),
      );
    }

    Ok(Self {
      argv,
      working_directory: working_directory.to_path_buf(),
      environment_overrides: BTreeMap::new(),
    })
  }

  /// Add an environment variable for this invocation only
  pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.environment_overrides.insert(key.into(), value.into());
    self
  }

  pub fn argv(&self) -> &[String] {
    &self.argv
  }

  pub fn program(&self) -> &str {
    &self.argv[0]
  }

  pub fn args(&self) -> &[String] {
    &self.argv[1..]
  }

  pub fn working_directory(&self) -> &Path {
    &self.working_directory
  }

  pub fn environment_overrides(&self) -> &BTreeMap<String, String> {
    &self.environment_overrides
  }

  /// Build the std command: inherited environment with overrides on top
  fn to_command(&self) -> Command {
    let mut cmd = Command::new(self.program());
    cmd
      .args(self.args())
      .current_dir(&self.working_directory)
      .envs(&self.environment_overrides);
    cmd
  }
}

impl fmt::Display for CommandSpec {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (key, value) in &self.environment_overrides {
      write!(f, "{}={} ", key, value)?;
    }
    write!(f, "{}", self.argv.join(" "))
  }
}

/// Runs external commands to completion
pub trait CommandRunner {
  /// Run the command, blocking until it exits
  fn run(&self, spec: &CommandSpec) -> ReleaseResult<()>;
}

/// Runs commands as real child processes with inherited stdio
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
  fn run(&self, spec: &CommandSpec) -> ReleaseResult<()> {
    println!("   $ {}", spec);
    tracing::debug!(
      argv = ?spec.argv(),
      cwd = %spec.working_directory().display(),
      overrides = spec.environment_overrides().len(),
      "spawning command"
    );

    let status = spec.to_command().status().map_err(|e| ProcessError::CommandFailed {
      argv: spec.argv().to_vec(),
      exit_code: None,
      reason: Some(format!("Failed to start {}: {}", spec.program(), e)),
    })?;

    if !status.success() {
      tracing::debug!(argv = ?spec.argv(), code = ?status.code(), "command failed");
      return Err(
        ProcessError::CommandFailed {
          argv: spec.argv().to_vec(),
          exit_code: status.code(),
          reason: None,
        }
        .into(),
      );
    }

    Ok(())
  }
}
