//! Error types for cross-release with contextual messages and exit codes
//!
//! Every failure the release lifecycle can hit is funneled into [`ReleaseError`].
//! Categories map to process exit codes, and most variants carry a help message
//! pointing the operator at the fix.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Exit codes for cross-release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
  /// User error (config, invalid args, bad manifests)
  User = 1,
  /// System error (external commands, I/O)
  System = 2,
  /// Validation failure (doctor findings, lifecycle misuse)
  Validation = 3,
}

impl ExitCode {
  /// Convert to i32 for process exit
  pub fn as_i32(self) -> i32 {
    self as i32
  }
}

/// Main error type for cross-release
#[derive(Debug)]
pub enum ReleaseError {
  /// Configuration errors
  Config(ConfigError),

  /// Version resolution and manifest lookup errors
  Version(VersionError),

  /// External command errors
  Process(ProcessError),

  /// Lifecycle ordering errors
  Pipeline(PipelineError),

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Create an error with help text
  pub fn with_help(msg: impl Into<String>, help: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: Some(help.into()),
    }
  }

  /// Add context to an existing error
  ///
  /// Structured variants are wrapped into a `Message` so the context survives
  /// while the original text stays first.
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      ReleaseError::Io(err) => ReleaseError::Message {
        message: format!("I/O error: {}", err),
        context: Some(ctx_str),
        help: None,
      },
      _ => self,
    }
  }

  /// Get the appropriate exit code for this error
  pub fn exit_code(&self) -> ExitCode {
    match self {
      ReleaseError::Config(_) => ExitCode::User,
      ReleaseError::Version(_) => ExitCode::User,
      ReleaseError::Process(_) => ExitCode::System,
      ReleaseError::Pipeline(_) => ExitCode::Validation,
      ReleaseError::Io(_) => ExitCode::System,
      ReleaseError::Message { .. } => ExitCode::User,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::Config(e) => e.help_message(),
      ReleaseError::Version(e) => e.help_message(),
      ReleaseError::Process(e) => e.help_message(),
      ReleaseError::Pipeline(e) => e.help_message(),
      ReleaseError::Message { help, .. } => help.clone(),
      ReleaseError::Io(_) => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::Config(e) => write!(f, "{}", e),
      ReleaseError::Version(e) => write!(f, "{}", e),
      ReleaseError::Process(e) => write!(f, "{}", e),
      ReleaseError::Pipeline(e) => write!(f, "{}", e),
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::TomlError> for ReleaseError {
  fn from(err: toml_edit::TomlError) -> Self {
    ReleaseError::message(format!("TOML parse error: {}", err))
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<serde_json::Error> for ReleaseError {
  fn from(err: serde_json::Error) -> Self {
    ReleaseError::message(format!("JSON error: {}", err))
  }
}

impl From<regex::Error> for ReleaseError {
  fn from(err: regex::Error) -> Self {
    ReleaseError::message(format!("Pattern error: {}", err))
  }
}

impl From<ConfigError> for ReleaseError {
  fn from(err: ConfigError) -> Self {
    ReleaseError::Config(err)
  }
}

impl From<VersionError> for ReleaseError {
  fn from(err: VersionError) -> Self {
    ReleaseError::Version(err)
  }
}

impl From<ProcessError> for ReleaseError {
  fn from(err: ProcessError) -> Self {
    ReleaseError::Process(err)
  }
}

impl From<PipelineError> for ReleaseError {
  fn from(err: PipelineError) -> Self {
    ReleaseError::Pipeline(err)
  }
}

/// Configuration-related errors
#[derive(Debug)]
pub enum ConfigError {
  /// A configured path is empty or otherwise unusable
  InvalidPath { field: String, reason: String },

  /// Package directory does not exist
  PackageDirMissing { ecosystem: String, path: PathBuf },
}

impl ConfigError {
  fn help_message(&self) -> Option<String> {
    match self {
      ConfigError::InvalidPath { field, .. } => Some(format!(
        "Fix `{}` in release.toml (paths are relative to the workspace root).",
        field
      )),
      ConfigError::PackageDirMissing { ecosystem, .. } => Some(format!(
        "Set `[{}] path` in release.toml to the package directory.",
        ecosystem
      )),
    }
  }
}

impl fmt::Display for ConfigError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ConfigError::InvalidPath { field, reason } => {
        write!(f, "Invalid path for '{}': {}", field, reason)
      }
      ConfigError::PackageDirMissing { ecosystem, path } => {
        write!(f, "{} package directory not found: {}", ecosystem, path.display())
      }
    }
  }
}

/// Version resolution and manifest lookup errors
#[derive(Debug)]
pub enum VersionError {
  /// Bump kind other than major, minor, patch
  InvalidReleaseType { value: String },

  /// Manifest version is not a semantic version
  InvalidVersion { value: String, reason: String },

  /// No lookup location in the manifest holds a version string
  VersionFieldNotFound { path: PathBuf, tried: Vec<String> },

  /// A set-once release field was assigned twice
  AlreadySet { field: &'static str },

  /// Computed next version does not sort above the previous one
  NotIncreasing { previous: String, next: String },
}

impl VersionError {
  fn help_message(&self) -> Option<String> {
    match self {
      VersionError::InvalidReleaseType { .. } => Some("Use one of: major, minor, patch.".to_string()),
      VersionError::InvalidVersion { .. } => {
        Some("The manifest version must look like MAJOR.MINOR.PATCH (e.g. 1.2.3).".to_string())
      }
      VersionError::VersionFieldNotFound { tried, .. } => {
        Some(format!("Add a version string at one of: {}", tried.join(", ")))
      }
      VersionError::AlreadySet { .. } => Some("Start a new release with `cross-release check`.".to_string()),
      VersionError::NotIncreasing { .. } => None,
    }
  }
}

impl fmt::Display for VersionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      VersionError::InvalidReleaseType { value } => {
        write!(f, "Invalid release type '{}'", value)
      }
      VersionError::InvalidVersion { value, reason } => {
        write!(f, "Invalid version '{}': {}", value, reason)
      }
      VersionError::VersionFieldNotFound { path, .. } => {
        write!(f, "No version field found in {}", path.display())
      }
      VersionError::AlreadySet { field } => {
        write!(f, "Release field '{}' is already set", field)
      }
      VersionError::NotIncreasing { previous, next } => {
        write!(f, "Next version {} is not greater than {}", next, previous)
      }
    }
  }
}

/// External command errors
#[derive(Debug)]
pub enum ProcessError {
  /// Command exited non-zero or could not be started
  ///
  /// `exit_code` is `None` when the process never ran or was killed by a signal.
  CommandFailed {
    argv: Vec<String>,
    exit_code: Option<i32>,
    reason: Option<String>,
  },

  /// Working directory handed to a command spec was relative
  RelativeWorkingDirectory { path: PathBuf },

  /// Command spec with no executable
  EmptyCommand,
}

impl ProcessError {
  fn help_message(&self) -> Option<String> {
    match self {
      ProcessError::CommandFailed { argv, exit_code: None, .. } => argv
        .first()
        .map(|exe| format!("Make sure `{}` is installed and on PATH. Run `cross-release doctor`.", exe)),
      ProcessError::CommandFailed { .. } => Some(
        "Fix the failure above and re-run the phase. Already-written files and completed commands are not rolled back; \
         see .cross-release/state.json for the last completed phase."
          .to_string(),
      ),
      _ => None,
    }
  }
}

impl fmt::Display for ProcessError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ProcessError::CommandFailed { argv, exit_code, reason } => {
        write!(f, "Command failed: {}", argv.join(" "))?;
        match exit_code {
          Some(code) => write!(f, " (exit code {})", code)?,
          None => write!(f, " (exit code unavailable)")?,
        }
        if let Some(reason) = reason {
          write!(f, "\n{}", reason)?;
        }
        Ok(())
      }
      ProcessError::RelativeWorkingDirectory { path } => {
        write!(f, "Working directory must be absolute: {}", path.display())
      }
      ProcessError::EmptyCommand => write!(f, "Command has no executable"),
    }
  }
}

/// Lifecycle ordering errors
#[derive(Debug)]
pub enum PipelineError {
  /// A phase was invoked from a state it cannot start from
  PhaseOutOfOrder {
    phase: &'static str,
    expected: String,
    actual: String,
  },
}

impl PipelineError {
  fn help_message(&self) -> Option<String> {
    match self {
      PipelineError::PhaseOutOfOrder { .. } => {
        Some("Phases run in order: check → prepare → build → publish. Run `cross-release status`.".to_string())
      }
    }
  }
}

impl fmt::Display for PipelineError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      PipelineError::PhaseOutOfOrder {
        phase,
        expected,
        actual,
      } => write!(
        f,
        "Cannot run '{}': release is {} (expected {})",
        phase, actual, expected
      ),
    }
  }
}

/// Result type alias for cross-release
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
