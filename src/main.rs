mod checks;
mod commands;
mod core;
mod manifest;
mod release;

use clap::{Parser, Subcommand};
use core::error::{ReleaseError, print_error};

/// Release a Python package and a JavaScript package at the same version
#[derive(Parser)]
#[command(name = "cross-release")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Enable debug logging (RUST_LOG overrides)
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Release phases
  // ============================================================================
  /// Start a release: read the current version and compute the next one
  Check {
    /// Version bump: major, minor or patch
    #[arg(long)]
    release_type: String,
  },

  /// Write the new version into every manifest and regenerate lockfiles
  Prepare,

  /// Build the Python and JavaScript packages
  Build,

  /// Publish both packages with trusted publishing
  Publish {
    /// Python package index upload URL
    #[arg(long)]
    repository: Option<String>,
    /// npm registry URL
    #[arg(long)]
    npm_registry: Option<String>,
  },

  /// Run check, prepare, build and publish in one go
  Release {
    /// Version bump: major, minor or patch
    #[arg(long)]
    release_type: String,
    /// Python package index upload URL
    #[arg(long)]
    repository: Option<String>,
    /// npm registry URL
    #[arg(long)]
    npm_registry: Option<String>,
  },

  // ============================================================================
  // Inspection
  // ============================================================================
  /// Show manifest versions and the release in progress
  Status {
    /// Output status in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Check that required tools are installed and manifests are ready
  Doctor {
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },
}

fn get_styles() -> clap::builder::Styles {
  use anstyle::{AnsiColor, Color, Style};

  let yellow_heading = Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
  clap::builder::Styles::styled()
    .usage(yellow_heading)
    .header(yellow_heading)
    .literal(Style::new().fg_color(Some(Color::Ansi(AnsiColor::Green))))
    .invalid(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
    .error(Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Red))))
    .valid(Style::new().bold().underline().fg_color(Some(Color::Ansi(AnsiColor::Green))))
    .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::White))))
}

fn main() {
  let cli = Cli::parse();
  core::logging::init(cli.verbose);

  let result = match cli.command {
    Commands::Check { release_type } => commands::run_check(&release_type),
    Commands::Prepare => commands::run_prepare(),
    Commands::Build => commands::run_build(),
    Commands::Publish {
      repository,
      npm_registry,
    } => commands::run_publish(repository, npm_registry),
    Commands::Release {
      release_type,
      repository,
      npm_registry,
    } => commands::run_release(&release_type, repository, npm_registry),
    Commands::Status { json } => commands::run_status(json),
    Commands::Doctor { json } => commands::run_doctor(json),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: ReleaseError) -> ! {
  tracing::debug!(error = ?err, "command failed");
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
