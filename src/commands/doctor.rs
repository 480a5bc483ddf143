use crate::checks::{Check, CheckContext, Severity, create_default_runner};
use crate::core::context::ProjectContext;
use crate::core::error::{ExitCode, ReleaseError, ReleaseResult};
use crate::core::probe::SystemProbe;
use std::env;

/// Run the doctor command
pub fn run_doctor(json: bool) -> ReleaseResult<()> {
  let project = ProjectContext::build(&env::current_dir()?)?;
  let probe = SystemProbe;
  let ctx = CheckContext {
    project: &project,
    probe: &probe,
  };

  let runner = create_default_runner();
  let results = runner.run_all(&ctx);
  let has_errors = results.iter().any(|r| !r.passed && r.severity == Severity::Error);

  if json {
    let json_output = serde_json::to_string_pretty(&results)
      .map_err(|e| ReleaseError::message(format!("Failed to serialize JSON: {}", e)))?;
    println!("{}", json_output);
    if has_errors {
      std::process::exit(ExitCode::Validation.as_i32());
    }
    return Ok(());
  }

  println!("🏥 Checking release readiness...\n");

  println!("📋 Registered checks:");
  for check in runner.checks() {
    println!("   • {}: {}", check.name(), check.description());
  }
  println!();

  let mut has_warnings = false;
  for result in &results {
    let icon = match (result.passed, result.severity) {
      (true, _) => "✅",
      (false, Severity::Warning) => "⚠️ ",
      (false, _) => "❌",
    };
    println!("{} {}: {}", icon, result.check_name, result.message);

    if !result.passed {
      if let Some(ref suggestion) = result.suggestion {
        println!("   💡 Fix: {}", suggestion);
      }
      if result.severity == Severity::Warning {
        has_warnings = true;
      }
    }
  }

  let passed_count = results.iter().filter(|r| r.passed).count();
  println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
  println!("Summary: {}/{} checks passed", passed_count, results.len());

  if has_errors {
    println!("\n⚠️  Critical issues found. Fix errors before releasing.");
    std::process::exit(ExitCode::Validation.as_i32());
  } else if has_warnings {
    println!("\n⚠️  Some warnings found. Consider addressing them.");
  } else {
    println!("\n✨ All checks passed! Ready to release.");
  }

  Ok(())
}
