//! External tool availability

use super::trait_def::{Check, CheckContext, CheckResult, Severity};
use crate::core::error::ReleaseResult;
use serde_json::json;

/// Reports whether one external tool answers `--version`
pub struct ToolCheck {
  name: String,
  tool: &'static str,
  purpose: &'static str,
  missing: Severity,
}

impl ToolCheck {
  pub fn new(tool: &'static str, purpose: &'static str, missing: Severity) -> Self {
    Self {
      name: format!("tool-{}", tool),
      tool,
      purpose,
      missing,
    }
  }
}

impl Check for ToolCheck {
  fn name(&self) -> &str {
    &self.name
  }

  fn description(&self) -> &str {
    self.purpose
  }

  fn run(&self, ctx: &CheckContext<'_>) -> ReleaseResult<CheckResult> {
    let available = ctx.probe.is_available(self.tool);
    let details = json!({ "tool": self.tool, "available": available });

    if available {
      return Ok(CheckResult::pass(self.name(), format!("{} is available", self.tool)).with_details(details));
    }

    let message = format!("{} not found on PATH", self.tool);
    let suggestion = Some(format!("Install {} ({})", self.tool, self.purpose));
    let result = match self.missing {
      Severity::Error => CheckResult::error(self.name(), message, suggestion),
      _ => CheckResult::warning(self.name(), message, suggestion),
    };
    Ok(result.with_details(details))
  }
}
