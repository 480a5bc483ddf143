//! Persisted release state between CLI invocations

use super::{PipelineState, ReleaseInfo};
use crate::core::context::ProjectContext;
use crate::core::error::{ReleaseResult, ResultExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;

/// Snapshot written to `.cross-release/state.json` after each successful phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseState {
  #[serde(flatten)]
  pub info: ReleaseInfo,
  pub phase: PipelineState,
  pub updated_at: DateTime<Utc>,
}

impl ReleaseState {
  pub fn new(info: ReleaseInfo, phase: PipelineState) -> Self {
    Self {
      info,
      phase,
      updated_at: Utc::now(),
    }
  }

  /// Load the persisted state, `None` when no release has been started
  pub fn load(ctx: &ProjectContext) -> ReleaseResult<Option<Self>> {
    let path = ctx.state_path();
    let content = match fs::read_to_string(&path) {
      Ok(content) => content,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e).with_context(|| format!("Failed to read {}", path.display())),
    };

    let state = serde_json::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(Some(state))
  }

  pub fn save(&self, ctx: &ProjectContext) -> ReleaseResult<()> {
    let path = ctx.state_path();
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let mut json = serde_json::to_string_pretty(self)?;
    json.push('\n');
    fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!(file = %path.display(), phase = %self.phase, "saved release state");
    Ok(())
  }
}
