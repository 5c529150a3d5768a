//! Run reports for multi-step commands
//!
//! A multi-step command records every step it attempted. The first failure
//! stops the run: later steps are recorded as skipped and nothing already
//! written is rolled back.

use crate::core::error::{ReleaseError, ReleaseResult};
use chrono::Utc;
use serde::Serialize;
use std::fmt;

/// Outcome of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
  Completed,
  Failed,
  Skipped,
}

impl fmt::Display for StepStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      StepStatus::Completed => write!(f, "completed"),
      StepStatus::Failed => write!(f, "failed"),
      StepStatus::Skipped => write!(f, "skipped"),
    }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
  pub name: String,
  pub status: StepStatus,
  /// Summary on success, error text on failure
  #[serde(skip_serializing_if = "Option::is_none")]
  pub detail: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
  pub command: String,
  pub started_at: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,
  pub steps: Vec<StepReport>,
  /// Error of the failed step, kept for the exit code
  #[serde(skip)]
  failure: Option<ReleaseError>,
}

impl RunReport {
  pub fn new(command: impl Into<String>) -> Self {
    Self {
      command: command.into(),
      started_at: Utc::now().to_rfc3339(),
      version: None,
      steps: Vec::new(),
      failure: None,
    }
  }

  /// Run a step unless an earlier one failed.
  ///
  /// Returns the step's value when it ran and succeeded.
  pub fn step<T, F, S>(&mut self, name: impl Into<String>, run: F, summarize: S) -> Option<T>
  where
    F: FnOnce() -> ReleaseResult<T>,
    S: FnOnce(&T) -> String,
  {
    let name = name.into();
    if self.failure.is_some() {
      tracing::debug!(step = %name, "skipped after earlier failure");
      self.steps.push(StepReport {
        name,
        status: StepStatus::Skipped,
        detail: None,
      });
      return None;
    }

    match run() {
      Ok(value) => {
        let detail = summarize(&value);
        tracing::info!(step = %name, %detail, "step completed");
        self.steps.push(StepReport {
          name,
          status: StepStatus::Completed,
          detail: Some(detail),
        });
        Some(value)
      }
      Err(err) => {
        tracing::warn!(step = %name, error = %err, "step failed");
        self.steps.push(StepReport {
          name,
          status: StepStatus::Failed,
          detail: Some(err.to_string()),
        });
        self.failure = Some(err);
        None
      }
    }
  }

  pub fn succeeded(&self) -> bool {
    self.failure.is_none()
  }

  pub fn completed(&self) -> impl Iterator<Item = &StepReport> {
    self.steps.iter().filter(|s| s.status == StepStatus::Completed)
  }

  /// Turn the report into the command's result
  pub fn into_result(self) -> ReleaseResult<()> {
    match self.failure {
      None => Ok(()),
      Some(err) => Err(err),
    }
  }

  /// Print a human-readable summary
  pub fn print(&self) {
    println!();
    println!("📋 {} report", self.command);
    if let Some(version) = &self.version {
      println!("   Version: {}", version);
    }
    for step in &self.steps {
      let icon = match step.status {
        StepStatus::Completed => "✅",
        StepStatus::Failed => "❌",
        StepStatus::Skipped => "⏭️ ",
      };
      match &step.detail {
        Some(detail) if step.status == StepStatus::Completed => println!("   {} {} ({})", icon, step.name, detail),
        _ => println!("   {} {} [{}]", icon, step.name, step.status),
      }
    }
    println!("   {} of {} step(s) completed", self.completed().count(), self.steps.len());
    println!();
  }
}
