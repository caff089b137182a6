//! Core types for the feed engine (JSON contracts + internal models).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::ChangeKeying;

// ---------------------------------------------------------------------------
// Inbound types (JSON contract — what the caller sends)
// ---------------------------------------------------------------------------

/// The snapshot document read from stdin. Unknown fields are silently ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundSnapshot {
  #[serde(default)]
  pub settings: Option<InboundSettings>,
  pub jobs: Vec<InboundJob>,
}

/// Optional per-query settings carried inside the snapshot document.
#[derive(Debug, Clone, Deserialize)]
pub struct InboundSettings {
  #[serde(default)]
  pub history_size: Option<usize>,
  #[serde(default)]
  pub filter_regex: Option<String>,
  #[serde(default)]
  pub change_keying: Option<ChangeKeying>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundJob {
  pub name: String,
  #[serde(default)]
  pub builds: Vec<InboundBuild>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundBuild {
  pub display_name: String,
  pub full_display_name: String,
  pub url: String,
  pub number: u32,
  /// Epoch milliseconds.
  pub start_time: i64,
  /// Milliseconds; 0 while the build is still running.
  #[serde(default)]
  pub duration: i64,
  /// Terminal result token, the literal "BUILDING", or absent while running.
  #[serde(default)]
  pub result: Option<String>,
  #[serde(default)]
  pub change_sets: Vec<InboundChangeSet>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundChangeSet {
  #[serde(default)]
  pub entries: Vec<InboundChangeEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InboundChangeEntry {
  pub author: String,
  pub message: String,
  #[serde(default)]
  pub commit_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Build result
// ---------------------------------------------------------------------------

/// Feed token for a build that has not finished.
pub const BUILDING: &str = "BUILDING";

/// Terminal result of a finished build. An in-progress build has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildResult {
  Success,
  Failure,
  Unstable,
  Aborted,
  NotBuilt,
}

impl BuildResult {
  pub fn from_str_loose(s: &str) -> Option<Self> {
    match s.to_ascii_uppercase().as_str() {
      "SUCCESS" => Some(Self::Success),
      "FAILURE" => Some(Self::Failure),
      "UNSTABLE" => Some(Self::Unstable),
      "ABORTED" => Some(Self::Aborted),
      "NOT_BUILT" => Some(Self::NotBuilt),
      _ => None,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Self::Success => "SUCCESS",
      Self::Failure => "FAILURE",
      Self::Unstable => "UNSTABLE",
      Self::Aborted => "ABORTED",
      Self::NotBuilt => "NOT_BUILT",
    }
  }
}

// ---------------------------------------------------------------------------
// Internal canonical types
// ---------------------------------------------------------------------------

/// Canonical job after normalization. Builds are sorted most recent first.
#[derive(Debug, Clone)]
pub struct Job {
  pub name: String,
  pub builds: Vec<Build>,
}

impl Job {
  /// The job's most recent build, if it has any.
  pub fn latest_build(&self) -> Option<&Build> {
    self.builds.first()
  }
}

#[derive(Debug, Clone)]
pub struct Build {
  pub display_name: String,
  pub full_display_name: String,
  pub url: String,
  pub number: u32,
  pub start_time: i64,
  pub duration: i64,
  pub result: Option<BuildResult>,
  pub change_sets: Vec<ChangeSet>,
}

#[derive(Debug, Clone)]
pub struct ChangeSet {
  pub entries: Vec<ChangeEntry>,
}

#[derive(Debug, Clone)]
pub struct ChangeEntry {
  pub author: String,
  pub message: String,
  pub commit_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Output types (JSON contract — what we emit)
// ---------------------------------------------------------------------------

/// One feed row. Field names follow the export contract consumed by the
/// presentation layer; `jobName` carries the run's display name and
/// `buildName` its full display name.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSummary {
  pub job_name: String,
  pub build_name: String,
  pub url: String,
  pub number: u32,
  pub start_time: i64,
  pub duration: i64,
  pub result: String,
  /// Ordered so that serialization is deterministic.
  pub changes: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// CLI stream wrappers
// ---------------------------------------------------------------------------

/// Structured error output for a rejected snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorOutput {
  pub error: bool,
  pub message: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub field: Option<String>,
}

impl ErrorOutput {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      error: true,
      message: message.into(),
      field: None,
    }
  }

  pub fn with_field(mut self, field: impl Into<String>) -> Self {
    self.field = Some(field.into());
    self
  }
}
