//! Feed configuration, validated at the boundary.

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::FeedError;
use crate::types::InboundSettings;

/// Default number of feed rows per query.
pub const DEFAULT_HISTORY_SIZE: usize = 16;

/// Collision policy for a summary's `changes` mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKeying {
  /// Key by commit message. Entries sharing a message collapse and the
  /// later author wins. Matches the historical export behavior.
  Message,
  /// Key by commit id where available (message as fallback), so distinct
  /// commits that share a message keep separate rows.
  CommitId,
}

/// A filter pattern validated at the configuration boundary.
///
/// This is the only way a pattern enters the pipeline; a query never sees
/// an uncompiled string.
#[derive(Debug, Clone)]
pub struct JobPattern {
  regex: Regex,
}

impl JobPattern {
  pub fn compile(source: &str) -> Result<Self, FeedError> {
    let regex = Regex::new(source)?;
    Ok(Self { regex })
  }

  /// Unanchored search, not a full match.
  pub fn is_match(&self, haystack: &str) -> bool {
    self.regex.is_match(haystack)
  }

  pub fn as_str(&self) -> &str {
    self.regex.as_str()
  }
}

/// Tunable knobs for one aggregation query.
#[derive(Debug, Clone)]
pub struct FeedConfig {
  /// Max number of feed rows returned per query.
  pub history_size: usize,
  /// Optional filter searched in the latest build's full display name.
  pub filter: Option<JobPattern>,
  /// Collision policy for the per-build changes mapping.
  pub change_keying: ChangeKeying,
}

impl Default for FeedConfig {
  fn default() -> Self {
    Self {
      history_size: DEFAULT_HISTORY_SIZE,
      filter: None,
      change_keying: ChangeKeying::Message,
    }
  }
}

impl FeedConfig {
  /// Build a config from the snapshot's inbound settings, compiling the
  /// filter. A syntax error surfaces here, never inside a query.
  pub fn from_settings(settings: &InboundSettings) -> Result<Self, FeedError> {
    let filter = match settings.filter_regex.as_deref() {
      Some(source) => Some(JobPattern::compile(source)?),
      None => None,
    };
    Ok(Self {
      history_size: settings.history_size.unwrap_or(DEFAULT_HISTORY_SIZE),
      filter,
      change_keying: settings.change_keying.unwrap_or(ChangeKeying::Message),
    })
  }
}
