//! Structured error types for the feed engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
  #[error("validation: {field}: {reason}")]
  Validation { field: String, reason: String },

  #[error("filter pattern: {0}")]
  Pattern(#[from] regex::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl FeedError {
  pub fn validation(field: &str, reason: &str) -> Self {
    Self::Validation {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }
}
