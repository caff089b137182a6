//! Shared in-memory state for the api.

use tokio::sync::RwLock;

use feed_engine::types::Job;

use crate::settings::ViewSettings;

/// Current snapshot + settings shared across handlers.
pub struct AppState {
  pub jobs: RwLock<Vec<Job>>,
  pub settings: RwLock<ViewSettings>,
}

impl AppState {
  pub fn new() -> Self {
    Self {
      jobs: RwLock::new(Vec::new()),
      settings: RwLock::new(ViewSettings::default()),
    }
  }
}

impl Default for AppState {
  fn default() -> Self {
    Self::new()
  }
}
