//! HTTP handlers for the feed api.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use std::sync::Arc;

use feed_engine::types::BuildSummary;
use feed_engine::{normalize, FeedEngine, InboundSnapshot};

use crate::settings::{SettingsSubmit, SettingsView};
use crate::state::AppState;

#[derive(Serialize)]
pub struct SnapshotAck {
  pub jobs: usize,
}

pub async fn health() -> &'static str {
  "ok"
}

/// Replace the in-memory job snapshot. All-or-nothing: a snapshot that
/// fails validation leaves the previous one in place.
pub async fn post_snapshot(
  State(state): State<Arc<AppState>>,
  Json(snapshot): Json<InboundSnapshot>,
) -> Result<Json<SnapshotAck>, StatusCode> {
  let jobs = match normalize::normalize(&snapshot) {
    Ok(jobs) => jobs,
    Err(e) => {
      log::error!("snapshot rejected: {}", e);
      return Err(StatusCode::BAD_REQUEST);
    }
  };
  let count = jobs.len();
  *state.jobs.write().await = jobs;
  Ok(Json(SnapshotAck { jobs: count }))
}

/// Aggregate the current snapshot under the current settings.
pub async fn get_feed(State(state): State<Arc<AppState>>) -> Json<Vec<BuildSummary>> {
  let engine = FeedEngine::new(state.settings.read().await.feed_config());
  // The engine works on its own copy; a snapshot replaced mid-query never
  // bleeds into a feed.
  let jobs = state.jobs.read().await.clone();
  Json(engine.aggregate(jobs))
}

pub async fn get_settings(State(state): State<Arc<AppState>>) -> Json<SettingsView> {
  Json(state.settings.read().await.view())
}

/// Submit a settings document. A filter regex that fails to compile is
/// logged and the previous pattern retained; everything else still applies.
pub async fn put_settings(
  State(state): State<Arc<AppState>>,
  Json(submit): Json<SettingsSubmit>,
) -> Json<SettingsView> {
  let mut settings = state.settings.write().await;
  if let Some(reason) = settings.apply(&submit) {
    log::warn!("filter regex rejected, keeping previous: {}", reason);
  }
  Json(settings.view())
}
