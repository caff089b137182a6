//! Aggregated Build Feed API
//!
//! HTTP service over the feed engine. Holds the latest job snapshot and the
//! view settings in memory. Bind to 127.0.0.1 by default (internal only).

mod handlers;
mod settings;
mod state;

pub use handlers::{get_feed, get_settings, health, post_snapshot, put_settings};
pub use settings::{SettingsSubmit, SettingsView, ViewSettings};
pub use state::AppState;
