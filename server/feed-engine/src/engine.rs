//! Core engine: runs the filter -> select -> summarize pipeline.

use crate::changes;
use crate::config::FeedConfig;
use crate::filter;
use crate::select;
use crate::types::{Build, BuildSummary, Job, BUILDING};

/// The feed aggregation engine. Holds the query configuration; each call
/// works on a fresh snapshot and keeps no state between calls, so
/// concurrent queries need no coordination.
pub struct FeedEngine {
  config: FeedConfig,
}

impl FeedEngine {
  pub fn new(config: FeedConfig) -> Self {
    Self { config }
  }

  pub fn with_defaults() -> Self {
    Self::new(FeedConfig::default())
  }

  /// Aggregate one snapshot into a bounded, recency-ordered feed.
  ///
  /// One row per eligible job (its most recent build), most recently
  /// started first, at most `history_size` rows.
  pub fn aggregate(&self, jobs: Vec<Job>) -> Vec<BuildSummary> {
    let eligible = filter::filter_jobs(jobs, self.config.filter.as_ref());
    let selected = select::select_builds(&eligible, self.config.history_size);
    selected
      .into_iter()
      .map(|build| self.assemble_summary(build))
      .collect()
  }

  fn assemble_summary(&self, build: &Build) -> BuildSummary {
    BuildSummary {
      job_name: build.display_name.clone(),
      build_name: build.full_display_name.clone(),
      url: build.url.clone(),
      number: build.number,
      start_time: build.start_time,
      duration: build.duration,
      result: match build.result {
        Some(result) => result.as_str().to_string(),
        None => BUILDING.to_string(),
      },
      changes: changes::summarize_changes(build, self.config.change_keying),
    }
  }
}
