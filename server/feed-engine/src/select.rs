//! Build selector: latest build per job, ordered by recency, bounded.

use crate::types::{Build, Job};

/// Take each job's most recent build, most recently started first, at most
/// `limit` entries. Equal start times keep the jobs' relative order (the
/// sort is stable).
pub fn select_builds(jobs: &[Job], limit: usize) -> Vec<&Build> {
  let mut latest: Vec<&Build> = jobs.iter().filter_map(Job::latest_build).collect();
  latest.sort_by(|a, b| b.start_time.cmp(&a.start_time));
  latest.truncate(limit);
  latest
}
