//! Job filter: drops buildless jobs and applies the optional name pattern.

use crate::config::JobPattern;
use crate::types::Job;

/// Keep jobs whose latest build's full display name contains the pattern.
///
/// Jobs with no builds are dropped regardless of the pattern. Surviving
/// jobs keep their input order.
pub fn filter_jobs(jobs: Vec<Job>, pattern: Option<&JobPattern>) -> Vec<Job> {
  jobs
    .into_iter()
    .filter(|job| match job.latest_build() {
      None => false,
      Some(build) => pattern.map_or(true, |p| p.is_match(&build.full_display_name)),
    })
    .collect()
}
