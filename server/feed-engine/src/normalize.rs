//! Normalize the inbound snapshot into canonical internal models.

use chrono::{DateTime, Utc};

use crate::error::FeedError;
use crate::types::*;

/// Parse and validate an inbound snapshot into canonical jobs.
///
/// Rejecting any job rejects the whole snapshot; a feed is never aggregated
/// from partially valid data.
pub fn normalize(raw: &InboundSnapshot) -> Result<Vec<Job>, FeedError> {
  raw.jobs.iter().map(normalize_job).collect()
}

fn normalize_job(raw: &InboundJob) -> Result<Job, FeedError> {
  if raw.name.is_empty() {
    return Err(FeedError::validation("jobs[].name", "must not be empty"));
  }

  let mut builds = raw
    .builds
    .iter()
    .map(normalize_build)
    .collect::<Result<Vec<_>, FeedError>>()?;

  // Callers usually send builds newest first, but "latest" must not depend
  // on their ordering discipline. Build numbers are unique per job.
  builds.sort_by(|a, b| b.number.cmp(&a.number));

  Ok(Job {
    name: raw.name.clone(),
    builds,
  })
}

fn normalize_build(raw: &InboundBuild) -> Result<Build, FeedError> {
  if raw.display_name.is_empty() {
    return Err(FeedError::validation(
      "builds[].display_name",
      "must not be empty",
    ));
  }
  if raw.full_display_name.is_empty() {
    return Err(FeedError::validation(
      "builds[].full_display_name",
      "must not be empty",
    ));
  }
  if raw.url.is_empty() {
    return Err(FeedError::validation("builds[].url", "must not be empty"));
  }
  if raw.start_time < 0 || DateTime::<Utc>::from_timestamp_millis(raw.start_time).is_none() {
    return Err(FeedError::validation(
      "builds[].start_time",
      "must be a representable epoch-millis instant",
    ));
  }
  if raw.duration < 0 {
    return Err(FeedError::validation(
      "builds[].duration",
      "must not be negative",
    ));
  }

  let result = match raw.result.as_deref() {
    None => None,
    Some(token) if token.eq_ignore_ascii_case(BUILDING) => None,
    Some(token) => Some(BuildResult::from_str_loose(token).ok_or_else(|| {
      FeedError::validation(
        "builds[].result",
        "expected SUCCESS|FAILURE|UNSTABLE|ABORTED|NOT_BUILT|BUILDING",
      )
    })?),
  };

  let change_sets = raw
    .change_sets
    .iter()
    .map(|set| ChangeSet {
      entries: set
        .entries
        .iter()
        .map(|entry| ChangeEntry {
          author: entry.author.clone(),
          message: entry.message.clone(),
          commit_id: entry.commit_id.clone(),
        })
        .collect(),
    })
    .collect();

  Ok(Build {
    display_name: raw.display_name.clone(),
    full_display_name: raw.full_display_name.clone(),
    url: raw.url.clone(),
    number: raw.number,
    start_time: raw.start_time,
    duration: raw.duration,
    result,
    change_sets,
  })
}
