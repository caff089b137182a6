//! Integration tests for the feed engine.

use feed_engine::{normalize, ChangeKeying, FeedConfig, FeedEngine, InboundSnapshot, JobPattern};

fn fixture_snapshot() -> InboundSnapshot {
  let json = r##"{
    "jobs": [
      {
        "name": "deploy-service",
        "builds": [
          {
            "display_name": "#42",
            "full_display_name": "deploy-service release-1.0 #42",
            "url": "job/deploy-service/42/",
            "number": 42,
            "start_time": 1736937000000,
            "duration": 181000,
            "result": "SUCCESS",
            "change_sets": [
              {"entries": [
                {"author": "Ada", "message": "fix retry loop", "commit_id": "abc123"},
                {"author": "Grace", "message": "bump deps", "commit_id": "def456"}
              ]},
              {"entries": [
                {"author": "Linus", "message": "bump deps", "commit_id": "0a0a0a"}
              ]}
            ]
          },
          {
            "display_name": "#41",
            "full_display_name": "deploy-service release-0.9 #41",
            "url": "job/deploy-service/41/",
            "number": 41,
            "start_time": 1736850600000,
            "duration": 175000,
            "result": "FAILURE"
          }
        ]
      },
      {
        "name": "nightly-smoke",
        "builds": []
      },
      {
        "name": "hotfix-pipeline",
        "builds": [
          {
            "display_name": "#7",
            "full_display_name": "hotfix-pipeline hotfix-2.0 #7",
            "url": "job/hotfix-pipeline/7/",
            "number": 7,
            "start_time": 1736940600000,
            "duration": 0
          }
        ]
      }
    ]
  }"##;
  serde_json::from_str(json).unwrap()
}

#[test]
fn full_feed_without_filter() {
  let snapshot = fixture_snapshot();
  let jobs = normalize::normalize(&snapshot).unwrap();
  let feed = FeedEngine::with_defaults().aggregate(jobs);

  // One row per eligible job; the buildless job is gone.
  assert_eq!(feed.len(), 2);

  // Most recently started first.
  assert_eq!(feed[0].build_name, "hotfix-pipeline hotfix-2.0 #7");
  assert_eq!(feed[0].result, "BUILDING");
  assert!(feed[0].changes.is_empty());

  let row = &feed[1];
  assert_eq!(row.job_name, "#42");
  assert_eq!(row.build_name, "deploy-service release-1.0 #42");
  assert_eq!(row.url, "job/deploy-service/42/");
  assert_eq!(row.number, 42);
  assert_eq!(row.start_time, 1_736_937_000_000);
  assert_eq!(row.duration, 181_000);
  assert_eq!(row.result, "SUCCESS");

  // Entries from both change sets are flattened; the duplicated "bump deps"
  // message collapses and the later set's author wins.
  assert_eq!(row.changes.len(), 2);
  assert_eq!(row.changes["fix retry loop"], "Ada");
  assert_eq!(row.changes["bump deps"], "Linus");
}

#[test]
fn filtered_feed_matches_substrings() {
  let snapshot = fixture_snapshot();
  let jobs = normalize::normalize(&snapshot).unwrap();
  let engine = FeedEngine::new(FeedConfig {
    filter: Some(JobPattern::compile("release").unwrap()),
    ..FeedConfig::default()
  });
  let feed = engine.aggregate(jobs);

  assert_eq!(feed.len(), 1);
  assert_eq!(feed[0].build_name, "deploy-service release-1.0 #42");
}

#[test]
fn commit_id_keying_preserves_duplicated_messages() {
  let snapshot = fixture_snapshot();
  let jobs = normalize::normalize(&snapshot).unwrap();
  let engine = FeedEngine::new(FeedConfig {
    change_keying: ChangeKeying::CommitId,
    ..FeedConfig::default()
  });
  let feed = engine.aggregate(jobs);

  let row = feed
    .iter()
    .find(|row| row.number == 42)
    .expect("build 42 in the feed");
  assert_eq!(row.changes.len(), 3);
  assert_eq!(row.changes["def456"], "Grace");
  assert_eq!(row.changes["0a0a0a"], "Linus");
}

#[test]
fn deterministic_output_across_runs() {
  let snapshot = fixture_snapshot();

  let jobs1 = normalize::normalize(&snapshot).unwrap();
  let json1 = serde_json::to_string(&FeedEngine::with_defaults().aggregate(jobs1)).unwrap();

  let jobs2 = normalize::normalize(&snapshot).unwrap();
  let json2 = serde_json::to_string(&FeedEngine::with_defaults().aggregate(jobs2)).unwrap();

  assert_eq!(json1, json2, "Same snapshot must produce identical JSON output");
}

#[test]
fn settings_inside_the_snapshot_drive_the_query() {
  let json = r##"{
    "settings": {"history_size": 1, "filter_regex": "deploy-service"},
    "jobs": [
      {
        "name": "deploy-service",
        "builds": [
          {
            "display_name": "#42",
            "full_display_name": "deploy-service release-1.0 #42",
            "url": "job/deploy-service/42/",
            "number": 42,
            "start_time": 1736937000000,
            "duration": 181000,
            "result": "SUCCESS"
          }
        ]
      }
    ]
  }"##;
  let snapshot: InboundSnapshot = serde_json::from_str(json).unwrap();
  let config = FeedConfig::from_settings(snapshot.settings.as_ref().unwrap()).unwrap();
  assert_eq!(config.history_size, 1);

  let jobs = normalize::normalize(&snapshot).unwrap();
  let feed = FeedEngine::new(config).aggregate(jobs);
  assert_eq!(feed.len(), 1);
}

#[test]
fn invalid_settings_regex_is_rejected_before_aggregation() {
  let json = r##"{
    "settings": {"filter_regex": "release-("},
    "jobs": []
  }"##;
  let snapshot: InboundSnapshot = serde_json::from_str(json).unwrap();
  let err = FeedConfig::from_settings(snapshot.settings.as_ref().unwrap()).unwrap_err();
  assert!(err.to_string().contains("filter pattern"));
}

#[test]
fn unknown_fields_are_ignored() {
  let json = r##"{
    "jobs": [
      {
        "name": "deploy-service",
        "some_unknown_field": "should be ignored",
        "builds": [
          {
            "display_name": "#1",
            "full_display_name": "deploy-service #1",
            "url": "job/deploy-service/1/",
            "number": 1,
            "start_time": 1736937000000,
            "duration": 1000,
            "result": "SUCCESS",
            "another": 42
          }
        ]
      }
    ]
  }"##;
  let snapshot: InboundSnapshot = serde_json::from_str(json).unwrap();
  let jobs = normalize::normalize(&snapshot).unwrap();
  assert_eq!(FeedEngine::with_defaults().aggregate(jobs).len(), 1);
}
