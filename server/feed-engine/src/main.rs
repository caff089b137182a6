//! Binary entrypoint: read one JSON snapshot from stdin, write the feed to stdout.
//!
//! Input is an InboundSnapshot document, optionally carrying query settings
//! (history size, filter regex, change keying). Output is either the feed as
//! a JSON array of build summaries, or a structured ErrorOutput object when
//! the snapshot or its settings are rejected.

use feed_engine::types::ErrorOutput;
use feed_engine::{normalize, FeedConfig, FeedEngine, FeedError, InboundSnapshot};
use std::io::{self, Read, Write};

fn main() {
  let mut raw = String::new();
  if let Err(e) = io::stdin().lock().read_to_string(&mut raw) {
    let _ = writeln!(io::stderr(), "feed-engine: read error: {}", e);
    std::process::exit(1);
  }

  match run(&raw) {
    Ok(json) => {
      let _ = io::stdout().write_all(&json);
    }
    Err(e) => {
      let err = match &e {
        FeedError::Validation { field, reason } => {
          ErrorOutput::new(reason.clone()).with_field(field.clone())
        }
        _ => ErrorOutput::new(e.to_string()),
      };
      let _ = serde_json::to_writer(io::stdout(), &err);
      std::process::exit(1);
    }
  }
}

fn run(raw: &str) -> Result<Vec<u8>, FeedError> {
  let snapshot: InboundSnapshot = serde_json::from_str(raw)?;
  let config = match &snapshot.settings {
    Some(settings) => FeedConfig::from_settings(settings)?,
    None => FeedConfig::default(),
  };
  let jobs = normalize::normalize(&snapshot)?;
  let feed = FeedEngine::new(config).aggregate(jobs);
  Ok(serde_json::to_vec(&feed)?)
}
