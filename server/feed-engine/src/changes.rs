//! Change summarizer: flattens a build's change sets into one mapping.

use std::collections::BTreeMap;

use crate::config::ChangeKeying;
use crate::types::Build;

/// Flatten every entry of every change set into `key -> author`, in set
/// order then entry order. Later entries overwrite earlier ones on key
/// collision.
///
/// Under `ChangeKeying::Message` the key is the commit message, so two
/// commits sharing a message collapse into one row. `ChangeKeying::CommitId`
/// keys by the entry's commit id when present (message as fallback), which
/// keeps such commits apart.
pub fn summarize_changes(build: &Build, keying: ChangeKeying) -> BTreeMap<String, String> {
  let mut changes = BTreeMap::new();
  for set in &build.change_sets {
    for entry in &set.entries {
      let key = match keying {
        ChangeKeying::Message => entry.message.clone(),
        ChangeKeying::CommitId => entry
          .commit_id
          .clone()
          .unwrap_or_else(|| entry.message.clone()),
      };
      changes.insert(key, entry.author.clone());
    }
  }
  changes
}
