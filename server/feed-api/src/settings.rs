//! View settings: the engine knobs plus display-only options.

use serde::{Deserialize, Serialize};

use feed_engine::config::DEFAULT_HISTORY_SIZE;
use feed_engine::{ChangeKeying, FeedConfig, JobPattern};

const DEFAULT_FONT_SIZE: u32 = 16;

/// Effective view settings. The filter is stored pre-compiled; only valid
/// patterns are ever held here.
#[derive(Debug, Clone)]
pub struct ViewSettings {
  pub font_size: u32,
  pub build_history_size: usize,
  pub use_condensed_tables: bool,
  pub use_scrolling_commits: bool,
  pub filter: Option<JobPattern>,
}

impl Default for ViewSettings {
  fn default() -> Self {
    Self {
      font_size: DEFAULT_FONT_SIZE,
      build_history_size: DEFAULT_HISTORY_SIZE,
      use_condensed_tables: false,
      use_scrolling_commits: false,
      filter: None,
    }
  }
}

/// A submitted settings document (PUT /settings). Field names match the
/// settings form of the feed consumers.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsSubmit {
  #[serde(default)]
  pub font_size: Option<u32>,
  #[serde(default)]
  pub build_history_size: Option<usize>,
  #[serde(default)]
  pub use_condensed_tables: bool,
  #[serde(default)]
  pub use_scrolling_commits: bool,
  #[serde(default)]
  pub use_regex_filter: bool,
  #[serde(default)]
  pub filter_regex: Option<String>,
}

/// The effective settings returned to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
  pub font_size: u32,
  pub build_history_size: usize,
  pub use_condensed_tables: bool,
  pub use_scrolling_commits: bool,
  pub table_style: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub filter_regex: Option<String>,
}

impl ViewSettings {
  /// Apply one submitted document.
  ///
  /// Non-filter fields always take effect; an absent or zero font size or
  /// history size falls back to the default (stored-settings repair on
  /// load behaves the same way). The filter is cleared when
  /// `useRegexFilter` is off; otherwise the submitted pattern replaces the
  /// current one only if it compiles, and the previous pattern is retained
  /// on a syntax error. Returns the rejected pattern's error message, if
  /// any.
  pub fn apply(&mut self, submit: &SettingsSubmit) -> Option<String> {
    self.font_size = match submit.font_size {
      None | Some(0) => DEFAULT_FONT_SIZE,
      Some(n) => n,
    };
    self.build_history_size = match submit.build_history_size {
      None | Some(0) => DEFAULT_HISTORY_SIZE,
      Some(n) => n,
    };
    self.use_condensed_tables = submit.use_condensed_tables;
    self.use_scrolling_commits = submit.use_scrolling_commits;

    if !submit.use_regex_filter {
      self.filter = None;
      return None;
    }
    match submit.filter_regex.as_deref() {
      None => {
        self.filter = None;
        None
      }
      Some(source) => match JobPattern::compile(source) {
        Ok(pattern) => {
          self.filter = Some(pattern);
          None
        }
        Err(e) => Some(e.to_string()),
      },
    }
  }

  pub fn table_style(&self) -> &'static str {
    if self.use_condensed_tables {
      "table-condensed"
    } else {
      ""
    }
  }

  pub fn view(&self) -> SettingsView {
    SettingsView {
      font_size: self.font_size,
      build_history_size: self.build_history_size,
      use_condensed_tables: self.use_condensed_tables,
      use_scrolling_commits: self.use_scrolling_commits,
      table_style: self.table_style().to_string(),
      filter_regex: self.filter.as_ref().map(|p| p.as_str().to_string()),
    }
  }

  /// Engine configuration for one feed query under these settings.
  pub fn feed_config(&self) -> FeedConfig {
    FeedConfig {
      history_size: self.build_history_size,
      filter: self.filter.clone(),
      change_keying: ChangeKeying::Message,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn submit() -> SettingsSubmit {
    SettingsSubmit {
      font_size: Some(14),
      build_history_size: Some(8),
      use_condensed_tables: true,
      use_scrolling_commits: false,
      use_regex_filter: false,
      filter_regex: None,
    }
  }

  #[test]
  fn apply_sets_display_fields() {
    let mut settings = ViewSettings::default();
    assert!(settings.apply(&submit()).is_none());
    assert_eq!(settings.font_size, 14);
    assert_eq!(settings.build_history_size, 8);
    assert!(settings.use_condensed_tables);
    assert_eq!(settings.table_style(), "table-condensed");
  }

  #[test]
  fn zero_values_fall_back_to_defaults() {
    let mut settings = ViewSettings::default();
    let mut doc = submit();
    doc.font_size = Some(0);
    doc.build_history_size = None;
    settings.apply(&doc);
    assert_eq!(settings.font_size, DEFAULT_FONT_SIZE);
    assert_eq!(settings.build_history_size, DEFAULT_HISTORY_SIZE);
  }

  #[test]
  fn filter_cleared_when_regex_filter_off() {
    let mut settings = ViewSettings::default();
    let mut doc = submit();
    doc.use_regex_filter = true;
    doc.filter_regex = Some("release".into());
    settings.apply(&doc);
    assert!(settings.filter.is_some());

    doc.use_regex_filter = false;
    settings.apply(&doc);
    assert!(settings.filter.is_none());
  }

  #[test]
  fn invalid_regex_keeps_the_previous_pattern() {
    let mut settings = ViewSettings::default();
    let mut doc = submit();
    doc.use_regex_filter = true;
    doc.filter_regex = Some("release".into());
    assert!(settings.apply(&doc).is_none());

    doc.filter_regex = Some("release-(".into());
    let warning = settings.apply(&doc);
    assert!(warning.is_some());
    assert_eq!(
      settings.filter.as_ref().map(|p| p.as_str()),
      Some("release")
    );
  }

  #[test]
  fn view_serializes_with_form_field_names() {
    let view = ViewSettings::default().view();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["fontSize"], 16);
    assert_eq!(json["buildHistorySize"], 16);
    assert_eq!(json["useCondensedTables"], false);
    assert_eq!(json["tableStyle"], "");
    assert!(json.get("filterRegex").is_none());
  }

  #[test]
  fn view_reports_the_effective_filter() {
    let mut settings = ViewSettings::default();
    let mut doc = submit();
    doc.use_regex_filter = true;
    doc.filter_regex = Some("release".into());
    settings.apply(&doc);
    let view = settings.view();
    assert_eq!(view.filter_regex.as_deref(), Some("release"));
    assert_eq!(view.build_history_size, 8);
  }
}
