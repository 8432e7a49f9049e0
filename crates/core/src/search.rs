//! Transcript search constants and helpers.
//!
//! Tokenization, matching and ranking all happen inside PostgreSQL
//! (`plainto_tsquery`, `ts_rank_cd`, `ts_headline`). This module only
//! validates input and renders the `ts_headline` options string.

use crate::error::CoreError;

/// Text search configuration shared by the query and the
/// `update_video_search_vector` trigger. Both must agree.
pub const SEARCH_CONFIG: &str = "russian";

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Maximum number of search results when a limit is requested.
pub const MAX_SEARCH_LIMIT: i64 = 200;

/// Default page size for video listings.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Maximum page size for video listings.
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Clamp a user-provided limit to valid bounds.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Clamp an optional limit, keeping `None` as "no limit".
pub fn clamp_optional_limit(limit: Option<i64>, max: i64) -> Option<i64> {
    limit.map(|l| l.clamp(1, max))
}

// ---------------------------------------------------------------------------
// Query validation
// ---------------------------------------------------------------------------

/// Reject missing or blank search queries.
///
/// Returns the trimmed query text.
pub fn require_query(query: Option<&str>) -> Result<&str, CoreError> {
    match query.map(str::trim) {
        Some(q) if !q.is_empty() => Ok(q),
        _ => Err(CoreError::Validation(
            "Search query cannot be empty".to_string(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Snippet (ts_headline) options
// ---------------------------------------------------------------------------

/// Options passed to `ts_headline` when building result snippets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlineOptions {
    pub start_sel: String,
    pub stop_sel: String,
    pub max_fragments: u32,
    pub fragment_delimiter: String,
    pub max_words: u32,
    pub min_words: u32,
}

impl Default for HeadlineOptions {
    fn default() -> Self {
        Self {
            start_sel: "<b>".to_string(),
            stop_sel: "</b>".to_string(),
            max_fragments: 1,
            fragment_delimiter: "...".to_string(),
            max_words: 30,
            min_words: 15,
        }
    }
}

impl HeadlineOptions {
    /// Check the options against what `ts_headline` accepts.
    pub fn validate(&self) -> Result<(), CoreError> {
        for (name, value) in [
            ("StartSel", &self.start_sel),
            ("StopSel", &self.stop_sel),
            ("FragmentDelimiter", &self.fragment_delimiter),
        ] {
            if value.is_empty() {
                return Err(CoreError::Validation(format!("{name} must not be empty")));
            }
            if value.contains('"') {
                return Err(CoreError::Validation(format!(
                    "{name} must not contain '\"'"
                )));
            }
        }
        if self.min_words == 0 {
            return Err(CoreError::Validation("MinWords must be positive".into()));
        }
        if self.min_words >= self.max_words {
            return Err(CoreError::Validation(
                "MinWords must be less than MaxWords".into(),
            ));
        }
        Ok(())
    }

    /// Render the options string for `ts_headline`'s fourth argument.
    ///
    /// Delimiter values are double-quoted so commas and spaces survive.
    ///
    /// # Examples
    ///
    /// ```
    /// use vidlib_core::search::HeadlineOptions;
    ///
    /// assert_eq!(
    ///     HeadlineOptions::default().to_options_string(),
    ///     "StartSel=\"<b>\", StopSel=\"</b>\", MaxFragments=1, \
    ///      FragmentDelimiter=\"...\", MaxWords=30, MinWords=15"
    /// );
    /// ```
    pub fn to_options_string(&self) -> String {
        format!(
            "StartSel=\"{}\", StopSel=\"{}\", MaxFragments={}, FragmentDelimiter=\"{}\", \
             MaxWords={}, MinWords={}",
            self.start_sel,
            self.stop_sel,
            self.max_fragments,
            self.fragment_delimiter,
            self.max_words,
            self.min_words,
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
