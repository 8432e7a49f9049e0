//! Transcript search result rows.

use serde::Serialize;
use sqlx::FromRow;
use vidlib_core::types::DbId;

/// One ranked match. Not a table row; produced by the search query.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SearchResult {
    pub id: DbId,
    pub title: String,
    pub filepath: String,
    /// `ts_headline` excerpt with the configured highlight delimiters.
    pub snippet: Option<String>,
    /// `ts_rank_cd` score; results are ordered by it, highest first.
    pub rank: f32,
}
