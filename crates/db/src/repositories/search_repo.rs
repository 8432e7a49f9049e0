//! Repository for transcript full-text search.
//!
//! Matching, ranking and snippet extraction are done by PostgreSQL against
//! the trigger-maintained `videos.search_vector` column.

use sqlx::PgPool;
use vidlib_core::search::{HeadlineOptions, SEARCH_CONFIG};

use crate::models::search::SearchResult;

/// Provides transcript search over the `videos` table.
pub struct SearchRepo;

impl SearchRepo {
    /// Search transcriptions with `plainto_tsquery`, ranked by `ts_rank_cd`.
    ///
    /// `query` must already be validated as non-blank. A `None` limit returns
    /// every match.
    pub async fn search_transcriptions(
        pool: &PgPool,
        query: &str,
        headline: &HeadlineOptions,
        limit: Option<i64>,
    ) -> Result<Vec<SearchResult>, sqlx::Error> {
        let sql = format!(
            "SELECT id, title, filepath, \
                    ts_headline('{SEARCH_CONFIG}', transcription, \
                        plainto_tsquery('{SEARCH_CONFIG}', $1), $2) AS snippet, \
                    ts_rank_cd(search_vector, plainto_tsquery('{SEARCH_CONFIG}', $1)) AS rank \
             FROM videos \
             WHERE search_vector @@ plainto_tsquery('{SEARCH_CONFIG}', $1) \
             ORDER BY rank DESC, id ASC \
             LIMIT $3"
        );

        let rows = sqlx::query_as::<_, SearchResult>(&sql)
            .bind(query)
            .bind(headline.to_options_string())
            .bind(limit)
            .fetch_all(pool)
            .await?;

        tracing::debug!(query, results = rows.len(), "Transcript search executed");
        Ok(rows)
    }
}
