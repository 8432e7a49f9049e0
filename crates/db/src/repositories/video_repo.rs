//! Repository for the `videos` table.

use sqlx::PgPool;
use vidlib_core::types::DbId;

use crate::models::video::{CreateVideo, Video};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, filepath, duration_seconds, transcription, created_at, updated_at";

/// Provides CRUD operations for videos.
pub struct VideoRepo;

impl VideoRepo {
    /// Insert a new video, returning the created row.
    ///
    /// A duplicate `filepath` fails with the `uq_videos_filepath` constraint.
    pub async fn create(pool: &PgPool, input: &CreateVideo) -> Result<Video, sqlx::Error> {
        let query = format!(
            "INSERT INTO videos (title, filepath, duration_seconds, transcription)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(&input.title)
            .bind(&input.filepath)
            .bind(input.duration_seconds)
            .bind(&input.transcription)
            .fetch_one(pool)
            .await
    }

    /// Find a video by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE id = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a video by its (unique) file path.
    pub async fn find_by_filepath(
        pool: &PgPool,
        filepath: &str,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos WHERE filepath = $1");
        sqlx::query_as::<_, Video>(&query)
            .bind(filepath)
            .fetch_optional(pool)
            .await
    }

    /// List videos ordered by ID. `limit` and `offset` are expected to be
    /// clamped by the caller.
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> Result<Vec<Video>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM videos ORDER BY id LIMIT $1 OFFSET $2");
        sqlx::query_as::<_, Video>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Overwrite the fields a directory scan produces.
    ///
    /// `transcription` is written as given, so `None` clears it.
    /// `duration_seconds` is left untouched. Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update_scanned(
        pool: &PgPool,
        id: DbId,
        input: &CreateVideo,
    ) -> Result<Option<Video>, sqlx::Error> {
        let query = format!(
            "UPDATE videos SET
                title = $2,
                filepath = $3,
                transcription = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Video>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.filepath)
            .bind(&input.transcription)
            .fetch_optional(pool)
            .await
    }

    /// Delete every video. Returns the number of rows removed.
    pub async fn delete_all(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM videos").execute(pool).await?;
        let deleted = result.rows_affected();
        tracing::info!(deleted, "Deleted all videos");
        Ok(deleted)
    }
}
