//! Video entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use vidlib_core::types::{DbId, Timestamp};

/// A row from the `videos` table.
///
/// `search_vector` is owned by a database trigger and is never selected.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Video {
    pub id: DbId,
    pub title: String,
    pub filepath: String,
    pub duration_seconds: Option<i32>,
    pub transcription: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a video, and for overwriting the scanned fields of an
/// existing one.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateVideo {
    pub title: String,
    pub filepath: String,
    pub duration_seconds: Option<i32>,
    pub transcription: Option<String>,
}
