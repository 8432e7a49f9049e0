//! Handlers for destructive maintenance operations.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use vidlib_db::repositories::VideoRepo;

use crate::error::AppResult;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ClearDatabaseResponse {
    pub message: &'static str,
    /// Number of video records removed.
    pub deleted: u64,
}

/// DELETE /clear-database/
///
/// Remove every video record. Files on disk are not touched.
pub async fn clear_database(State(state): State<AppState>) -> AppResult<Json<ClearDatabaseResponse>> {
    let deleted = VideoRepo::delete_all(&state.pool).await?;
    Ok(Json(ClearDatabaseResponse {
        message: "Database cleared successfully",
        deleted,
    }))
}
