use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when both the database and the videos directory are usable.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the configured videos directory exists, so a scan can run.
    pub videos_dir_available: bool,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = vidlib_db::health_check(&state.pool).await.is_ok();
    let videos_dir_available = tokio::fs::metadata(&state.config.library.videos_dir)
        .await
        .is_ok_and(|meta| meta.is_dir());

    let status = if db_healthy && videos_dir_available {
        "ok"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        videos_dir_available,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
