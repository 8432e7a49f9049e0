pub mod health;
pub mod maintenance;
pub mod search;
pub mod video;

use axum::Router;

use crate::state::AppState;

/// Build the video library route tree (served at the root).
///
/// Route hierarchy:
///
/// ```text
/// POST   /videos/scan-and-load/       scan directories, upsert records
/// GET    /videos/                     list (?skip=&limit=)
/// GET    /videos/{id}                 get one
/// GET    /videos/{id}/stream          stream bytes (Range aware)
///
/// GET    /search/                     transcript search (?query=&limit=)
///
/// DELETE /clear-database/             delete every video record
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(video::router())
        .merge(search::router())
        .merge(maintenance::router())
}
