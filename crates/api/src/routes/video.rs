//! Route definitions for the video library.
//!
//! Paths keep their trailing slashes exactly as published.
//!
//! ```text
//! POST /videos/scan-and-load/     scan_and_load
//! GET  /videos/                   list
//! GET  /videos/{id}               get_by_id
//! GET  /videos/{id}/stream        stream_video
//! ```

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::video;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/videos/scan-and-load/", post(video::scan_and_load))
        .route("/videos/", get(video::list))
        .route("/videos/{id}", get(video::get_by_id))
        .route("/videos/{id}/stream", get(video::stream_video))
}
