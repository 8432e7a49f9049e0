//! Handlers for transcript search.

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;
use vidlib_core::search::{clamp_optional_limit, require_query, MAX_SEARCH_LIMIT};
use vidlib_db::models::search::SearchResult;
use vidlib_db::repositories::SearchRepo;

use crate::error::AppResult;
use crate::state::AppState;

/// Query parameters for `GET /search/`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    pub limit: Option<i64>,
}

/// GET /search/?query=&limit=
///
/// Full-text search over transcriptions, ranked by relevance with a
/// highlighted snippet per hit. A missing or blank query is a 400.
pub async fn search_videos(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<SearchResult>>> {
    let query = require_query(params.query.as_deref())?;
    let limit = clamp_optional_limit(params.limit, MAX_SEARCH_LIMIT);

    let results =
        SearchRepo::search_transcriptions(&state.pool, query, &state.config.search, limit).await?;

    Ok(Json(results))
}
