//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Pagination parameters (`?skip=&limit=`).
///
/// Values are clamped in the handler via `clamp_limit` / `clamp_offset`.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}
