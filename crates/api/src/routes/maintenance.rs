use axum::routing::delete;
use axum::Router;

use crate::handlers::maintenance;
use crate::state::AppState;

/// `DELETE /clear-database/` -> clear_database
pub fn router() -> Router<AppState> {
    Router::new().route("/clear-database/", delete(maintenance::clear_database))
}
