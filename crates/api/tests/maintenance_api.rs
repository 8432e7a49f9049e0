//! Integration tests for `DELETE /clear-database/`.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post, TestLibrary};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn clear_database_removes_all_records(pool: PgPool) {
    let library = TestLibrary::new();
    library.add_video("a.mp4", b"a");
    library.add_video("b.mp4", b"b");
    let app = build_test_app(pool.clone(), library.config());
    post(app, "/videos/scan-and-load/").await;

    let app = build_test_app(pool.clone(), library.config());
    let response = delete(app, "/clear-database/").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Database cleared successfully");
    assert_eq!(json["deleted"], 2);

    let app = build_test_app(pool, library.config());
    let listed = body_json(get(app, "/videos/").await).await;
    assert_eq!(listed, serde_json::json!([]));

    // Files on disk are left alone.
    assert!(library.videos_dir.join("a.mp4").exists());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn clear_empty_database_reports_zero(pool: PgPool) {
    let library = TestLibrary::new();
    let app = build_test_app(pool, library.config());
    let json = body_json(delete(app, "/clear-database/").await).await;

    assert_eq!(json["deleted"], 0);
}
