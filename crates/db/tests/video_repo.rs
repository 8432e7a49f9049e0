//! Integration tests for `VideoRepo` against a real database:
//! - Create and look up by id / filepath
//! - Unique filepath constraint
//! - Scan-driven overwrite (including clearing a transcription)
//! - Listing with limit/offset
//! - Delete-all

use sqlx::PgPool;
use vidlib_db::models::video::CreateVideo;
use vidlib_db::repositories::VideoRepo;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_video(title: &str, transcription: Option<&str>) -> CreateVideo {
    CreateVideo {
        title: title.to_string(),
        filepath: format!("videos/{title}.mp4"),
        duration_seconds: None,
        transcription: transcription.map(str::to_string),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find(pool: PgPool) {
    let created = VideoRepo::create(&pool, &new_video("intro", Some("hello world")))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.title, "intro");
    assert_eq!(created.filepath, "videos/intro.mp4");
    assert_eq!(created.duration_seconds, None);
    assert_eq!(created.transcription.as_deref(), Some("hello world"));

    let by_id = VideoRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(by_id.filepath, created.filepath);

    let by_path = VideoRepo::find_by_filepath(&pool, "videos/intro.mp4")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_path.id, created.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_missing_returns_none(pool: PgPool) {
    assert!(VideoRepo::find_by_id(&pool, 999_999).await.unwrap().is_none());
    assert!(VideoRepo::find_by_filepath(&pool, "videos/none.mp4")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_filepath_violates_unique_constraint(pool: PgPool) {
    VideoRepo::create(&pool, &new_video("dup", None)).await.unwrap();
    let err = VideoRepo::create(&pool, &new_video("dup", Some("other")))
        .await
        .unwrap_err();

    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.code().as_deref(), Some("23505"));
            assert_eq!(db_err.constraint(), Some("uq_videos_filepath"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_scanned_overwrites_transcription(pool: PgPool) {
    let created = VideoRepo::create(&pool, &new_video("talk", Some("first draft")))
        .await
        .unwrap();

    let updated = VideoRepo::update_scanned(&pool, created.id, &new_video("talk", Some("final cut")))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.transcription.as_deref(), Some("final cut"));
    assert!(updated.updated_at >= created.updated_at);

    let cleared = VideoRepo::update_scanned(&pool, created.id, &new_video("talk", None))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cleared.transcription, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_scanned_missing_returns_none(pool: PgPool) {
    let result = VideoRepo::update_scanned(&pool, 999_999, &new_video("ghost", None))
        .await
        .unwrap();
    assert!(result.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_orders_by_id_and_paginates(pool: PgPool) {
    for title in ["a", "b", "c", "d"] {
        VideoRepo::create(&pool, &new_video(title, None)).await.unwrap();
    }

    let all = VideoRepo::list(&pool, 100, 0).await.unwrap();
    let titles: Vec<&str> = all.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c", "d"]);

    let page = VideoRepo::list(&pool, 2, 1).await.unwrap();
    let titles: Vec<&str> = page.iter().map(|v| v.title.as_str()).collect();
    assert_eq!(titles, vec!["b", "c"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn delete_all_removes_every_row(pool: PgPool) {
    VideoRepo::create(&pool, &new_video("x", None)).await.unwrap();
    VideoRepo::create(&pool, &new_video("y", Some("text"))).await.unwrap();

    assert_eq!(VideoRepo::delete_all(&pool).await.unwrap(), 2);
    assert!(VideoRepo::list(&pool, 100, 0).await.unwrap().is_empty());
    assert_eq!(VideoRepo::delete_all(&pool).await.unwrap(), 0);
}
