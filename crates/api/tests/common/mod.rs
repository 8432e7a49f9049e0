#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;

use vidlib_api::config::{LibraryConfig, LogFormat, ServerConfig};
use vidlib_api::router::build_app_router;
use vidlib_api::state::AppState;
use vidlib_core::search::HeadlineOptions;

// ---------------------------------------------------------------------------
// Library fixture
// ---------------------------------------------------------------------------

/// A throwaway `videos/` + `transcriptions/` pair under a temp directory.
pub struct TestLibrary {
    _root: TempDir,
    pub videos_dir: PathBuf,
    pub transcriptions_dir: PathBuf,
}

impl TestLibrary {
    pub fn new() -> Self {
        let root = tempfile::tempdir().unwrap();
        let videos_dir = root.path().join("videos");
        let transcriptions_dir = root.path().join("transcriptions");
        std::fs::create_dir(&videos_dir).unwrap();
        std::fs::create_dir(&transcriptions_dir).unwrap();
        Self {
            _root: root,
            videos_dir,
            transcriptions_dir,
        }
    }

    /// Write a media file and return its path.
    pub fn add_video(&self, file_name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.videos_dir.join(file_name);
        std::fs::write(&path, bytes).unwrap();
        path
    }

    /// Write (or overwrite) the transcript for `title`.
    pub fn set_transcript(&self, title: &str, text: &str) {
        std::fs::write(self.transcriptions_dir.join(format!("{title}.md")), text).unwrap();
    }

    pub fn config(&self) -> LibraryConfig {
        LibraryConfig {
            videos_dir: self.videos_dir.clone(),
            transcriptions_dir: self.transcriptions_dir.clone(),
            video_extensions: vec!["mp4".to_string(), "mkv".to_string()],
        }
    }
}

/// `n` bytes of a repeating, position-dependent pattern.
pub fn patterned_bytes(n: usize) -> Vec<u8> {
    (0..n).map(|i| (i % 251) as u8).collect()
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults around the given library.
pub fn test_config(library: LibraryConfig) -> ServerConfig {
    ServerConfig {
        host: [127, 0, 0, 1].into(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        log_format: LogFormat::Pretty,
        library,
        search: HeadlineOptions::default(),
    }
}

/// Build the full application router with all middleware layers, exactly
/// as the binary does.
pub fn build_test_app(pool: PgPool, library: LibraryConfig) -> Router {
    let config = test_config(library);
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, range: Option<&str>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(range) = range {
        builder = builder.header(header::RANGE, range);
    }
    app.oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn get_with_range(app: Router, uri: &str, range: &str) -> Response {
    send(app, Method::GET, uri, Some(range)).await
}

pub async fn post(app: Router, uri: &str) -> Response {
    send(app, Method::POST, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn header_str<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|v| v.to_str().ok())
}
