//! Handlers for the `/videos` resource.
//!
//! Provides library scanning, listing, lookup, and video streaming with
//! HTTP range request support.

use std::io::{ErrorKind, SeekFrom};
use std::path::Path as FsPath;

use axum::body::Body;
use axum::extract::{Path, Query, State};
use axum::http::header::{self, HeaderMap, HeaderValue};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;
use vidlib_core::error::CoreError;
use vidlib_core::media::content_type_for_path;
use vidlib_core::range::{parse_range_header, ByteRange, RangeError, STREAM_CHUNK_SIZE};
use vidlib_core::search::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use vidlib_core::types::DbId;
use vidlib_db::models::video::Video;
use vidlib_db::repositories::VideoRepo;

use crate::error::{AppError, AppResult};
use crate::query::PaginationParams;
use crate::scanner;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn find_video(pool: &sqlx::PgPool, id: DbId) -> AppResult<Video> {
    VideoRepo::find_by_id(pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Video", id }))
}

/// Size of the file at `path`, or 404 if it is missing or not a regular file.
async fn video_file_size(path: &FsPath) -> AppResult<u64> {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => Ok(meta.len()),
        Ok(_) => Err(AppError::NotFound("Video file not found on server".into())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            Err(AppError::NotFound("Video file not found on server".into()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Resolve the optional `Range` header against the file size.
///
/// Any header that cannot be served (bad syntax, unsupported form, out of
/// bounds) is a 416.
fn requested_range(headers: &HeaderMap, file_size: u64) -> AppResult<Option<ByteRange>> {
    let Some(value) = headers.get(header::RANGE) else {
        return Ok(None);
    };

    let range = value
        .to_str()
        .map_err(|_| RangeError::Malformed("non-ASCII header".into()))
        .and_then(parse_range_header)
        .and_then(|r| r.resolve(file_size))
        .map_err(|e| {
            tracing::debug!(error = %e, file_size, "Rejected Range header");
            AppError::RangeNotSatisfiable { file_size }
        })?;

    Ok(Some(range))
}

fn header_value(value: String) -> AppResult<HeaderValue> {
    HeaderValue::from_str(&value).map_err(|e| AppError::InternalError(e.to_string()))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /videos/scan-and-load/
///
/// Scan the videos and transcriptions directories and upsert their metadata.
/// Existing records are updated when their transcription changed.
pub async fn scan_and_load(State(state): State<AppState>) -> AppResult<Json<Vec<Video>>> {
    let videos = scanner::scan_and_load(&state.pool, &state.config.library).await?;
    Ok(Json(videos))
}

/// GET /videos/?skip=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<Vec<Video>>> {
    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.skip);
    let videos = VideoRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(videos))
}

/// GET /videos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Video>> {
    let video = find_video(&state.pool, id).await?;
    Ok(Json(video))
}

/// GET /videos/{id}/stream
///
/// Streams the video file. Without a `Range` header the whole file is sent
/// with 200; `Range: bytes=START-END` yields 206 with exactly that slice,
/// read in 64 KiB chunks.
pub async fn stream_video(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let video = find_video(&state.pool, id).await?;
    let path = FsPath::new(&video.filepath);

    let file_size = video_file_size(path).await?;
    let range = requested_range(&headers, file_size)?;

    let mut response_headers = HeaderMap::new();
    response_headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_for_path(path)),
    );
    response_headers.insert(header::ACCEPT_RANGES, HeaderValue::from_static("bytes"));

    let mut file = tokio::fs::File::open(path).await?;

    match range {
        Some(range) => {
            file.seek(SeekFrom::Start(range.start)).await?;
            let length = range.content_length();
            let stream = ReaderStream::with_capacity(file.take(length), STREAM_CHUNK_SIZE);

            response_headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
            response_headers.insert(
                header::CONTENT_RANGE,
                header_value(range.content_range(file_size))?,
            );

            tracing::debug!(id, start = range.start, end = range.end, file_size, "Streaming range");
            Ok((
                StatusCode::PARTIAL_CONTENT,
                response_headers,
                Body::from_stream(stream),
            )
                .into_response())
        }
        None => {
            let stream = ReaderStream::with_capacity(file, STREAM_CHUNK_SIZE);
            response_headers.insert(header::CONTENT_LENGTH, HeaderValue::from(file_size));

            tracing::debug!(id, file_size, "Streaming full file");
            Ok((StatusCode::OK, response_headers, Body::from_stream(stream)).into_response())
        }
    }
}
