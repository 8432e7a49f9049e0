//! Directory scanner: discovers media files and upserts `videos` rows.
//!
//! Each file in the videos directory whose extension is allowed becomes one
//! record keyed by its path. The transcript `{title}.md` is loaded from the
//! transcriptions directory when present. Re-scanning is idempotent: an
//! existing record is rewritten only when its transcription changed.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sqlx::PgPool;
use vidlib_core::error::CoreError;
use vidlib_core::media::{has_video_extension, title_from_path, transcript_path};
use vidlib_db::models::video::{CreateVideo, Video};
use vidlib_db::repositories::VideoRepo;

use crate::config::LibraryConfig;
use crate::error::{AppError, AppResult};

/// What a scan did with a single file.
#[derive(Debug)]
pub enum UpsertOutcome {
    Created(Video),
    Updated(Video),
    Unchanged(Video),
}

impl UpsertOutcome {
    pub fn into_video(self) -> Video {
        match self {
            Self::Created(v) | Self::Updated(v) | Self::Unchanged(v) => v,
        }
    }
}

/// Counts reported at the end of a scan.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanSummary {
    pub created: usize,
    pub updated: usize,
    pub unchanged: usize,
}

impl ScanSummary {
    fn record(&mut self, outcome: &UpsertOutcome) {
        match outcome {
            UpsertOutcome::Created(_) => self.created += 1,
            UpsertOutcome::Updated(_) => self.updated += 1,
            UpsertOutcome::Unchanged(_) => self.unchanged += 1,
        }
    }
}

/// Scan the library directories and upsert a record per video file.
///
/// Returns every video seen by the scan (created, updated or unchanged), in
/// file name order.
pub async fn scan_and_load(pool: &PgPool, library: &LibraryConfig) -> AppResult<Vec<Video>> {
    let files = discover_videos(library).await?;
    let mut summary = ScanSummary::default();
    let mut videos = Vec::with_capacity(files.len());

    for path in files {
        // The stored filepath must name the file exactly, so lossy names are skipped.
        let (Some(title), Some(filepath)) = (title_from_path(&path), path.to_str()) else {
            tracing::warn!(path = %path.display(), "Skipping video with a non-UTF-8 file name");
            continue;
        };
        let transcription =
            read_transcript(&transcript_path(&library.transcriptions_dir, &title)).await?;

        let input = CreateVideo {
            title,
            filepath: filepath.to_string(),
            duration_seconds: None,
            transcription,
        };

        let outcome = upsert(pool, &input).await?;
        summary.record(&outcome);
        videos.push(outcome.into_video());
    }

    tracing::info!(
        videos_dir = %library.videos_dir.display(),
        created = summary.created,
        updated = summary.updated,
        unchanged = summary.unchanged,
        "Library scan complete",
    );

    Ok(videos)
}

/// Create the record if its filepath is unseen; otherwise rewrite it only
/// when the transcription differs from the stored one.
pub async fn upsert(pool: &PgPool, input: &CreateVideo) -> AppResult<UpsertOutcome> {
    let Some(existing) = VideoRepo::find_by_filepath(pool, &input.filepath).await? else {
        let video = VideoRepo::create(pool, input).await?;
        tracing::debug!(id = video.id, filepath = %video.filepath, "Video created");
        return Ok(UpsertOutcome::Created(video));
    };

    if existing.transcription == input.transcription {
        tracing::debug!(id = existing.id, filepath = %existing.filepath, "Video unchanged");
        return Ok(UpsertOutcome::Unchanged(existing));
    }

    let video = VideoRepo::update_scanned(pool, existing.id, input)
        .await?
        .ok_or_else(|| {
            CoreError::Internal(format!("Video {} disappeared during scan", existing.id))
        })?;
    tracing::debug!(id = video.id, filepath = %video.filepath, "Video transcription updated");
    Ok(UpsertOutcome::Updated(video))
}

/// List regular files in the videos directory with an allowed extension,
/// sorted by path. Subdirectories are not descended into.
async fn discover_videos(library: &LibraryConfig) -> AppResult<Vec<PathBuf>> {
    let dir = &library.videos_dir;
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "Videos directory not found: {}",
                dir.display()
            )));
        }
        Err(e) => return Err(e.into()),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if !has_video_extension(&path, &library.video_extensions) {
            continue;
        }
        // Follows symlinks, unlike `DirEntry::file_type`. Dangling links are skipped.
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
    }

    files.sort();
    Ok(files)
}

/// Read a transcript as UTF-8. A missing file yields `None`.
async fn read_transcript(path: &Path) -> AppResult<Option<String>> {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read transcript");
            Err(e.into())
        }
    }
}
