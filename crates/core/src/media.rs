//! Media file conventions used by the directory scanner and the streamer.
//!
//! A video `videos/<stem>.<ext>` pairs with the transcript
//! `transcriptions/<stem>.md`, and its display title is `<stem>`.

use std::path::{Path, PathBuf};

/// Extensions picked up by a scan when `VIDEO_EXTENSIONS` is not set.
pub const DEFAULT_VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv"];

/// Extension of the transcript file that sits next to each video.
pub const TRANSCRIPT_EXTENSION: &str = "md";

/// Fallback content type for anything that is not a known video container.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Parse a comma-separated extension list such as `"mp4, .MKV,webm"`.
///
/// Entries are trimmed, lowercased and stripped of a leading dot. Empty
/// entries and duplicates are dropped.
pub fn parse_extension_list(raw: &str) -> Vec<String> {
    let mut extensions: Vec<String> = Vec::new();
    for ext in raw
        .split(',')
        .map(|s| s.trim().trim_start_matches('.').to_lowercase())
        .filter(|s| !s.is_empty())
    {
        if !extensions.contains(&ext) {
            extensions.push(ext);
        }
    }
    extensions
}

/// Returns `true` if the path's extension is one of `allowed` (case-insensitive).
///
/// `allowed` is expected in the normalized form produced by
/// [`parse_extension_list`].
pub fn has_video_extension(path: &Path, allowed: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .is_some_and(|e| allowed.iter().any(|a| *a == e))
}

/// Derive the display title from a video path: the file name without its
/// final extension.
///
/// Returns `None` for an empty stem or one that is not valid UTF-8.
pub fn title_from_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Location of the transcript for a video titled `title`.
pub fn transcript_path(transcriptions_dir: &Path, title: &str) -> PathBuf {
    transcriptions_dir.join(format!("{title}.{TRANSCRIPT_EXTENSION}"))
}

/// Guess a video Content-Type from a file extension.
///
/// Non-video extensions fall back to [`FALLBACK_CONTENT_TYPE`].
pub fn content_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    match ext.as_str() {
        "mp4" | "m4v" => "video/mp4",
        "mkv" => "video/x-matroska",
        "webm" => "video/webm",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "mpeg" | "mpg" => "video/mpeg",
        "ogv" => "video/ogg",
        "ts" => "video/mp2t",
        "wmv" => "video/x-ms-wmv",
        "flv" => "video/x-flv",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
