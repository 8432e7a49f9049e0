//! HTTP `Range` header handling for video streaming.
//!
//! Only the single-range `bytes=START-END` form is served; `END` may be
//! omitted to mean "through the last byte". Suffix ranges (`bytes=-N`) and
//! multi-range requests are rejected.

/// Read buffer size used when streaming a file body (64 KiB).
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// A range as written by the client, before it is checked against a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestedRange {
    pub start: u64,
    pub end: Option<u64>,
}

/// A validated, inclusive byte range within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    #[error("Malformed Range header: {0}")]
    Malformed(String),

    #[error("Range not satisfiable for a file of {file_size} bytes")]
    Unsatisfiable { file_size: u64 },
}

/// Parse a `Range` header value.
///
/// # Examples
///
/// ```
/// use vidlib_core::range::{parse_range_header, RequestedRange};
///
/// assert_eq!(
///     parse_range_header("bytes=0-99"),
///     Ok(RequestedRange { start: 0, end: Some(99) })
/// );
/// assert_eq!(
///     parse_range_header("bytes=500-"),
///     Ok(RequestedRange { start: 500, end: None })
/// );
/// assert!(parse_range_header("bytes=-500").is_err());
/// ```
pub fn parse_range_header(value: &str) -> Result<RequestedRange, RangeError> {
    let range_set = value
        .trim()
        .strip_prefix("bytes=")
        .ok_or_else(|| RangeError::Malformed("expected the `bytes` unit".into()))?;

    if range_set.contains(',') {
        return Err(RangeError::Malformed(
            "multiple ranges are not supported".into(),
        ));
    }

    let (start, end) = range_set
        .split_once('-')
        .ok_or_else(|| RangeError::Malformed(format!("missing '-' in '{range_set}'")))?;

    let start = start.trim();
    if start.is_empty() {
        return Err(RangeError::Malformed(
            "suffix ranges are not supported".into(),
        ));
    }
    let start = start
        .parse::<u64>()
        .map_err(|_| RangeError::Malformed(format!("invalid start '{start}'")))?;

    let end = match end.trim() {
        "" => None,
        e => Some(
            e.parse::<u64>()
                .map_err(|_| RangeError::Malformed(format!("invalid end '{e}'")))?,
        ),
    };

    Ok(RequestedRange { start, end })
}

impl RequestedRange {
    /// Check the range against the actual file size.
    ///
    /// A missing end resolves to the last byte of the file. The range must
    /// satisfy `start <= end < file_size`; nothing is satisfiable in an
    /// empty file.
    pub fn resolve(self, file_size: u64) -> Result<ByteRange, RangeError> {
        let unsatisfiable = RangeError::Unsatisfiable { file_size };
        if file_size == 0 {
            return Err(unsatisfiable);
        }

        let end = self.end.unwrap_or(file_size - 1);
        if self.start > end || self.start >= file_size || end >= file_size {
            return Err(unsatisfiable);
        }

        Ok(ByteRange {
            start: self.start,
            end,
        })
    }
}

impl ByteRange {
    /// Number of bytes covered (the range is inclusive on both ends), as
    /// sent in `Content-Length`.
    pub fn content_length(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Content-Range` value for a 206 response.
    pub fn content_range(&self, file_size: u64) -> String {
        format!("bytes {}-{}/{file_size}", self.start, self.end)
    }
}

/// `Content-Range` value for a 416 response.
pub fn unsatisfied_content_range(file_size: u64) -> String {
    format!("bytes */{file_size}")
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    // -- parse_range_header --------------------------------------------------

    #[test]
    fn parses_closed_range() {
        assert_eq!(
            parse_range_header("bytes=0-99"),
            Ok(RequestedRange {
                start: 0,
                end: Some(99)
            })
        );
    }

    #[test]
    fn parses_open_ended_range() {
        assert_eq!(
            parse_range_header("bytes=1024-"),
            Ok(RequestedRange {
                start: 1024,
                end: None
            })
        );
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(
            parse_range_header(" bytes= 10 - 20 "),
            Ok(RequestedRange {
                start: 10,
                end: Some(20)
            })
        );
    }

    #[test]
    fn rejects_other_units() {
        assert_matches!(parse_range_header("items=0-1"), Err(RangeError::Malformed(_)));
    }

    #[test]
    fn rejects_suffix_range() {
        assert_matches!(parse_range_header("bytes=-500"), Err(RangeError::Malformed(_)));
    }

    #[test]
    fn rejects_multiple_ranges() {
        assert_matches!(
            parse_range_header("bytes=0-1,5-6"),
            Err(RangeError::Malformed(_))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_matches!(parse_range_header("bytes=abc-def"), Err(RangeError::Malformed(_)));
        assert_matches!(parse_range_header("bytes=10"), Err(RangeError::Malformed(_)));
        assert_matches!(parse_range_header("bytes=0-1x"), Err(RangeError::Malformed(_)));
        assert_matches!(parse_range_header(""), Err(RangeError::Malformed(_)));
    }

    // -- resolve -------------------------------------------------------------

    #[test]
    fn resolves_first_hundred_bytes() {
        let range = parse_range_header("bytes=0-99").unwrap().resolve(1000).unwrap();
        assert_eq!(range, ByteRange { start: 0, end: 99 });
        assert_eq!(range.content_length(), 100);
        assert_eq!(range.content_range(1000), "bytes 0-99/1000");
    }

    #[test]
    fn open_end_resolves_to_last_byte() {
        let range = parse_range_header("bytes=900-").unwrap().resolve(1000).unwrap();
        assert_eq!(range, ByteRange { start: 900, end: 999 });
        assert_eq!(range.content_length(), 100);
    }

    #[test]
    fn single_last_byte() {
        let range = parse_range_header("bytes=999-999").unwrap().resolve(1000).unwrap();
        assert_eq!(range.content_length(), 1);
    }

    #[test]
    fn start_after_end_is_unsatisfiable() {
        assert_eq!(
            parse_range_header("bytes=100-50").unwrap().resolve(1000),
            Err(RangeError::Unsatisfiable { file_size: 1000 })
        );
    }

    #[test]
    fn start_at_or_past_size_is_unsatisfiable() {
        assert_matches!(
            parse_range_header("bytes=1000-").unwrap().resolve(1000),
            Err(RangeError::Unsatisfiable { file_size: 1000 })
        );
        assert_matches!(
            parse_range_header("bytes=1000-1001").unwrap().resolve(1000),
            Err(RangeError::Unsatisfiable { .. })
        );
    }

    #[test]
    fn end_past_size_is_unsatisfiable() {
        assert_matches!(
            parse_range_header("bytes=0-1000").unwrap().resolve(1000),
            Err(RangeError::Unsatisfiable { .. })
        );
    }

    #[test]
    fn empty_file_is_never_satisfiable() {
        assert_matches!(
            parse_range_header("bytes=0-").unwrap().resolve(0),
            Err(RangeError::Unsatisfiable { file_size: 0 })
        );
    }

    #[test]
    fn unsatisfied_header_value() {
        assert_eq!(unsatisfied_content_range(1000), "bytes */1000");
    }
}
