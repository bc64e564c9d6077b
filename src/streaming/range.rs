//! Byte-range parsing for HTTP `Range` headers.
//!
//! Parsing is pure and validated before any file I/O happens, so malformed
//! or out-of-bounds ranges never reach the read path.

use crate::error::Error;

/// An inclusive `[start, end]` span of byte offsets within the asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: u64,
    pub end: u64,
}

impl ByteRange {
    /// Number of bytes covered by the span. Never zero: the bounds are
    /// inclusive and `start <= end` holds by construction.
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }
}

/// Parse an HTTP `Range` header value against an asset of `file_size` bytes.
///
/// Supports the single-range form `bytes=<start>-<end>?`. When the end
/// offset is omitted the span defaults to `chunk_size` bytes, implementing
/// chunked progressive delivery instead of returning the remainder of a
/// potentially huge file. The end offset is always clamped to the last byte
/// of the asset.
///
/// Every failure maps to 416 Range Not Satisfiable:
/// - missing `bytes=` prefix, or anything but exactly one `-` separator
/// - missing or non-integer start offset (suffix ranges are not supported)
/// - non-integer end offset
/// - start beyond the last byte of the asset
/// - start greater than end after clamping
pub fn parse_range(header: &str, file_size: u64, chunk_size: u64) -> Result<ByteRange, Error> {
    let range_str = header
        .strip_prefix("bytes=")
        .ok_or_else(|| Error::range(format!("unsupported range unit in {header:?}"), file_size))?;

    let (start, end) = range_str
        .split_once('-')
        .ok_or_else(|| Error::range(format!("missing '-' in range {header:?}"), file_size))?;

    let start = start.trim();
    let end = end.trim();

    let start: u64 = start
        .parse()
        .map_err(|_| Error::range(format!("invalid start offset {start:?}"), file_size))?;

    if start >= file_size {
        return Err(Error::range(
            format!("start {start} is beyond the last byte ({file_size} total)"),
            file_size,
        ));
    }

    let end: u64 = if end.is_empty() {
        // Open-ended request: serve one chunk, not the whole remainder.
        start.saturating_add(chunk_size.saturating_sub(1))
    } else {
        end.parse()
            .map_err(|_| Error::range(format!("invalid end offset {end:?}"), file_size))?
    };

    let end = end.min(file_size - 1);

    if start > end {
        return Err(Error::range(
            format!("start {start} is greater than end {end}"),
            file_size,
        ));
    }

    Ok(ByteRange { start, end })
}
