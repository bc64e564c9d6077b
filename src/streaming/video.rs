//! Range-aware video streaming handler.
//!
//! Serves the configured video asset with support for HTTP range requests,
//! so a browser `<video>` element can seek and buffer progressively.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Response,
};
use std::io::SeekFrom;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio_util::io::ReaderStream;

use crate::error::Error;
use crate::server::AppContext;
use crate::streaming::range::parse_range;

/// A missing asset is a 404 naming the path; any other I/O failure is a 500.
fn classify_io(e: std::io::Error, path: &std::path::Path) -> Error {
    if e.kind() == std::io::ErrorKind::NotFound {
        Error::NotFound {
            path: path.to_path_buf(),
        }
    } else {
        Error::from(e)
    }
}

/// Serve the configured video asset, honoring an optional `Range` header.
///
/// The asset's size is queried fresh on every request; a file that appears
/// or disappears while the server runs is reflected immediately. Both the
/// full-file and partial responses stream the bytes instead of buffering
/// the whole span in memory.
pub async fn stream_video(
    State(ctx): State<AppContext>,
    headers: HeaderMap,
) -> Result<Response, Error> {
    let path = &ctx.config.media.video_path;

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| classify_io(e, path))?;
    let file_size = metadata.len();

    let range_header = match headers.get(header::RANGE) {
        Some(value) => Some(
            value
                .to_str()
                .map_err(|_| Error::Validation("Range header is not valid UTF-8".into()))?,
        ),
        None => None,
    };

    let content_type = ctx.config.media.content_type.clone();

    match range_header.filter(|value| !value.is_empty()) {
        Some(value) => {
            let range = parse_range(value, file_size, ctx.config.media.chunk_size)?;
            let length = range.len();

            let mut file = File::open(path).await.map_err(|e| classify_io(e, path))?;
            file.seek(SeekFrom::Start(range.start)).await?;

            tracing::debug!(
                start = range.start,
                end = range.end,
                file_size,
                "Serving partial content"
            );

            let stream = ReaderStream::new(file.take(length));
            let body = Body::from_stream(stream);

            Response::builder()
                .status(StatusCode::PARTIAL_CONTENT)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, length.to_string())
                .header(
                    header::CONTENT_RANGE,
                    format!("bytes {}-{}/{}", range.start, range.end, file_size),
                )
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
                .map_err(|e| Error::Internal(e.to_string()))
        }
        None => {
            // First request from a media player is often unconditional; answer
            // with the whole asset and advertise range support so the client
            // switches to ranged requests for seeks.
            let file = File::open(path).await.map_err(|e| classify_io(e, path))?;

            let stream = ReaderStream::new(file);
            let body = Body::from_stream(stream);

            Response::builder()
                .status(StatusCode::OK)
                .header(header::CONTENT_TYPE, content_type)
                .header(header::CONTENT_LENGTH, file_size.to_string())
                .header(header::ACCEPT_RANGES, "bytes")
                .body(body)
                .map_err(|e| Error::Internal(e.to_string()))
        }
    }
}
