//! Unified error type for the vidrelay application.
//!
//! All failures funnel into [`Error`], which carries enough context for the
//! HTTP layer to derive a status code via [`Error::http_status`]. The
//! `IntoResponse` impl resolves every error at the request boundary; nothing
//! escapes as a panic.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;

/// Unified error type covering all failure modes in vidrelay.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The configured media asset is absent from storage.
    #[error("Video not found at {}", path.display())]
    NotFound {
        /// The path that was looked up.
        path: PathBuf,
    },

    /// A `Range` header failed to parse or resolved outside the asset.
    #[error("Range not satisfiable: {reason}")]
    RangeNotSatisfiable {
        /// Human-readable description of what was wrong with the range.
        reason: String,
        /// Total size of the asset, reported back in `Content-Range`.
        file_size: u64,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The WebRTC engine rejected a signaling operation.
    #[error("Signaling error: {0}")]
    Signaling(String),

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> StatusCode {
        match self {
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::RangeNotSatisfiable { .. } => StatusCode::RANGE_NOT_SATISFIABLE,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Io { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Signaling(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Convenience constructor for [`Error::RangeNotSatisfiable`].
    pub fn range(reason: impl Into<String>, file_size: u64) -> Self {
        Error::RangeNotSatisfiable {
            reason: reason.into(),
            file_size,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.http_status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Server error in handler");
        }

        // Media clients expect a plain-text body; the 416 additionally
        // carries the unsatisfied-range form of Content-Range.
        let message = self.to_string();
        match self {
            Error::RangeNotSatisfiable { file_size, .. } => (
                status,
                [(header::CONTENT_RANGE, format!("bytes */{file_size}"))],
                message,
            )
                .into_response(),
            _ => (status, message).into_response(),
        }
    }
}
