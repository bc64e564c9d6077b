//! Video streaming module.
//!
//! Serves the configured media asset over HTTP with range-request support.
//!
//! # Routes
//!
//! - `GET /video` - the configured asset, full (200) or partial (206)

pub mod range;
mod video;

pub use range::{parse_range, ByteRange};
pub use video::stream_video;

use axum::{routing::get, Router};

use crate::server::AppContext;

/// Create the video streaming router.
pub fn video_router() -> Router<AppContext> {
    Router::new().route("/video", get(stream_video))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_router_creation() {
        let _router: Router<AppContext> = video_router();
    }
}
