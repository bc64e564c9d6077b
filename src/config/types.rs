use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default span served when a range request omits an explicit end offset.
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub media: MediaConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory of static assets (demo player page); served as a fallback.
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaConfig {
    /// Path of the single video asset served at /video. Existence is checked
    /// per request, not only at startup.
    #[serde(default = "default_video_path")]
    pub video_path: PathBuf,

    /// MIME type advertised for the asset.
    #[serde(default = "default_content_type")]
    pub content_type: String,

    /// Default range span in bytes when the client omits the end offset.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_video_path() -> PathBuf {
    PathBuf::from("video/video.mp4")
}

fn default_content_type() -> String {
    "video/mp4".to_string()
}

fn default_chunk_size() -> u64 {
    DEFAULT_CHUNK_SIZE
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            video_path: default_video_path(),
            content_type: default_content_type(),
            chunk_size: default_chunk_size(),
        }
    }
}
