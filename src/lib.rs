//! Vidrelay - range-aware video file server with WebRTC signaling relay
//!
//! This library crate exposes the core functionality for integration testing.

pub mod config;
pub mod error;
pub mod server;
pub mod signaling;
pub mod streaming;

pub use error::Error;
