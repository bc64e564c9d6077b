//! WebRTC signaling relay module.
//!
//! Relays JSON offer/answer and ICE candidate messages between a browser
//! and an externally-supplied peer-connection engine.
//!
//! # Routes
//!
//! - `GET /ws` - WebSocket signaling channel (mounted only when a
//!   [`PeerFactory`] is configured)

pub mod messages;
pub mod peer;
mod ws;

pub use messages::{IceCandidate, SignalMessage};
pub use peer::{ConnectionState, PeerConnection, PeerFactory};
pub use ws::ws_handler;

use axum::{routing::get, Router};

use crate::server::AppContext;

/// Create the signaling router.
pub fn signaling_router() -> Router<AppContext> {
    Router::new().route("/ws", get(ws_handler))
}
