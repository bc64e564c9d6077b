//! Boundary traits for the external WebRTC engine.
//!
//! The signaling relay never touches SDP or ICE internals; it drives
//! whatever engine the embedder supplies through [`PeerConnection`]. Tests
//! substitute a mock, production embeds a real WebRTC library.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::Error;
use crate::signaling::messages::IceCandidate;

/// Peer connection state, mirroring the usual RTCPeerConnection states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    New,
    Connecting,
    Connected,
    Disconnected,
    Failed,
    Closed,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConnectionState::New => "new",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Failed => "failed",
            ConnectionState::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// One negotiated media session with a remote browser.
///
/// Methods map one-to-one onto the session-description API every WebRTC
/// engine exposes.
#[async_trait]
pub trait PeerConnection: Send + Sync {
    /// Apply the remote offer SDP.
    async fn set_remote_description(&self, sdp: &str) -> Result<(), Error>;

    /// Produce the answer SDP for the applied offer.
    async fn create_answer(&self) -> Result<String, Error>;

    /// Commit the answer as the local description.
    async fn set_local_description(&self, sdp: &str) -> Result<(), Error>;

    /// Feed one trickled remote ICE candidate into the engine.
    async fn add_ice_candidate(&self, candidate: IceCandidate) -> Result<(), Error>;

    /// Subscribe to connection-state transitions.
    fn connection_state(&self) -> watch::Receiver<ConnectionState>;

    /// Tear the session down. Idempotent.
    async fn close(&self);
}

/// Creates one [`PeerConnection`] per WebSocket session, with the media
/// source (camera device, local file) already attached.
pub trait PeerFactory: Send + Sync {
    fn create_peer(&self) -> Result<Arc<dyn PeerConnection>, Error>;
}
