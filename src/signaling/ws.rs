//! WebSocket signaling relay.
//!
//! Each `/ws` connection gets its own peer connection from the configured
//! [`PeerFactory`]. The session loop decodes JSON signaling messages from
//! the client, drives the peer through offer/answer negotiation, and relays
//! the answer back as a text frame.

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::stream::SplitSink;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::error::Error;
use crate::server::AppContext;
use crate::signaling::messages::SignalMessage;
use crate::signaling::peer::{ConnectionState, PeerConnection};

/// Upgrade handler for `GET /ws`.
pub async fn ws_handler(
    State(ctx): State<AppContext>,
    ws: WebSocketUpgrade,
) -> Result<Response, Error> {
    // The route is only mounted when a factory is configured; the guard
    // covers direct calls from embedding code.
    let factory = ctx
        .peers
        .clone()
        .ok_or_else(|| Error::Internal("no peer factory configured".to_string()))?;

    let peer = factory.create_peer()?;

    // Signaling frames are small; the axum default of 64MB is excessive.
    Ok(ws
        .max_message_size(64 * 1024)
        .on_upgrade(move |socket| run_session(socket, peer)))
}

/// Run one signaling session until the client disconnects or the peer fails.
async fn run_session(socket: WebSocket, peer: Arc<dyn PeerConnection>) {
    tracing::info!("WebSocket connection established");

    let (mut sender, mut receiver) = socket.split();

    // Close the peer if the engine reports failure while we are still
    // relaying messages.
    let mut state_rx = peer.connection_state();
    let state_peer = peer.clone();
    let watcher = tokio::spawn(async move {
        while state_rx.changed().await.is_ok() {
            let state = *state_rx.borrow();
            tracing::info!("Connection state is {state}");
            if state == ConnectionState::Failed {
                state_peer.close().await;
                break;
            }
        }
    });

    while let Some(message) = receiver.next().await {
        match message {
            Ok(Message::Text(text)) => {
                if let Err(e) = handle_signal(&text, peer.as_ref(), &mut sender).await {
                    tracing::error!("Signaling session error: {e}");
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Ok(_) => {
                // Binary, ping and pong frames carry no signaling payload.
            }
            Err(e) => {
                tracing::warn!("WebSocket receive error: {e}");
                break;
            }
        }
    }

    watcher.abort();
    peer.close().await;
    tracing::info!("WebSocket disconnected");
}

/// Dispatch one decoded signaling message to the peer.
///
/// Malformed JSON and failing ICE candidates are logged and skipped so a
/// single bad frame does not tear the session down; errors from the
/// offer/answer exchange are fatal to the session.
async fn handle_signal(
    text: &str,
    peer: &dyn PeerConnection,
    sender: &mut SplitSink<WebSocket, Message>,
) -> Result<(), Error> {
    let message: SignalMessage = match serde_json::from_str(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!("Ignoring malformed signaling message: {e}");
            return Ok(());
        }
    };

    match message {
        SignalMessage::Offer { sdp } => {
            peer.set_remote_description(&sdp).await?;
            let answer = peer.create_answer().await?;
            peer.set_local_description(&answer).await?;

            let reply = serde_json::to_string(&SignalMessage::Answer { sdp: answer })
                .map_err(|e| Error::Internal(e.to_string()))?;
            sender
                .send(Message::Text(reply))
                .await
                .map_err(|e| Error::Signaling(format!("failed to send answer: {e}")))?;
        }
        SignalMessage::Candidate {
            candidate: Some(candidate),
        } => {
            if let Err(e) = peer.add_ice_candidate(candidate).await {
                tracing::error!("Error adding ICE candidate: {e}");
            }
        }
        SignalMessage::Candidate { candidate: None } => {
            tracing::debug!("End of remote candidates");
        }
        SignalMessage::Answer { .. } => {
            tracing::warn!("Ignoring unexpected answer from client");
        }
    }

    Ok(())
}
