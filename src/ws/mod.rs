//! WebSocket session loop
//!
//! One task per accepted connection runs the read loop; a second task drains
//! the connection's outbound queue into the socket sink, which serializes all
//! sends to that peer. The session registers itself on accept and removes
//! itself on any disconnect path.

pub mod handlers;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures::{sink::SinkExt, stream::StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use ulid::Ulid;

use crate::registry::ConnectionHandle;
use crate::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Run one client session from accept to disconnect.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_tx, mut ws_rx) = socket.split();

    let id = Ulid::new().to_string();
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<String>();

    if let Err(e) = state
        .registry
        .add(ConnectionHandle::new(id.clone(), outbound_tx))
        .await
    {
        // Ids are fresh ULIDs, so this should not happen; reject this session
        // without touching anyone else's.
        tracing::error!(connection = %id, "registration failed: {e}");
        return;
    }
    let clients = state.registry.len().await;
    tracing::info!(connection = %id, clients, "client connected");

    // Writer task: sole owner of the sink, drains the outbound queue in order
    let mut writer = tokio::spawn(async move {
        while let Some(text) = outbound_rx.recv().await {
            if ws_tx.send(Message::Text(text.into())).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = handlers::handle_inbound(&state, &id, &text).await {
                            state.hub.send_to(&id, reply).await;
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::debug!(connection = %id, "websocket read error: {e}");
                        break;
                    }
                }
            }
            // Writer exiting means the peer stopped accepting frames
            _ = &mut writer => break,
        }
    }

    // Idempotent with hub-side pruning after a failed send
    state.registry.remove(&id).await;
    writer.abort();
    let clients = state.registry.len().await;
    tracing::info!(connection = %id, clients, "client disconnected");
}
