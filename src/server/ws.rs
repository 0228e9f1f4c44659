//! WebSocket handler for real-time item updates.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use std::sync::Arc;

use crate::server::state::AppState;

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handles an individual WebSocket connection.
///
/// Registers the connection with the broadcaster (which queues the
/// connect-time snapshot as the first event), then pumps the delivery
/// queue to the socket until either side goes away.
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();

    let mut subscription = state.broadcaster.connect(&state.store.snapshot());
    let id = subscription.id;

    // Forward queued update events to the socket. The queue closes
    // when the subscriber is dropped or the registry is drained.
    let send_task = tokio::spawn(async move {
        while let Some(msg) = subscription.rx.recv().await {
            if sender.send(Message::Text(msg)).await.is_err() {
                break;
            }
        }
    });

    // Watch for the client closing the connection. Inbound text and
    // binary frames are ignored; pings are answered by axum.
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    // Either task finishing means the connection is done.
    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }

    state.broadcaster.disconnect(id);
    tracing::debug!(subscriber = %id, "WebSocket connection closed");
}
