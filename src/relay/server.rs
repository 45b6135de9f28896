//! Websocket relay server.
//!
//! One `GET /ws` upgrade endpoint. Each connection gets a writer task
//! draining an unbounded channel into the socket and a reader loop that
//! dispatches [`ClientMessage`]s against the [`RoomRegistry`]. Forwarding
//! is best-effort and unthrottled; a slow recipient is never backpressured.

use super::rooms::{ConnId, RoomRegistry};
use crate::protocol::{ClientMessage, ServerMessage};
use axum::Router;
use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use axum::routing::get;
use futures::{SinkExt, StreamExt};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

static NEXT_CONN_ID: AtomicU64 = AtomicU64::new(1);

/// Builds the relay router around a registry.
///
/// Split from [`run_relay`] so tests can serve it on an ephemeral port.
pub fn router(registry: RoomRegistry) -> Router {
    Router::new()
        .route("/ws", get(ws_handler))
        .with_state(registry)
}

/// Runs the relay until the process is stopped.
#[instrument]
pub async fn run_relay(host: &str, port: u16) -> anyhow::Result<()> {
    let registry = RoomRegistry::new();
    let app = router(registry);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    info!(host, port, "Relay listening on ws://{host}:{port}/ws");
    axum::serve(listener, app).await?;

    Ok(())
}

async fn ws_handler(ws: WebSocketUpgrade, State(registry): State<RoomRegistry>) -> Response {
    ws.on_upgrade(move |socket| handle_connection(socket, registry))
}

/// Drives one relay connection to completion.
#[instrument(skip(socket, registry), fields(conn))]
async fn handle_connection(socket: WebSocket, registry: RoomRegistry) {
    let conn: ConnId = NEXT_CONN_ID.fetch_add(1, Ordering::Relaxed);
    tracing::Span::current().record("conn", conn);
    info!(conn, "Relay connection opened");

    let (mut ws_tx, mut ws_rx) = socket.split();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Writer: serialize queued deliveries onto the socket.
    let writer = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(error) => {
                    warn!(conn, %error, "Failed to encode delivery");
                    continue;
                }
            };
            if ws_tx.send(Message::Text(json.into())).await.is_err() {
                debug!(conn, "Socket closed while writing, stopping writer");
                break;
            }
        }
    });

    // Reader: dispatch inbound messages until the socket closes.
    while let Some(Ok(msg)) = ws_rx.next().await {
        let text = match msg {
            Message::Text(text) => text,
            Message::Close(_) => break,
            // Pings are answered by axum; other frames carry no protocol.
            _ => continue,
        };

        match serde_json::from_str::<ClientMessage>(text.as_str()) {
            Ok(ClientMessage::JoinRoom { room }) => {
                registry.join(&room, conn, tx.clone());
            }
            Ok(ClientMessage::LeaveRoom { room }) => {
                registry.leave(&room, conn);
            }
            Ok(ClientMessage::SendMove { room, position, by }) => {
                registry.forward(&room, conn, position, by);
            }
            Err(error) => {
                warn!(conn, %error, "Ignoring unparseable message");
            }
        }
    }

    // Socket gone: drop phantom memberships and stop the writer.
    registry.leave_all(conn);
    writer.abort();
    info!(conn, "Relay connection closed");
}
