//! Websocket client for the room relay.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::sync::{MoveTransport, SyncError};
use futures::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, instrument, warn};

/// An endpoint's connection to the relay.
///
/// Owns the outbound half; relay deliveries arrive on the receiver handed
/// back by [`connect`](RelayClient::connect). Dropping the client (and the
/// receiver) tears both socket tasks down.
#[derive(Debug)]
pub struct RelayClient {
    outbound: mpsc::UnboundedSender<ClientMessage>,
}

impl RelayClient {
    /// Connects to the relay and spawns the socket reader/writer tasks.
    ///
    /// Returns the client plus the stream of relay deliveries.
    #[instrument]
    pub async fn connect(
        url: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<ServerMessage>), SyncError> {
        let (socket, _response) = connect_async(url).await.map_err(|e| SyncError::Connect {
            message: e.to_string(),
        })?;
        info!(url, "Connected to relay");

        let (mut ws_tx, mut ws_rx) = socket.split();
        let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ClientMessage>();
        let (in_tx, in_rx) = mpsc::unbounded_channel::<ServerMessage>();

        // Writer: drain queued protocol messages onto the socket.
        tokio::spawn(async move {
            while let Some(msg) = out_rx.recv().await {
                let json = match serde_json::to_string(&msg) {
                    Ok(json) => json,
                    Err(error) => {
                        warn!(%error, "Failed to encode outbound message");
                        continue;
                    }
                };
                if ws_tx.send(Message::Text(json.into())).await.is_err() {
                    debug!("Relay socket closed, stopping writer");
                    break;
                }
            }
        });

        // Reader: surface relay deliveries until the socket closes.
        tokio::spawn(async move {
            while let Some(Ok(msg)) = ws_rx.next().await {
                let text = match msg {
                    Message::Text(text) => text,
                    Message::Close(_) => break,
                    _ => continue,
                };
                match serde_json::from_str::<ServerMessage>(text.as_str()) {
                    Ok(delivery) => {
                        if in_tx.send(delivery).is_err() {
                            break;
                        }
                    }
                    Err(error) => warn!(%error, "Ignoring unparseable delivery"),
                }
            }
            debug!("Relay delivery stream ended");
        });

        Ok((Self { outbound: out_tx }, in_rx))
    }
}

impl MoveTransport for RelayClient {
    fn send(&mut self, msg: ClientMessage) -> Result<(), SyncError> {
        self.outbound
            .send(msg)
            .map_err(|_| SyncError::TransportClosed)
    }
}
