//! WebSocket connection handling
//!
//! One task per connection: accepts the handshake (pinned to the
//! `/websocket` sub-path), registers an outbound queue with the hub, then
//! pumps frames in both directions until the socket closes.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::handshake::server::{ErrorResponse, Request, Response};
use tokio_tungstenite::tungstenite::http::StatusCode;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::accept_hdr_async;

use crate::server::hub::HubCommand;

/// Sub-path distinguishing the synchronization channel from any other
/// traffic on the same port.
pub const WEBSOCKET_PATH: &str = "/websocket";

fn next_client_id() -> String {
    let id = uuid::Uuid::new_v4().to_string();
    format!("cli_{}", id.split('-').next().unwrap_or("0"))
}

/// Handle a single client connection for its whole lifetime.
pub async fn handle_connection(stream: TcpStream, hub_tx: mpsc::UnboundedSender<HubCommand>) {
    let addr = stream.peer_addr().ok();
    tracing::info!("New connection from {:?}", addr);

    let check_path = |req: &Request, response: Response| {
        if req.uri().path() == WEBSOCKET_PATH {
            Ok(response)
        } else {
            tracing::debug!("Rejecting upgrade for path {}", req.uri().path());
            let mut resp = ErrorResponse::new(Some(format!(
                "Not found. The synchronization channel is at {WEBSOCKET_PATH}.\n"
            )));
            *resp.status_mut() = StatusCode::NOT_FOUND;
            Err(resp)
        }
    };

    let mut ws = match accept_hdr_async(stream, check_path).await {
        Ok(ws) => ws,
        Err(e) => {
            tracing::debug!("WebSocket handshake failed: {e}");
            return;
        }
    };

    let id = next_client_id();
    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<String>();
    if hub_tx
        .send(HubCommand::Register {
            id: id.clone(),
            sender: out_tx,
        })
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            msg = ws.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let _ = hub_tx.send(HubCommand::Frame { id: id.clone(), text });
                    }
                    Some(Ok(Message::Close(_))) => {
                        tracing::info!("Client {id} requested close");
                        break;
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = ws.send(Message::Pong(data)).await;
                    }
                    Some(Err(e)) => {
                        tracing::error!("WebSocket error: {e}");
                        break;
                    }
                    None => break,
                    _ => {}
                }
            }

            outbound = out_rx.recv() => {
                match outbound {
                    Some(json) => {
                        if ws.send(Message::Text(json)).await.is_err() {
                            break;
                        }
                    }
                    None => break,
                }
            }
        }
    }

    let _ = hub_tx.send(HubCommand::Deregister { id });
    tracing::info!("Connection closed from {:?}", addr);
}
