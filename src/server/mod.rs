//! Mockup synchronization server
//!
//! A single-process broadcast hub that relays the currently selected mockup
//! and the mockup inventory between a running app instance and any number
//! of viewer/tool clients.
//!
//! # Protocol
//!
//! All messages are newline-free JSON text frames over a WebSocket at
//! `ws://host:port/websocket`:
//!
//! ```json
//! // Client -> Server
//! {"type": "PING"}
//! {"type": "UPDATE_STATE", "payload": {"path": "...", "mockups": [...]}}
//! {"type": "NAVIGATE", "payload": "..."}
//!
//! // Server -> Client
//! {"type": "SYNC_STATE", "payload": {"projectRoot": "...", "hasSynced": true, ...}}
//! {"type": "NAVIGATE", "payload": "..."}
//! ```
//!
//! Connections are symmetric; there is no handshake or role assignment.
//! An app client pushes `UPDATE_STATE`, viewers observe with `PING` and
//! command with `NAVIGATE`, but the server infers nothing beyond the
//! messages it sees.

pub mod connection;
pub mod hub;
pub mod protocol;

pub use connection::{handle_connection, WEBSOCKET_PATH};
pub use hub::{run_hub, HubCommand, SyncHub};
pub use protocol::{ClientMessage, Mockup, ServerMessage, SessionState, StateUpdate};

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::error::{MockupsError, Result};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 1337;

/// A bound but not-yet-running synchronization server.
///
/// Binding is split from serving so callers (and tests) can bind port 0
/// and learn the actual address before any client connects.
pub struct SyncServer {
    listener: TcpListener,
    local_addr: SocketAddr,
}

impl SyncServer {
    pub async fn bind(host: &str, port: u16) -> Result<Self> {
        let addr = format!("{host}:{port}");
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|e| MockupsError::Bind { addr, source: e })?;
        let local_addr = listener.local_addr()?;
        Ok(Self {
            listener,
            local_addr,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Accept connections until the process is stopped.
    ///
    /// Session state lives for the lifetime of this call; it survives any
    /// number of client disconnects and is lost only with the process.
    pub async fn run(self) -> Result<()> {
        let project_root = std::env::current_dir()?;
        let (hub_tx, hub_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_hub(SyncHub::new(project_root), hub_rx));

        tracing::info!(
            "Mockup server running at ws://{}{}",
            self.local_addr,
            WEBSOCKET_PATH
        );

        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    let hub_tx = hub_tx.clone();
                    tokio::spawn(async move {
                        handle_connection(stream, hub_tx).await;
                    });
                }
                Err(e) => {
                    tracing::error!("Failed to accept connection: {e}");
                }
            }
        }
    }
}
