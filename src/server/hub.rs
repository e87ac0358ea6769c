//! The synchronization hub: session state, client registry, message routing
//!
//! A single task owns a [`SyncHub`] and drains [`HubCommand`]s from an mpsc
//! channel, so exactly one inbound message is processed to completion at a
//! time and session state needs no locking. Ordering is guaranteed within a
//! connection (each connection task forwards its frames in receive order),
//! not across connections.

use std::collections::HashMap;
use std::path::PathBuf;

use tokio::sync::mpsc;

use crate::server::protocol::{ClientMessage, ServerMessage, SessionState};

pub type ClientId = String;

/// Commands fed to the hub task by connection tasks.
#[derive(Debug)]
pub enum HubCommand {
    Register {
        id: ClientId,
        sender: mpsc::UnboundedSender<String>,
    },
    Deregister {
        id: ClientId,
    },
    /// A raw inbound text frame from one client.
    Frame {
        id: ClientId,
        text: String,
    },
}

/// Owns the session state and the set of connected clients.
///
/// An explicit instance rather than process-global state, so tests can run
/// multiple independent hubs.
pub struct SyncHub {
    state: SessionState,
    clients: HashMap<ClientId, mpsc::UnboundedSender<String>>,
}

impl SyncHub {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            state: SessionState::new(project_root),
            clients: HashMap::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn client_count(&self) -> usize {
        self.clients.len()
    }

    pub fn register(&mut self, id: ClientId, sender: mpsc::UnboundedSender<String>) {
        tracing::info!("Client {id} connected ({} total)", self.clients.len() + 1);
        self.clients.insert(id, sender);
    }

    /// Drop the connection handle only; session state is retained so a
    /// reconnecting viewer still sees the last synced state.
    pub fn deregister(&mut self, id: &str) {
        if self.clients.remove(id).is_some() {
            tracing::info!("Client {id} disconnected ({} total)", self.clients.len());
        }
    }

    /// Route one inbound text frame. A malformed frame is logged and
    /// discarded; the connection stays registered.
    pub fn handle_frame(&mut self, id: &str, text: &str) {
        let msg: ClientMessage = match serde_json::from_str(text) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::warn!("Discarding malformed message from {id}: {e}");
                return;
            }
        };

        match msg {
            ClientMessage::Ping => {
                // Silence until an app has synced means "no session yet".
                if self.state.has_synced {
                    self.send_to(id, &ServerMessage::SyncState(self.state.clone()));
                }
            }
            ClientMessage::UpdateState(update) => {
                // Field-preserving merge: project_root survives every sync.
                self.state.path = update.path;
                self.state.mockups = update.mockups;
                self.state.has_synced = true;
                self.broadcast_except(id, &ServerMessage::SyncState(self.state.clone()));
            }
            ClientMessage::Navigate(path) => {
                // Accepted even before the first sync; the inventory stays
                // empty in that case.
                self.state.path = path.clone();
                self.broadcast_except(id, &ServerMessage::Navigate(path));
            }
        }
    }

    /// Reply to a single client. A send failure means the client is gone;
    /// its connection task will deregister it.
    fn send_to(&self, id: &str, msg: &ServerMessage) {
        let Some(json) = encode(msg) else { return };
        if let Some(sender) = self.clients.get(id) {
            if sender.send(json).is_err() {
                tracing::debug!("Client {id} unreachable, dropping reply");
            }
        }
    }

    /// Fan a message out to every client except the sender. Failures are
    /// isolated per recipient.
    fn broadcast_except(&self, sender_id: &str, msg: &ServerMessage) {
        let Some(json) = encode(msg) else { return };
        for (id, sender) in &self.clients {
            if id == sender_id {
                continue;
            }
            if sender.send(json.clone()).is_err() {
                tracing::debug!("Client {id} unreachable, dropping broadcast");
            }
        }
    }
}

fn encode(msg: &ServerMessage) -> Option<String> {
    match serde_json::to_string(msg) {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to encode server message: {e}");
            None
        }
    }
}

/// Hub task entry point: process commands one at a time until every
/// connection-side sender is gone.
pub async fn run_hub(mut hub: SyncHub, mut rx: mpsc::UnboundedReceiver<HubCommand>) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            HubCommand::Register { id, sender } => hub.register(id, sender),
            HubCommand::Deregister { id } => hub.deregister(&id),
            HubCommand::Frame { id, text } => hub.handle_frame(&id, &text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tokio::sync::mpsc::error::TryRecvError;

    fn hub() -> SyncHub {
        SyncHub::new(PathBuf::from("/proj"))
    }

    fn register(hub: &mut SyncHub, id: &str) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel();
        hub.register(id.to_string(), tx);
        rx
    }

    fn recv_json(rx: &mut mpsc::UnboundedReceiver<String>) -> Value {
        serde_json::from_str(&rx.try_recv().expect("expected a message")).unwrap()
    }

    fn assert_silent(rx: &mut mpsc::UnboundedReceiver<String>) {
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    const UPDATE: &str =
        r#"{"type":"UPDATE_STATE","payload":{"path":"foo","mockups":[{"title":"Button","path":"a/b"}]}}"#;

    #[test]
    fn test_ping_before_sync_yields_no_reply() {
        let mut hub = hub();
        let mut rx = register(&mut hub, "a");
        hub.handle_frame("a", r#"{"type":"PING"}"#);
        assert_silent(&mut rx);
    }

    #[test]
    fn test_update_state_merges_and_broadcasts_to_others() {
        let mut hub = hub();
        let mut rx_a = register(&mut hub, "a");
        let mut rx_b = register(&mut hub, "b");

        hub.handle_frame("a", UPDATE);

        // b receives SYNC_STATE with project_root preserved
        let msg = recv_json(&mut rx_b);
        assert_eq!(msg["type"], "SYNC_STATE");
        assert_eq!(msg["payload"]["projectRoot"], "/proj");
        assert_eq!(msg["payload"]["hasSynced"], true);
        assert_eq!(msg["payload"]["path"], "foo");
        assert_eq!(msg["payload"]["mockups"][0]["title"], "Button");

        // no self-echo
        assert_silent(&mut rx_a);
    }

    #[test]
    fn test_ping_after_sync_replies_to_requester_only() {
        let mut hub = hub();
        let mut rx_a = register(&mut hub, "a");
        let mut rx_b = register(&mut hub, "b");
        hub.handle_frame("a", UPDATE);
        let _ = rx_b.try_recv(); // drain the sync broadcast

        hub.handle_frame("b", r#"{"type":"PING"}"#);
        let msg = recv_json(&mut rx_b);
        assert_eq!(msg["type"], "SYNC_STATE");
        assert_eq!(msg["payload"]["path"], "foo");
        assert_silent(&mut rx_a);
    }

    #[test]
    fn test_navigate_updates_path_but_not_mockups() {
        let mut hub = hub();
        let mut rx_a = register(&mut hub, "a");
        let mut rx_b = register(&mut hub, "b");
        hub.handle_frame("a", UPDATE);
        let _ = rx_b.try_recv();

        hub.handle_frame("a", r#"{"type":"NAVIGATE","payload":"a/c"}"#);

        // b gets a NAVIGATE, not a SYNC_STATE
        let msg = recv_json(&mut rx_b);
        assert_eq!(msg["type"], "NAVIGATE");
        assert_eq!(msg["payload"], "a/c");
        assert_silent(&mut rx_a);

        // path moved, inventory untouched
        assert_eq!(hub.state().path.as_deref(), Some("a/c"));
        assert_eq!(hub.state().mockups.len(), 1);
    }

    #[test]
    fn test_navigate_before_sync_sets_path_only() {
        let mut hub = hub();
        let mut rx_a = register(&mut hub, "a");
        hub.handle_frame("a", r#"{"type":"NAVIGATE","payload":"a/b"}"#);

        assert_eq!(hub.state().path.as_deref(), Some("a/b"));
        assert!(!hub.state().has_synced);
        assert!(hub.state().mockups.is_empty());

        // PING still yields silence while has_synced is false
        hub.handle_frame("a", r#"{"type":"PING"}"#);
        assert_silent(&mut rx_a);
    }

    #[test]
    fn test_disconnect_retains_session_state() {
        let mut hub = hub();
        let _rx_a = register(&mut hub, "a");
        hub.handle_frame("a", UPDATE);
        hub.deregister("a");

        let mut rx_c = register(&mut hub, "c");
        hub.handle_frame("c", r#"{"type":"PING"}"#);
        let msg = recv_json(&mut rx_c);
        assert_eq!(msg["type"], "SYNC_STATE");
        assert_eq!(msg["payload"]["path"], "foo");
    }

    #[test]
    fn test_malformed_frames_are_discarded() {
        let mut hub = hub();
        let mut rx_a = register(&mut hub, "a");

        hub.handle_frame("a", "not json");
        hub.handle_frame("a", r#"{"payload":1}"#);
        hub.handle_frame("a", r#"{"type":"BOGUS","payload":{}}"#);

        assert!(!hub.state().has_synced);
        assert_silent(&mut rx_a);

        // The connection still works afterwards
        hub.handle_frame("a", UPDATE);
        assert!(hub.state().has_synced);
    }

    #[test]
    fn test_broadcast_survives_dead_recipient() {
        let mut hub = hub();
        let _rx_a = register(&mut hub, "a");
        let rx_dead = register(&mut hub, "dead");
        drop(rx_dead);
        let mut rx_c = register(&mut hub, "c");

        hub.handle_frame("a", UPDATE);

        // c still receives despite the dead client
        let msg = recv_json(&mut rx_c);
        assert_eq!(msg["type"], "SYNC_STATE");
    }

    #[test]
    fn test_update_state_with_null_path() {
        let mut hub = hub();
        let _rx = register(&mut hub, "a");
        hub.handle_frame(
            "a",
            r#"{"type":"UPDATE_STATE","payload":{"path":null,"mockups":[]}}"#,
        );
        assert!(hub.state().has_synced);
        assert_eq!(hub.state().path, None);
    }
}
