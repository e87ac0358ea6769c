//! Synchronization wire protocol
//!
//! All frames are JSON text with a `type` discriminator and a `payload`.
//! Field names stay camelCase on the wire for compatibility with existing
//! app and viewer clients.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One mockup entry in the synced inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mockup {
    pub title: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Mockup>>,
}

/// The server's in-memory record of the last-synced app state.
///
/// `project_root` is set once at server start and survives every
/// `UPDATE_STATE`; the other fields are replaceable by inbound messages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub project_root: PathBuf,
    pub has_synced: bool,
    pub path: Option<String>,
    pub mockups: Vec<Mockup>,
}

impl SessionState {
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            has_synced: false,
            path: None,
            mockups: Vec::new(),
        }
    }
}

/// Payload of `UPDATE_STATE`: the replaceable part of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub mockups: Vec<Mockup>,
}

/// Client-to-server message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Ask for the current session state, if any.
    #[serde(rename = "PING")]
    Ping,
    /// Replace the session's path and inventory (app client).
    #[serde(rename = "UPDATE_STATE")]
    UpdateState(StateUpdate),
    /// Select a mockup by path.
    #[serde(rename = "NAVIGATE")]
    Navigate(Option<String>),
}

/// Server-to-client message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    #[serde(rename = "SYNC_STATE")]
    SyncState(SessionState),
    #[serde(rename = "NAVIGATE")]
    Navigate(Option<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ping_parses_without_payload() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"PING"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Ping));
    }

    #[test]
    fn test_update_state_parses() {
        let json = r#"{"type":"UPDATE_STATE","payload":{"path":"foo","mockups":[{"title":"Button","path":"a/b"}]}}"#;
        let msg: ClientMessage = serde_json::from_str(json).unwrap();
        match msg {
            ClientMessage::UpdateState(update) => {
                assert_eq!(update.path.as_deref(), Some("foo"));
                assert_eq!(update.mockups.len(), 1);
                assert_eq!(update.mockups[0].title, "Button");
            }
            _ => panic!("Expected UpdateState message"),
        }
    }

    #[test]
    fn test_navigate_parses_string_and_null() {
        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"NAVIGATE","payload":"a/c"}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Navigate(Some(ref p)) if p == "a/c"));

        let msg: ClientMessage =
            serde_json::from_str(r#"{"type":"NAVIGATE","payload":null}"#).unwrap();
        assert!(matches!(msg, ClientMessage::Navigate(None)));
    }

    #[test]
    fn test_malformed_messages_rejected() {
        assert!(serde_json::from_str::<ClientMessage>("not json").is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"payload":1}"#).is_err());
        assert!(serde_json::from_str::<ClientMessage>(r#"{"type":"UNKNOWN"}"#).is_err());
    }

    #[test]
    fn test_sync_state_wire_shape() {
        let state = SessionState {
            project_root: PathBuf::from("/proj"),
            has_synced: true,
            path: Some("foo".to_string()),
            mockups: vec![],
        };
        let json = serde_json::to_value(ServerMessage::SyncState(state)).unwrap();
        assert_eq!(json["type"], "SYNC_STATE");
        assert_eq!(json["payload"]["projectRoot"], "/proj");
        assert_eq!(json["payload"]["hasSynced"], true);
        assert_eq!(json["payload"]["path"], "foo");
    }
}
