use super::*;
use crate::session::ActionRequest;
use crate::session::EventLogEntry;
use crate::session::Snapshot;
use crate::session::UserAction;
use serde_json::Map;
use serde_json::Value;

/// Message types the game server is known to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    StateSnapshot,
    HandStart,
    StreetDealt,
    ActionRequest,
    ActionTaken,
    ShowdownReveal,
    PotAward,
    HandResult,
    GameEnd,
    Started,
    Ack,
    Pong,
    Error,
}

impl Kind {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::StateSnapshot => "STATE_SNAPSHOT",
            Self::HandStart => "HAND_START",
            Self::StreetDealt => "STREET_DEALT",
            Self::ActionRequest => "ACTION_REQUEST",
            Self::ActionTaken => "ACTION_TAKEN",
            Self::ShowdownReveal => "SHOWDOWN_REVEAL",
            Self::PotAward => "POT_AWARD",
            Self::HandResult => "HAND_RESULT",
            Self::GameEnd => "GAME_END",
            Self::Started => "STARTED",
            Self::Ack => "ACK",
            Self::Pong => "PONG",
            Self::Error => "ERROR",
        }
    }
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "STATE_SNAPSHOT" => Some(Self::StateSnapshot),
            "HAND_START" => Some(Self::HandStart),
            "STREET_DEALT" => Some(Self::StreetDealt),
            "ACTION_REQUEST" => Some(Self::ActionRequest),
            "ACTION_TAKEN" => Some(Self::ActionTaken),
            "SHOWDOWN_REVEAL" => Some(Self::ShowdownReveal),
            "POT_AWARD" => Some(Self::PotAward),
            "HAND_RESULT" => Some(Self::HandResult),
            "GAME_END" => Some(Self::GameEnd),
            "STARTED" => Some(Self::Started),
            "ACK" => Some(Self::Ack),
            "PONG" => Some(Self::Pong),
            "ERROR" => Some(Self::Error),
            _ => None,
        }
    }
}

/// Raw inbound frame: `{type, ts, seq, payload}`.
/// Missing or null payloads read as an empty object.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub kind: String,
    pub ts: Option<f64>,
    pub seq: Option<u64>,
    pub payload: Value,
}

impl From<Map<String, Value>> for Envelope {
    fn from(mut map: Map<String, Value>) -> Self {
        Self {
            kind: map
                .get("type")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            ts: map.get("ts").and_then(Value::as_f64),
            seq: map.get("seq").and_then(Value::as_u64),
            payload: match map.remove("payload") {
                None | Some(Value::Null) => Value::Object(Map::new()),
                Some(payload) => payload,
            },
        }
    }
}

impl From<&Envelope> for EventLogEntry {
    fn from(envelope: &Envelope) -> Self {
        Self {
            ts: envelope.ts,
            seq: envelope.seq,
            kind: envelope.kind.clone(),
            payload: envelope.payload.clone(),
        }
    }
}

/// Inbound messages, typed by what they do to session state.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerMessage {
    Snapshot(Snapshot),
    ActionRequest(ActionRequest),
    Error(Option<String>),
    Started,
    GameEnd,
    /// Known, informational only; goes to the audit log.
    Notice(Kind),
    /// Not a type this client knows; still goes to the audit log.
    Unrecognized(String),
}

/// Outbound messages.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    RequestSnapshot,
    UserAction(UserAction),
    Ping,
}

impl ClientMessage {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::RequestSnapshot => "REQUEST_SNAPSHOT",
            Self::UserAction(_) => "USER_ACTION",
            Self::Ping => "PING",
        }
    }
}

/// Translates between raw text frames and typed messages.
pub struct Protocol;

impl Protocol {
    /// Parses a text frame into its envelope.
    /// Valid JSON that is not an object yields `None`.
    pub fn envelope(text: &str) -> Result<Option<Envelope>, SessionError> {
        match serde_json::from_str::<Value>(text).map_err(SessionError::decode)? {
            Value::Object(map) => Ok(Some(Envelope::from(map))),
            _ => Ok(None),
        }
    }
    /// Types an envelope's payload according to its tag.
    pub fn decode(envelope: &Envelope) -> Result<ServerMessage, SessionError> {
        let payload = || envelope.payload.clone();
        match Kind::parse(&envelope.kind) {
            Some(Kind::StateSnapshot) => serde_json::from_value(payload())
                .map(ServerMessage::Snapshot)
                .map_err(SessionError::decode),
            Some(Kind::ActionRequest) => serde_json::from_value(payload())
                .map(ServerMessage::ActionRequest)
                .map_err(SessionError::decode),
            Some(Kind::Error) => Ok(ServerMessage::Error(
                envelope
                    .payload
                    .get("error")
                    .and_then(Value::as_str)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            )),
            Some(Kind::Started) => Ok(ServerMessage::Started),
            Some(Kind::GameEnd) => Ok(ServerMessage::GameEnd),
            Some(kind) => Ok(ServerMessage::Notice(kind)),
            None => Ok(ServerMessage::Unrecognized(envelope.kind.clone())),
        }
    }
    pub fn encode(message: &ClientMessage) -> String {
        let payload = match message {
            ClientMessage::UserAction(action) => serde_json::json!(action),
            ClientMessage::RequestSnapshot | ClientMessage::Ping => serde_json::json!({}),
        };
        serde_json::json!({ "type": message.tag(), "payload": payload }).to_string()
    }
}
