use super::*;
use crate::HandNumber;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

/// Numeric event tag written by the game logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum EventKind {
    HandStart,
    CommunityCards,
    PlayerAction,
    Showdown,
    PotAward,
    HandResult,
    #[default]
    Unknown,
    Other(i64),
}

impl From<i64> for EventKind {
    fn from(tag: i64) -> Self {
        match tag {
            0 => Self::Unknown,
            1 => Self::HandStart,
            2 => Self::CommunityCards,
            3 => Self::PlayerAction,
            4 => Self::Showdown,
            5 => Self::PotAward,
            6 => Self::HandResult,
            n => Self::Other(n),
        }
    }
}

impl From<EventKind> for i64 {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Unknown => 0,
            EventKind::HandStart => 1,
            EventKind::CommunityCards => 2,
            EventKind::PlayerAction => 3,
            EventKind::Showdown => 4,
            EventKind::PotAward => 5,
            EventKind::HandResult => 6,
            EventKind::Other(n) => n,
        }
    }
}

/// One entry of the raw event stream.
/// Only hand number, tag, and timestamp are common to every kind;
/// the remaining fields stay in `payload` as written.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GameEvent {
    #[serde(default)]
    pub hand_number: HandNumber,
    #[serde(rename = "type", default)]
    pub kind: EventKind,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<Stamp>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl GameEvent {
    pub fn is_hand_result(&self) -> bool {
        self.kind == EventKind::HandResult
    }
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.payload.get(key)
    }
    pub fn text(&self, key: &str) -> Option<&str> {
        self.field(key).and_then(Value::as_str)
    }
}

impl std::fmt::Display for GameEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let hand = self.hand_number;
        match self.kind {
            EventKind::HandStart => write!(f, "Hand #{} starts", hand),
            EventKind::CommunityCards => write!(
                f,
                "Hand #{} {}: {}",
                hand,
                self.text("stage").unwrap_or_default(),
                cards(self.field("community_cards"))
            ),
            EventKind::PlayerAction => write!(
                f,
                "Hand #{} {} {} {}",
                hand,
                self.text("player_name").unwrap_or_default(),
                self.text("action").unwrap_or_default(),
                self.field("amount").and_then(Value::as_i64).unwrap_or_default()
            ),
            EventKind::Showdown => write!(f, "Hand #{} showdown", hand),
            EventKind::PotAward => write!(f, "Hand #{} pot awarded", hand),
            EventKind::HandResult => write!(f, "Hand #{} settled", hand),
            EventKind::Unknown | EventKind::Other(_) => {
                write!(f, "Hand #{} event {}", hand, i64::from(self.kind))
            }
        }
    }
}

fn cards(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_array)
        .map(|cards| {
            cards
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}
