use super::*;
use crate::Chips;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// A complete game log as written by the game server.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameLog {
    pub game_id: String,
    pub start_time: String,
    pub end_time: String,
    pub initial_chips: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub players: Vec<PlayerInfo>,
    pub llm_decisions: Vec<Decision>,
    pub llm_reflections: Vec<Reflection>,
    pub events: Vec<GameEvent>,
    pub final_rankings: Vec<Ranking>,
}

impl GameLog {
    /// Decodes either a full log object or a legacy bare event array.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(events) => Ok(Self::from_legacy(
                "legacy",
                events
                    .into_iter()
                    .map(serde_json::from_value::<GameEvent>)
                    .collect::<Result<Vec<_>, _>>()?,
            )),
            object @ Value::Object(_) => Ok(serde_json::from_value::<Self>(object)?),
            other => Err(anyhow::anyhow!("game log must be an object or array, got {}", other)),
        }
    }
    /// Wraps an event-only log. Blinds and seats come from the first
    /// hand-start event; nothing else about the game was recorded.
    pub fn from_legacy(game_id: &str, events: Vec<GameEvent>) -> Self {
        let mut log = Self {
            game_id: game_id.to_string(),
            ..Self::default()
        };
        if let Some(start) = events.iter().find(|e| e.kind == EventKind::HandStart) {
            let amount = |key: &str| start.field(key).and_then(Value::as_i64).unwrap_or(0);
            log.small_blind = amount("small_blind");
            log.big_blind = amount("big_blind");
            log.players = start
                .field("players")
                .and_then(Value::as_array)
                .map(|seats| {
                    seats
                        .iter()
                        .map(|seat| PlayerInfo {
                            name: seat
                                .get("name")
                                .and_then(Value::as_str)
                                .unwrap_or_default()
                                .to_string(),
                            model_name: "unknown".to_string(),
                            initial_chips: seat.get("chips").and_then(Value::as_i64).unwrap_or(0),
                        })
                        .collect()
                })
                .unwrap_or_default();
        }
        log.events = events;
        log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn decodes_full_log() {
        let json = r#"{
            "game_id": "g1",
            "start_time": "2025-03-01T12:00:00",
            "initial_chips": 1000,
            "small_blind": 5,
            "big_blind": 10,
            "players": [{"name": "alice", "model_name": "gpt", "initial_chips": 1000}],
            "llm_decisions": [{"player_name": "alice", "hand_number": 1}],
            "events": [{"type": 1, "hand_number": 1}],
            "final_rankings": [{"rank": 1, "name": "alice", "final_chips": 1000}]
        }"#;
        let log = GameLog::from_json(json).unwrap();
        assert_eq!(log.game_id, "g1");
        assert_eq!(log.big_blind, 10);
        assert_eq!(log.players.len(), 1);
        assert_eq!(log.llm_decisions.len(), 1);
        assert!(log.llm_reflections.is_empty());
        assert_eq!(log.final_rankings[0].rank, 1);
    }
    #[test]
    fn converts_legacy_array() {
        let json = r#"[
            {"type": 1, "hand_number": 1, "small_blind": 5, "big_blind": 10,
             "players": [{"name": "alice", "chips": 990}, {"name": "bob", "chips": 1010}]},
            {"type": 3, "hand_number": 1, "player_name": "alice", "action": "fold"},
            {"type": 1, "hand_number": 2, "small_blind": 50, "big_blind": 100, "players": []}
        ]"#;
        let log = GameLog::from_json(json).unwrap();
        assert_eq!(log.events.len(), 3);
        assert_eq!(log.small_blind, 5);
        assert_eq!(log.big_blind, 10);
        assert_eq!(log.players.len(), 2);
        assert_eq!(log.players[1].name, "bob");
        assert_eq!(log.players[1].initial_chips, 1010);
        assert_eq!(log.players[1].model_name, "unknown");
    }
    #[test]
    fn keeps_events_with_wide_tags() {
        let json = r#"{
            "game_id": "g2",
            "events": [
                {"type": 300, "hand_number": 1},
                {"type": 6, "hand_number": 1, "pot": 20}
            ]
        }"#;
        let log = GameLog::from_json(json).unwrap();
        assert_eq!(log.events.len(), 2);
        assert_eq!(log.events[0].kind, EventKind::Other(300));
        assert!(log.events[1].is_hand_result());
    }
    #[test]
    fn rejects_scalars() {
        assert!(GameLog::from_json("42").is_err());
        assert!(GameLog::from_json("{not json").is_err());
    }
}
