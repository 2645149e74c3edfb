use super::*;
use crate::Chips;
use crate::HandNumber;
use serde::Deserialize;
use serde::Serialize;

/// Table state captured at the moment an agent was asked to act.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameState {
    pub hand: Vec<String>,
    pub community_cards: Vec<String>,
    pub pot: Chips,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub stage: Stage,
    pub position: Option<usize>,
    pub dealer_position: Option<usize>,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub hand_num: HandNumber,
    pub players_info: Vec<PlayerView>,
}

/// One recorded agent decision: the prompt it saw, the state it acted
/// under, and the action it chose.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Decision {
    pub player_name: String,
    pub model_name: String,
    pub hand_number: HandNumber,
    pub stage: Stage,
    #[serde(deserialize_with = "lenient")]
    pub timestamp: Option<Stamp>,
    pub prompt: String,
    pub game_state: Option<GameState>,
    pub raw_response: String,
    pub reasoning_content: String,
    pub parsed_action: String,
    pub action_amount: Chips,
    pub play_reason: String,
    pub behavior: String,
    pub response_time: f64,
    pub error: String,
}

impl Decision {
    pub fn is_by(&self, player: &str) -> bool {
        self.player_name == player
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.action_amount {
            0 => write!(f, "{}: {}", self.player_name, self.parsed_action),
            n => write!(f, "{}: {} {}", self.player_name, self.parsed_action, n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn decodes_logged_decision() {
        let json = r#"{
            "player_name": "alice",
            "model_name": "gpt",
            "hand_number": 3,
            "stage": "flop",
            "timestamp": "2025-03-01T12:00:00.250",
            "game_state": {
                "community_cards": ["Ah", "Kd", "2c"],
                "pot": 120,
                "stage": "flop",
                "players_info": [{"name": "alice", "chips": 880}]
            },
            "parsed_action": "raise",
            "action_amount": 40
        }"#;
        let decision = serde_json::from_str::<Decision>(json).unwrap();
        assert_eq!(decision.hand_number, 3);
        assert_eq!(decision.stage, Stage::Flop);
        assert!(decision.timestamp.is_some());
        let state = decision.game_state.as_ref().unwrap();
        assert_eq!(state.community_cards.len(), 3);
        assert_eq!(state.players_info[0].chips, 880);
        assert_eq!(decision.to_string(), "alice: raise 40");
    }
    #[test]
    fn tolerates_missing_timestamp() {
        let decision = serde_json::from_str::<Decision>(r#"{"player_name": "bob"}"#).unwrap();
        assert!(decision.timestamp.is_none());
        assert!(decision.game_state.is_none());
        assert_eq!(decision.to_string(), "bob: ");
    }
}
