use crate::Chips;
use serde::Deserialize;
use serde::Serialize;

/// Seat registered for a game, as listed in the log header.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerInfo {
    pub name: String,
    pub model_name: String,
    pub initial_chips: Chips,
}

/// Final standing of a seat once the game is over.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Ranking {
    pub rank: usize,
    pub name: String,
    pub final_chips: Chips,
    pub model_name: String,
}

/// A seat as seen at one point in a hand.
/// Live snapshots and logged decision states share this shape;
/// hole cards are only present when revealed to the viewer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerView {
    pub name: String,
    pub chips: Chips,
    pub bet_in_round: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hand: Option<Vec<String>>,
}

impl From<&PlayerInfo> for PlayerView {
    fn from(info: &PlayerInfo) -> Self {
        Self {
            name: info.name.clone(),
            chips: info.initial_chips,
            is_active: true,
            ..Self::default()
        }
    }
}
