use crate::Chips;
use crate::HandNumber;
use crate::timeline::PlayerView;
use crate::timeline::Stage;
use serde::Deserialize;
use serde::Serialize;

/// Full table state pushed by the server.
/// Always replaced as a whole, never patched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub hand_number: HandNumber,
    pub stage: Stage,
    pub pot: Chips,
    pub current_bet: Chips,
    pub community_cards: Vec<String>,
    pub players: Vec<PlayerView>,
    pub dealer_position: Option<usize>,
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Hand #{} {} pot {} bet {} [{}]",
            self.hand_number,
            self.stage,
            self.pot,
            self.current_bet,
            self.community_cards.join(" ")
        )
    }
}
