use super::*;
use crate::Chips;
use crate::HandNumber;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

/// A seat that was still in the hand when it was settled.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settled {
    pub name: String,
    pub hand: Vec<String>,
    pub chips_before: Chips,
    pub chips_after: Chips,
    pub total_bet: Chips,
    pub net_result: Chips,
}

/// A seat that took (part of) the pot.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Winner {
    pub name: String,
    pub hand: Vec<String>,
    pub amount: Chips,
}

/// Settlement of one hand, read off its `HandResult` event.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HandResultSummary {
    pub hand_number: HandNumber,
    pub pot: Chips,
    pub stage: Stage,
    pub community_cards: Vec<String>,
    pub players: Vec<Settled>,
    pub winners: Vec<Winner>,
    pub side_pots: Vec<Value>,
    #[serde(skip)]
    pub timestamp: Option<Stamp>,
}

impl TryFrom<&GameEvent> for HandResultSummary {
    type Error = anyhow::Error;
    fn try_from(event: &GameEvent) -> Result<Self, Self::Error> {
        if !event.is_hand_result() {
            return Err(anyhow::anyhow!(
                "event {} is not a hand result",
                i64::from(event.kind)
            ));
        }
        let mut summary = serde_json::from_value::<Self>(Value::Object(event.payload.clone()))?;
        summary.hand_number = event.hand_number;
        summary.timestamp = event.timestamp;
        Ok(summary)
    }
}

impl std::fmt::Display for HandResultSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let winners = self
            .winners
            .iter()
            .map(|w| w.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        write!(
            f,
            "Hand #{} ({}) pot {} won by {}",
            self.hand_number, self.stage, self.pot, winners
        )
    }
}
