use super::*;
use crate::HandNumber;
use serde::Deserialize;
use serde::Serialize;
use std::collections::BTreeMap;

/// An agent's post-hand reflection on the result and its opponents.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Reflection {
    pub player_name: String,
    pub model_name: String,
    pub hand_number: HandNumber,
    #[serde(deserialize_with = "lenient")]
    pub timestamp: Option<Stamp>,
    pub prompt: String,
    pub game_result: String,
    pub raw_response: String,
    pub updated_opinions: BTreeMap<String, String>,
}

impl Reflection {
    /// The reflection text as the agent wrote it.
    pub fn text(&self) -> &str {
        &self.raw_response
    }
}
