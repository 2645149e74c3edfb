use crate::Chips;
use crate::HandNumber;
use crate::timeline::Stage;
use serde::Deserialize;
use serde::Serialize;

/// Which moves the hero may make right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LegalActions {
    pub fold: bool,
    pub check: bool,
    pub call: bool,
    pub raise: bool,
    pub all_in: bool,
}

impl LegalActions {
    pub fn allows(&self, kind: Move) -> bool {
        match kind {
            Move::Fold => self.fold,
            Move::Check => self.check,
            Move::Call => self.call,
            Move::Raise => self.raise,
            Move::AllIn => self.all_in,
        }
    }
    pub fn moves(&self) -> Vec<Move> {
        Move::all()
            .into_iter()
            .filter(|m| self.allows(*m))
            .collect()
    }
}

/// A decision the server is waiting on from the hero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionRequest {
    pub hero: String,
    pub hand_number: HandNumber,
    pub stage: Stage,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub chips: Chips,
    pub bet_in_round: Chips,
    pub call_amount: Chips,
    pub legal_actions: LegalActions,
}

/// Kinds of move the hero can submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    #[serde(rename = "fold")]
    Fold,
    #[serde(rename = "check")]
    Check,
    #[serde(rename = "call")]
    Call,
    #[serde(rename = "raise")]
    Raise,
    #[serde(rename = "all-in")]
    AllIn,
}

impl Move {
    pub fn all() -> [Self; 5] {
        [Self::Fold, Self::Check, Self::Call, Self::Raise, Self::AllIn]
    }
    pub fn label(&self) -> &'static str {
        match self {
            Self::Fold => "fold",
            Self::Check => "check",
            Self::Call => "call",
            Self::Raise => "raise",
            Self::AllIn => "all-in",
        }
    }
}

impl TryFrom<&str> for Move {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        match s.trim().to_lowercase().as_str() {
            "fold" | "f" => Ok(Self::Fold),
            "check" | "x" => Ok(Self::Check),
            "call" | "c" => Ok(Self::Call),
            "raise" | "r" => Ok(Self::Raise),
            "all-in" | "allin" | "all" => Ok(Self::AllIn),
            other => Err(anyhow::anyhow!("unknown action: {}", other)),
        }
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The hero's answer to an [`ActionRequest`], as sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAction {
    pub action: Move,
    #[serde(default)]
    pub amount: Chips,
}

impl UserAction {
    pub fn new(action: Move, amount: Chips) -> Self {
        Self { action, amount }
    }
    pub fn fold() -> Self {
        Self::new(Move::Fold, 0)
    }
    pub fn check() -> Self {
        Self::new(Move::Check, 0)
    }
}

/// Parses `"fold"`, `"call 20"`, `"r 60"`, `"allin"` and friends.
/// Raises need an amount; everything else defaults to zero.
impl TryFrom<&str> for UserAction {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut words = s.split_whitespace();
        let action = Move::try_from(words.next().unwrap_or_default())?;
        let amount = match words.next() {
            Some(n) => n
                .parse::<Chips>()
                .map_err(|_| anyhow::anyhow!("invalid amount: {}", n))?,
            None if action == Move::Raise => {
                return Err(anyhow::anyhow!("raise needs an amount"));
            }
            None => 0,
        };
        if amount < 0 {
            return Err(anyhow::anyhow!("negative amount: {}", amount));
        }
        Ok(Self { action, amount })
    }
}

impl std::fmt::Display for UserAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self.amount {
            0 => write!(f, "{}", self.action),
            n => write!(f, "{} {}", self.action, n),
        }
    }
}
