use crate::Chips;
use crate::HandNumber;
use crate::session::Snapshot;
use crate::timeline::PlayerView;
use crate::timeline::Stage;

/// Live table as the view renders it, with defaults filled in
/// before the first snapshot arrives.
#[derive(Debug, Clone, PartialEq)]
pub struct TableInfo {
    pub hand_number: HandNumber,
    pub stage: Stage,
    pub pot: Chips,
    pub current_bet: Chips,
    pub community_cards: Vec<String>,
    pub players: Vec<PlayerView>,
    pub dealer_position: Option<usize>,
}

impl Default for TableInfo {
    fn default() -> Self {
        Self {
            hand_number: 1,
            stage: Stage::Other,
            pot: 0,
            current_bet: 0,
            community_cards: Vec::new(),
            players: Vec::new(),
            dealer_position: None,
        }
    }
}

impl From<Option<&Snapshot>> for TableInfo {
    fn from(snapshot: Option<&Snapshot>) -> Self {
        match snapshot {
            None => Self::default(),
            Some(s) => Self {
                hand_number: s.hand_number.max(1),
                stage: s.stage,
                pot: s.pot,
                current_bet: s.current_bet,
                community_cards: s.community_cards.clone(),
                players: s.players.clone(),
                dealer_position: s.dealer_position,
            },
        }
    }
}

impl TableInfo {
    /// The seat holding the dealer button, if it is known and in range.
    pub fn dealer(&self) -> Option<&PlayerView> {
        self.dealer_position.and_then(|i| self.players.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn defaults_before_first_snapshot() {
        let table = TableInfo::from(None);
        assert_eq!(table.hand_number, 1);
        assert_eq!(table.pot, 0);
        assert!(table.community_cards.is_empty());
        assert!(table.dealer().is_none());
    }
    #[test]
    fn copies_snapshot() {
        let snapshot = Snapshot {
            hand_number: 4,
            stage: Stage::River,
            pot: 220,
            players: vec![PlayerView {
                name: "You".into(),
                ..PlayerView::default()
            }],
            dealer_position: Some(0),
            ..Snapshot::default()
        };
        let table = TableInfo::from(Some(&snapshot));
        assert_eq!(table.hand_number, 4);
        assert_eq!(table.stage, Stage::River);
        assert_eq!(table.dealer().unwrap().name, "You");
        let unnumbered = TableInfo::from(Some(&Snapshot::default()));
        assert_eq!(unnumbered.hand_number, 1);
    }
}
