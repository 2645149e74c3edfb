use super::*;
use crate::Chips;
use crate::HandNumber;
use crate::Index;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

/// Game-level header fields of a loaded log.
#[derive(Debug, Clone, Copy)]
pub struct Metadata<'a> {
    pub game_id: &'a str,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub initial_chips: Chips,
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub players: &'a [PlayerInfo],
}

/// Counts and standings for a loaded log.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub game_id: String,
    pub start_time: String,
    pub end_time: String,
    pub total_hands: HandNumber,
    pub total_decisions: usize,
    pub total_reflections: usize,
    pub players: Vec<PlayerInfo>,
    pub final_rankings: Vec<Ranking>,
}

/// Immutable view over one loaded game log.
///
/// Decisions and events are two independently ordered sequences over the
/// same game; they share hand numbers and wall-clock timestamps, which is
/// all a cursor needs to line them up.
#[derive(Debug, Clone, Default)]
pub struct EventTimeline {
    log: GameLog,
}

impl From<GameLog> for EventTimeline {
    fn from(log: GameLog) -> Self {
        Self { log }
    }
}

impl EventTimeline {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        GameLog::from_json(json).map(Self::from)
    }
    pub fn open(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read game log {}", path.display()))?;
        Self::from_json(&json)
            .with_context(|| format!("failed to decode game log {}", path.display()))
            .inspect(|t| {
                log::info!(
                    "[timeline] loaded {} ({} decisions, {} events)",
                    t.log.game_id,
                    t.log.llm_decisions.len(),
                    t.log.events.len()
                )
            })
    }
    pub fn log(&self) -> &GameLog {
        &self.log
    }
    pub fn metadata(&self) -> Metadata<'_> {
        Metadata {
            game_id: &self.log.game_id,
            start_time: &self.log.start_time,
            end_time: &self.log.end_time,
            initial_chips: self.log.initial_chips,
            small_blind: self.log.small_blind,
            big_blind: self.log.big_blind,
            players: &self.log.players,
        }
    }
    pub fn players(&self) -> &[PlayerInfo] {
        &self.log.players
    }
    pub fn decisions(&self) -> &[Decision] {
        &self.log.llm_decisions
    }
    pub fn reflections(&self) -> &[Reflection] {
        &self.log.llm_reflections
    }
    pub fn events(&self) -> &[GameEvent] {
        &self.log.events
    }
    pub fn rankings(&self) -> &[Ranking] {
        &self.log.final_rankings
    }
    pub fn decision(&self, index: Index) -> Option<&Decision> {
        self.log.llm_decisions.get(index)
    }
    pub fn event(&self, index: Index) -> Option<&GameEvent> {
        self.log.events.get(index)
    }
}

impl EventTimeline {
    pub fn decisions_by_hand(&self) -> BTreeMap<HandNumber, Vec<&Decision>> {
        partition(self.decisions(), |d| d.hand_number)
    }
    pub fn reflections_by_hand(&self) -> BTreeMap<HandNumber, Vec<&Reflection>> {
        partition(self.reflections(), |r| r.hand_number)
    }
    pub fn events_by_hand(&self) -> BTreeMap<HandNumber, Vec<&GameEvent>> {
        partition(self.events(), |e| e.hand_number)
    }
    /// First settlement event recorded for a hand.
    pub fn hand_result(&self, hand: HandNumber) -> Option<&GameEvent> {
        self.events()
            .iter()
            .filter(|e| e.hand_number == hand)
            .find(|e| e.is_hand_result())
    }
    /// First decision index of a hand.
    pub fn first_decision_of(&self, hand: HandNumber) -> Option<Index> {
        self.decisions().iter().position(|d| d.hand_number == hand)
    }
    /// Index of the event closest in time to `at`.
    /// Events without a timestamp never match; ties keep the earliest index.
    pub fn nearest_event(&self, at: Stamp) -> Option<Index> {
        self.events()
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.timestamp.map(|ts| (i, distance(ts, at))))
            .min_by_key(|&(i, gap)| (gap, i))
            .map(|(i, _)| i)
    }
    pub fn summary(&self) -> Summary {
        Summary {
            game_id: self.log.game_id.clone(),
            start_time: self.log.start_time.clone(),
            end_time: self.log.end_time.clone(),
            total_hands: self.events().iter().map(|e| e.hand_number).max().unwrap_or(0),
            total_decisions: self.decisions().len(),
            total_reflections: self.reflections().len(),
            players: self.log.players.clone(),
            final_rankings: self.log.final_rankings.clone(),
        }
    }
}

fn partition<T, F>(items: &[T], hand: F) -> BTreeMap<HandNumber, Vec<&T>>
where
    F: Fn(&T) -> HandNumber,
{
    items.iter().fold(BTreeMap::new(), |mut groups, item| {
        groups.entry(hand(item)).or_insert_with(Vec::new).push(item);
        groups
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    #[test]
    fn groups_preserve_order() {
        let timeline = timeline();
        let decisions = timeline.decisions_by_hand();
        assert_eq!(decisions.len(), 2);
        assert_eq!(decisions[&1][0].player_name, "alice");
        assert_eq!(decisions[&1][1].player_name, "bob");
        let events = timeline.events_by_hand();
        assert_eq!(events[&1].len(), 4);
        assert_eq!(events[&2].len(), 3);
        let reflections = timeline.reflections_by_hand();
        assert_eq!(reflections[&1].len(), 2);
        assert_eq!(reflections[&2].len(), 1);
    }
    #[test]
    fn hand_result_per_hand() {
        let timeline = timeline();
        let first = timeline.hand_result(1).unwrap();
        assert_eq!(first.hand_number, 1);
        assert!(first.is_hand_result());
        let second = timeline.hand_result(2).unwrap();
        assert_eq!(second.hand_number, 2);
        assert!(timeline.hand_result(3).is_none());
    }
    #[test]
    fn hand_result_interleaved() {
        let timeline = EventTimeline::from(GameLog {
            events: vec![
                event(3, 1, None),
                event(3, 2, None),
                event(6, 2, None),
                event(3, 1, None),
                event(6, 1, None),
                event(3, 3, None),
            ],
            ..GameLog::default()
        });
        assert!(std::ptr::eq(timeline.hand_result(1).unwrap(), &timeline.events()[4]));
        assert!(std::ptr::eq(timeline.hand_result(2).unwrap(), &timeline.events()[2]));
        assert!(timeline.hand_result(3).is_none());
    }
    #[test]
    fn nearest_event_skips_untimed() {
        let timeline = timeline();
        let at = parse_stamp("2025-03-01T12:00:00").unwrap();
        assert_eq!(timeline.nearest_event(at), Some(1));
    }
    #[test]
    fn nearest_event_first_wins_ties() {
        let timeline = EventTimeline::from(GameLog {
            events: vec![
                event(3, 1, Some("2025-03-01T12:00:00")),
                event(3, 1, Some("2025-03-01T12:00:02")),
                event(3, 1, Some("2025-03-01T12:00:00")),
            ],
            ..GameLog::default()
        });
        let at = parse_stamp("2025-03-01T12:00:01").unwrap();
        assert_eq!(timeline.nearest_event(at), Some(0));
    }
    #[test]
    fn nearest_event_without_candidates() {
        let timeline = EventTimeline::from(GameLog {
            events: vec![event(1, 1, None)],
            ..GameLog::default()
        });
        let at = parse_stamp("2025-03-01T12:00:01").unwrap();
        assert_eq!(timeline.nearest_event(at), None);
    }
    #[test]
    fn summary_counts() {
        let summary = timeline().summary();
        assert_eq!(summary.total_hands, 2);
        assert_eq!(summary.total_decisions, 4);
        assert_eq!(summary.total_reflections, 3);
        assert_eq!(summary.players.len(), 3);
        assert_eq!(EventTimeline::default().summary().total_hands, 0);
    }
    #[test]
    fn first_decision_of_hand() {
        let timeline = timeline();
        assert_eq!(timeline.first_decision_of(2), Some(2));
        assert_eq!(timeline.first_decision_of(9), None);
    }
}
