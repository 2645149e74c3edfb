use crate::Chips;
use crate::timeline::Decision;
use crate::timeline::EventTimeline;
use crate::timeline::Reflection;

/// Per-seat history and standing over a whole log.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerStat<'a> {
    pub name: &'a str,
    pub model_name: &'a str,
    pub initial_chips: Chips,
    pub decisions: Vec<&'a Decision>,
    pub reflections: Vec<&'a Reflection>,
    /// Zero until the game has final rankings.
    pub final_chips: Chips,
    pub rank: usize,
}

/// One entry per registered seat, in seat order.
/// Seats that never acted keep empty histories.
pub fn player_stats(timeline: &EventTimeline) -> Vec<PlayerStat<'_>> {
    timeline
        .players()
        .iter()
        .map(|player| {
            let standing = timeline.rankings().iter().find(|r| r.name == player.name);
            PlayerStat {
                name: &player.name,
                model_name: &player.model_name,
                initial_chips: player.initial_chips,
                decisions: timeline
                    .decisions()
                    .iter()
                    .filter(|d| d.is_by(&player.name))
                    .collect(),
                reflections: timeline
                    .reflections()
                    .iter()
                    .filter(|r| r.player_name == player.name)
                    .collect(),
                final_chips: standing.map(|r| r.final_chips).unwrap_or(0),
                rank: standing.map(|r| r.rank).unwrap_or(0),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::fixtures;
    #[test]
    fn stats_follow_seat_order() {
        let timeline = fixtures::timeline();
        let stats = player_stats(&timeline);
        let names = stats.iter().map(|s| s.name).collect::<Vec<_>>();
        assert_eq!(names, vec!["alice", "bob", "carol"]);
        assert_eq!(stats[0].decisions.len(), 2);
        assert_eq!(stats[0].reflections.len(), 2);
        assert_eq!((stats[0].rank, stats[0].final_chips), (2, 1200));
        assert_eq!((stats[1].rank, stats[1].final_chips), (1, 1800));
    }
    #[test]
    fn silent_seat_keeps_empty_history() {
        let timeline = fixtures::timeline();
        let carol = &player_stats(&timeline)[2];
        assert!(carol.decisions.is_empty());
        assert!(carol.reflections.is_empty());
        assert_eq!((carol.rank, carol.final_chips), (0, 0));
        assert_eq!(carol.initial_chips, 1000);
        assert_eq!(carol.model_name, "carol-model");
    }
}
