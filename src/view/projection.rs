use super::*;
use crate::Chips;
use crate::HandNumber;
use crate::Index;
use crate::timeline::Decision;
use crate::timeline::EventTimeline;
use crate::timeline::GameEvent;
use crate::timeline::GameState;
use crate::timeline::HandResultSummary;
use crate::timeline::PlayerView;
use crate::timeline::Stage;
use std::sync::Arc;

/// What the table looks like at one replay position.
///
/// Holds nothing but a handle to the log and the cursor indices;
/// every accessor recomputes from those.
#[derive(Debug, Clone)]
pub struct Projection {
    timeline: Arc<EventTimeline>,
    decision: Index,
    event: Index,
    perspective: Perspective,
}

impl Projection {
    pub fn new(
        timeline: Arc<EventTimeline>,
        decision: Index,
        event: Index,
        perspective: Perspective,
    ) -> Self {
        Self {
            timeline,
            decision,
            event,
            perspective,
        }
    }
    pub fn timeline(&self) -> &EventTimeline {
        &self.timeline
    }
    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }
    pub fn decision(&self) -> Option<&Decision> {
        self.timeline.decision(self.decision)
    }
    pub fn event(&self) -> Option<&GameEvent> {
        self.timeline.event(self.event)
    }
    fn state(&self) -> Option<&GameState> {
        self.decision().and_then(|d| d.game_state.as_ref())
    }
}

impl Projection {
    /// Seats as the acting agent saw them, or the registered seats at
    /// their starting stacks before anyone has acted.
    pub fn players(&self) -> Vec<PlayerView> {
        match self.state() {
            Some(state) => state.players_info.clone(),
            None => self
                .timeline
                .players()
                .iter()
                .map(PlayerView::from)
                .collect(),
        }
    }
    pub fn community_cards(&self) -> &[String] {
        self.state()
            .map(|s| s.community_cards.as_slice())
            .unwrap_or_default()
    }
    pub fn pot(&self) -> Chips {
        self.state().map(|s| s.pot).unwrap_or(0)
    }
    pub fn stage(&self) -> Stage {
        self.decision().map(|d| d.stage).unwrap_or_default()
    }
    /// Hands are numbered from 1; unnumbered positions read as the first hand.
    pub fn hand_number(&self) -> HandNumber {
        self.decision()
            .map(|d| d.hand_number)
            .filter(|&h| h > 0)
            .unwrap_or(1)
    }
    /// The current decision, if the perspective lets it through.
    pub fn filtered_decision(&self) -> Option<&Decision> {
        self.decision().filter(|d| self.perspective.admits(d))
    }
    pub fn player_stats(&self) -> Vec<PlayerStat<'_>> {
        player_stats(&self.timeline)
    }
    /// Settlement of `hand`, or of the current decision's hand.
    pub fn settlement(&self, hand: Option<HandNumber>) -> Option<HandResultSummary> {
        let hand = hand
            .filter(|&h| h > 0)
            .or_else(|| self.decision().map(|d| d.hand_number))?;
        let event = self.timeline.hand_result(hand)?;
        match HandResultSummary::try_from(event) {
            Ok(summary) => Some(summary),
            Err(e) => {
                log::warn!("[replay] hand {} result unreadable: {}", hand, e);
                None
            }
        }
    }
}
