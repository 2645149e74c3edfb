use crate::HandNumber;
use crate::Index;
use crate::session::Change;
use crate::session::Notifier;
use crate::timeline::Decision;
use crate::timeline::EventTimeline;
use crate::timeline::GameEvent;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;

/// Position within a loaded log.
///
/// The decision index is primary. The event index is derived from it:
/// after every move it points at the event nearest in time to the
/// current decision.
#[derive(Debug)]
pub struct Cursor {
    timeline: Arc<EventTimeline>,
    decision: Index,
    event: Index,
    notifier: Notifier,
}

impl Cursor {
    pub fn new(timeline: Arc<EventTimeline>) -> Self {
        Self {
            timeline,
            decision: 0,
            event: 0,
            notifier: Notifier::default(),
        }
    }
    pub fn timeline(&self) -> &Arc<EventTimeline> {
        &self.timeline
    }
    pub fn decision_index(&self) -> Index {
        self.decision
    }
    pub fn event_index(&self) -> Index {
        self.event
    }
    pub fn current_decision(&self) -> Option<&Decision> {
        self.timeline.decision(self.decision)
    }
    pub fn current_event(&self) -> Option<&GameEvent> {
        self.timeline.event(self.event)
    }
    pub fn subscribe(&mut self) -> UnboundedReceiver<Change> {
        self.notifier.subscribe()
    }
}

impl Cursor {
    /// Advances one decision. False at the last decision.
    pub fn next(&mut self) -> bool {
        if self.decision + 1 < self.timeline.decisions().len() {
            self.decision += 1;
            self.sync();
            true
        } else {
            false
        }
    }
    /// Steps back one decision. False at the first decision.
    pub fn prev(&mut self) -> bool {
        if self.decision > 0 {
            self.decision -= 1;
            self.sync();
            true
        } else {
            false
        }
    }
    /// Out-of-range indices are ignored.
    pub fn jump_to_decision(&mut self, index: Index) -> bool {
        if index < self.timeline.decisions().len() {
            self.decision = index;
            self.sync();
            true
        } else {
            false
        }
    }
    /// Moves to the first decision of `hand`, if it has any.
    pub fn jump_to_hand(&mut self, hand: HandNumber) -> bool {
        match self.timeline.first_decision_of(hand) {
            Some(index) => self.jump_to_decision(index),
            None => false,
        }
    }
    /// Swaps in another log and rewinds. Subscribers stay attached.
    pub fn load(&mut self, timeline: Arc<EventTimeline>) {
        self.timeline = timeline;
        self.rewind();
    }
    pub fn rewind(&mut self) {
        self.decision = 0;
        self.event = 0;
        self.emit();
    }
    /// Last decision, or stays at 0 when there are none.
    pub fn end(&mut self) {
        self.decision = self.timeline.decisions().len().saturating_sub(1);
        self.sync();
    }
    /// Re-derives the event index from the current decision's timestamp.
    /// Falls back to 0 when there is nothing to line up against.
    pub fn sync(&mut self) {
        if let Some(at) = self.current_decision().map(|d| d.timestamp) {
            self.event = at
                .and_then(|at| self.timeline.nearest_event(at))
                .unwrap_or(0);
        }
        self.emit();
    }
    fn emit(&mut self) {
        self.notifier.emit(Change::Cursor {
            decision: self.decision,
            event: self.event,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::GameLog;
    use crate::timeline::fixtures;

    fn cursor() -> Cursor {
        Cursor::new(Arc::new(fixtures::timeline()))
    }

    #[test]
    fn next_and_prev_stay_in_bounds() {
        let mut cursor = cursor();
        assert!(!cursor.prev());
        assert_eq!(cursor.decision_index(), 0);
        assert!(cursor.next());
        assert!(cursor.next());
        assert!(cursor.next());
        assert!(!cursor.next());
        assert_eq!(cursor.decision_index(), 3);
        assert!(cursor.prev());
        assert_eq!(cursor.decision_index(), 2);
    }

    #[test]
    fn sync_picks_nearest_event() {
        let mut cursor = cursor();
        cursor.jump_to_decision(0);
        assert_eq!(cursor.event_index(), 1);
        cursor.next();
        assert_eq!(cursor.event_index(), 2);
        cursor.next();
        assert_eq!(cursor.event_index(), 5);
        cursor.next();
        assert_eq!(cursor.event_index(), 6);
        assert!(cursor.current_event().unwrap().is_hand_result());
    }

    #[test]
    fn sync_breaks_ties_by_first_index() {
        let mut timeline = fixtures::timeline().log().clone();
        timeline.llm_decisions = vec![fixtures::decision("alice", 1, "2025-03-01T12:00:02.000")];
        timeline.events = vec![
            fixtures::event(3, 1, Some("2025-03-01T12:00:01.000")),
            fixtures::event(3, 1, Some("2025-03-01T12:00:03.000")),
        ];
        let mut cursor = Cursor::new(Arc::new(EventTimeline::from(timeline)));
        cursor.sync();
        assert_eq!(cursor.event_index(), 0);
    }

    #[test]
    fn sync_without_timestamps_falls_back_to_zero() {
        let log = GameLog {
            llm_decisions: vec![Decision::default(), Decision::default()],
            events: vec![fixtures::event(1, 1, None), fixtures::event(3, 1, None)],
            ..GameLog::default()
        };
        let mut cursor = Cursor::new(Arc::new(EventTimeline::from(log)));
        assert!(cursor.next());
        assert_eq!(cursor.event_index(), 0);
    }

    #[test]
    fn jumps() {
        let mut cursor = cursor();
        assert!(!cursor.jump_to_decision(4));
        assert_eq!(cursor.decision_index(), 0);
        assert!(cursor.jump_to_hand(2));
        assert_eq!(cursor.decision_index(), 2);
        assert!(!cursor.jump_to_hand(9));
        assert_eq!(cursor.decision_index(), 2);
        cursor.end();
        assert_eq!(cursor.decision_index(), 3);
        cursor.rewind();
        assert_eq!((cursor.decision_index(), cursor.event_index()), (0, 0));
    }

    #[test]
    fn empty_log_keeps_cursors_at_zero() {
        let mut cursor = Cursor::new(Arc::new(EventTimeline::default()));
        assert!(!cursor.next());
        assert!(!cursor.prev());
        cursor.end();
        assert_eq!((cursor.decision_index(), cursor.event_index()), (0, 0));
        assert!(cursor.current_decision().is_none());
        assert!(cursor.current_event().is_none());
    }

    #[test]
    fn moves_notify() {
        let mut cursor = cursor();
        let mut rx = cursor.subscribe();
        cursor.next();
        assert_eq!(
            rx.try_recv().unwrap(),
            Change::Cursor {
                decision: 1,
                event: 2
            }
        );
        cursor.prev();
        cursor.prev();
        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }
}
