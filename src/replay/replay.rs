use super::*;
use crate::HandNumber;
use crate::Index;
use crate::guard;
use crate::session::Change;
use crate::timeline::EventTimeline;
use crate::timeline::GameEvent;
use crate::timeline::HandResultSummary;
use crate::view::Perspective;
use crate::view::Projection;
use crate::view::ViewMode;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// A loaded log with its cursor, autoplay timer, and viewing perspective.
///
/// Manual navigation leaves autoplay alone; rewinding, jumping to the end,
/// and loading another log stop it first.
#[derive(Debug)]
pub struct Replay {
    cursor: Arc<Mutex<Cursor>>,
    autoplay: Autoplay,
    perspective: Perspective,
}

impl Replay {
    pub fn new(timeline: EventTimeline, speed: Duration) -> Self {
        let cursor = Arc::new(Mutex::new(Cursor::new(Arc::new(timeline))));
        Self {
            autoplay: Autoplay::new(cursor.clone(), speed),
            cursor,
            perspective: Perspective::default(),
        }
    }
    pub fn load(&mut self, timeline: EventTimeline) {
        self.autoplay.stop();
        log::info!("[replay] loaded {}", timeline.metadata().game_id);
        guard(&self.cursor).load(Arc::new(timeline));
    }
    pub fn timeline(&self) -> Arc<EventTimeline> {
        guard(&self.cursor).timeline().clone()
    }
    pub fn subscribe(&self) -> UnboundedReceiver<Change> {
        guard(&self.cursor).subscribe()
    }
    pub fn decision_index(&self) -> Index {
        guard(&self.cursor).decision_index()
    }
    pub fn event_index(&self) -> Index {
        guard(&self.cursor).event_index()
    }
    pub fn projection(&self) -> Projection {
        let cursor = guard(&self.cursor);
        Projection::new(
            cursor.timeline().clone(),
            cursor.decision_index(),
            cursor.event_index(),
            self.perspective.clone(),
        )
    }
}

impl Replay {
    pub fn next(&self) -> bool {
        guard(&self.cursor).next()
    }
    pub fn prev(&self) -> bool {
        guard(&self.cursor).prev()
    }
    pub fn jump_to_decision(&self, index: Index) -> bool {
        guard(&self.cursor).jump_to_decision(index)
    }
    pub fn jump_to_hand(&self, hand: HandNumber) -> bool {
        guard(&self.cursor).jump_to_hand(hand)
    }
    pub fn reset_to_start(&mut self) {
        self.autoplay.stop();
        guard(&self.cursor).rewind();
    }
    pub fn jump_to_end(&mut self) {
        self.autoplay.stop();
        guard(&self.cursor).end();
    }
}

impl Replay {
    pub fn play(&mut self) {
        self.autoplay.start();
    }
    pub fn pause(&mut self) {
        self.autoplay.stop();
    }
    pub fn playing(&self) -> bool {
        self.autoplay.running()
    }
    pub fn speed(&self) -> Duration {
        self.autoplay.speed()
    }
    pub fn set_speed(&mut self, speed: Duration) {
        self.autoplay.set_speed(speed);
    }
}

impl Replay {
    pub fn perspective(&self) -> &Perspective {
        &self.perspective
    }
    pub fn set_mode(&mut self, mode: ViewMode) {
        let timeline = self.timeline();
        self.perspective.set_mode(mode, timeline.players());
    }
    pub fn select_player(&mut self, player: impl Into<String>) {
        self.perspective.select(player);
    }
    pub fn hand_result(&self, hand: HandNumber) -> Option<GameEvent> {
        self.timeline().hand_result(hand).cloned()
    }
    pub fn settlement(&self, hand: Option<HandNumber>) -> Option<HandResultSummary> {
        self.projection().settlement(hand)
    }
}
