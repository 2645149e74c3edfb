use serde::Serialize;
use serde_json::Value;
use std::collections::VecDeque;

/// Most entries the audit log keeps; older ones are dropped first.
pub const JOURNAL_CAPACITY: usize = 200;

/// One inbound server message as it arrived, kept for auditing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventLogEntry {
    pub ts: Option<f64>,
    pub seq: Option<u64>,
    pub kind: String,
    pub payload: Value,
}

/// Bounded audit log of inbound messages, newest first.
#[derive(Debug, Clone)]
pub struct Journal {
    capacity: usize,
    entries: VecDeque<EventLogEntry>,
}

impl Default for Journal {
    fn default() -> Self {
        Self::with_capacity(JOURNAL_CAPACITY)
    }
}

impl Journal {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }
    pub fn push(&mut self, entry: EventLogEntry) {
        self.entries.push_front(entry);
        self.entries.truncate(self.capacity);
    }
    pub fn clear(&mut self) {
        self.entries.clear();
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    pub fn latest(&self) -> Option<&EventLogEntry> {
        self.entries.front()
    }
    pub fn iter(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }
}
