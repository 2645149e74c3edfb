use super::*;
use tokio::sync::mpsc::UnboundedReceiver;

/// The mutable snapshot a live session exposes to the view layer.
///
/// Every setter emits a [`Change`] once the new value is in place.
#[derive(Debug, Default)]
pub struct SessionState {
    snapshot: Option<Snapshot>,
    request: Option<ActionRequest>,
    journal: Journal,
    status: Status,
    error: Option<String>,
    notifier: Notifier,
}

impl SessionState {
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.snapshot.as_ref()
    }
    pub fn request(&self) -> Option<&ActionRequest> {
        self.request.as_ref()
    }
    pub fn journal(&self) -> &Journal {
        &self.journal
    }
    pub fn status(&self) -> Status {
        self.status
    }
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
    pub fn subscribe(&mut self) -> UnboundedReceiver<Change> {
        self.notifier.subscribe()
    }
}

impl SessionState {
    /// Clears everything a previous connection left behind.
    /// Status survives: it belongs to the game, not the connection.
    pub fn reset(&mut self) {
        self.snapshot = None;
        self.request = None;
        self.journal.clear();
        self.error = None;
        self.notifier.emit(Change::Reset);
    }
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.snapshot = Some(snapshot);
        self.notifier.emit(Change::Snapshot);
    }
    pub fn set_request(&mut self, request: ActionRequest) {
        self.request = Some(request);
        self.notifier.emit(Change::Request);
    }
    pub fn clear_request(&mut self) {
        if self.request.take().is_some() {
            self.notifier.emit(Change::Request);
        }
    }
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.notifier.emit(Change::Error);
    }
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.notifier.emit(Change::Status(status));
    }
    pub fn record(&mut self, entry: EventLogEntry) {
        self.journal.push(entry);
        self.notifier.emit(Change::Journal);
    }
    pub(crate) fn notify(&mut self, change: Change) {
        self.notifier.emit(change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn reset_clears_residue() {
        let mut state = SessionState::default();
        state.set_snapshot(Snapshot::default());
        state.set_request(ActionRequest::default());
        state.set_error("boom");
        state.set_status(Status::Running);
        state.record(EventLogEntry {
            ts: None,
            seq: None,
            kind: "ACK".to_string(),
            payload: serde_json::Value::Null,
        });
        state.reset();
        assert!(state.snapshot().is_none());
        assert!(state.request().is_none());
        assert!(state.error().is_none());
        assert!(state.journal().is_empty());
        assert_eq!(state.status(), Status::Running);
    }
    #[test]
    fn setters_notify() {
        let mut state = SessionState::default();
        let mut rx = state.subscribe();
        state.set_snapshot(Snapshot::default());
        state.set_status(Status::Finished);
        state.clear_request();
        assert_eq!(rx.try_recv().unwrap(), Change::Snapshot);
        assert_eq!(rx.try_recv().unwrap(), Change::Status(Status::Finished));
        assert!(rx.try_recv().is_err());
    }
}
