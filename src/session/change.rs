use super::*;
use crate::Index;
use crate::live::Phase;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;

/// What changed, sent to every subscriber after the mutation lands.
/// Subscribers read the new value back from the owner.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Reset,
    Snapshot,
    Request,
    Error,
    Status(Status),
    Journal,
    Phase(Phase),
    Cursor { decision: Index, event: Index },
}

/// Fan-out of [`Change`] notifications to any number of subscribers.
/// Dropped receivers are pruned on the next emit.
#[derive(Debug, Default)]
pub struct Notifier {
    observers: Vec<UnboundedSender<Change>>,
}

impl Notifier {
    pub fn subscribe(&mut self) -> UnboundedReceiver<Change> {
        let (tx, rx) = unbounded_channel();
        self.observers.push(tx);
        rx
    }
    pub fn emit(&mut self, change: Change) {
        self.observers.retain(|tx| tx.send(change.clone()).is_ok());
    }
    pub fn count(&self) -> usize {
        self.observers.len()
    }
}
