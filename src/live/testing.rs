//! In-memory transport doubles.
use super::*;
use crate::guard;
use serde_json::Value;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::Notify;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Lets spawned pump tasks drain whatever has been emitted.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[derive(Default)]
struct Wire {
    urls: Vec<String>,
    channels: Vec<UnboundedSender<ChannelEvent>>,
    sent: Vec<String>,
    closes: usize,
    fail_dial: bool,
    fail_close: bool,
}

/// Records every dial and outbound frame; inbound events are injected by hand.
#[derive(Default)]
pub struct MockDialer {
    wire: Arc<Mutex<Wire>>,
}

impl MockDialer {
    /// Injects an event on the most recently dialed channel.
    pub fn emit(&self, event: ChannelEvent) {
        let wire = guard(&self.wire);
        if let Some(tx) = wire.channels.last() {
            let _ = tx.send(event);
        }
    }
    pub fn emit_to(&self, dial: usize, event: ChannelEvent) {
        let _ = guard(&self.wire).channels[dial].send(event);
    }
    pub fn urls(&self) -> Vec<String> {
        guard(&self.wire).urls.clone()
    }
    pub fn sent(&self) -> Vec<String> {
        guard(&self.wire).sent.clone()
    }
    pub fn closes(&self) -> usize {
        guard(&self.wire).closes
    }
    pub fn fail_dial(&self) {
        guard(&self.wire).fail_dial = true;
    }
    pub fn fail_close(&self) {
        guard(&self.wire).fail_close = true;
    }
}

impl Dialer for MockDialer {
    fn dial(
        &self,
        url: &Url,
        events: UnboundedSender<ChannelEvent>,
    ) -> anyhow::Result<Box<dyn Socket>> {
        let mut wire = guard(&self.wire);
        wire.urls.push(url.to_string());
        if wire.fail_dial {
            anyhow::bail!("connection refused");
        }
        wire.channels.push(events);
        Ok(Box::new(MockSocket {
            wire: self.wire.clone(),
        }))
    }
}

struct MockSocket {
    wire: Arc<Mutex<Wire>>,
}

impl Socket for MockSocket {
    fn send(&self, text: String) -> anyhow::Result<()> {
        guard(&self.wire).sent.push(text);
        Ok(())
    }
    fn close(&self) -> anyhow::Result<()> {
        let mut wire = guard(&self.wire);
        wire.closes += 1;
        if wire.fail_close {
            anyhow::bail!("already closed");
        }
        Ok(())
    }
}

/// Records every POST and answers with a canned reply (default `200 null`).
pub struct MockHttp {
    posts: Mutex<Vec<(String, Value)>>,
    reply: Mutex<Reply>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl Default for MockHttp {
    fn default() -> Self {
        Self {
            posts: Mutex::new(Vec::new()),
            reply: Mutex::new(Reply {
                status: 200,
                body: Value::Null,
            }),
            gate: Mutex::new(None),
        }
    }
}

impl MockHttp {
    pub fn reply(&self, status: u16, body: Value) {
        *guard(&self.reply) = Reply { status, body };
    }
    pub fn posts(&self) -> Vec<(String, Value)> {
        guard(&self.posts).clone()
    }
    /// Holds every later POST until the returned gate is notified.
    pub fn park(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *guard(&self.gate) = Some(gate.clone());
        gate
    }
}

#[async_trait::async_trait]
impl Http for MockHttp {
    async fn post(&self, url: &Url, body: &Value) -> anyhow::Result<Reply> {
        guard(&self.posts).push((url.to_string(), body.clone()));
        let gate = guard(&self.gate).clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(guard(&self.reply).clone())
    }
}
