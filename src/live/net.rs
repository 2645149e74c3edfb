use super::*;
use anyhow::Context;
use futures::SinkExt;
use futures::StreamExt;
use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::mpsc::unbounded_channel;
use tokio_tungstenite::tungstenite::Message;
use url::Url;

enum Command {
    Text(String),
    Close,
}

/// Outbound half of a socket task.
struct NetSocket {
    commands: UnboundedSender<Command>,
}

impl Socket for NetSocket {
    fn send(&self, text: String) -> anyhow::Result<()> {
        self.commands
            .send(Command::Text(text))
            .map_err(|_| anyhow::anyhow!("socket task ended"))
    }
    fn close(&self) -> anyhow::Result<()> {
        self.commands
            .send(Command::Close)
            .map_err(|_| anyhow::anyhow!("socket task ended"))
    }
}

/// WebSocket dialer over tokio-tungstenite.
/// Each dial spawns one task that owns the stream until either side closes.
#[derive(Debug, Default, Clone, Copy)]
pub struct NetDialer;

impl Dialer for NetDialer {
    fn dial(
        &self,
        url: &Url,
        events: UnboundedSender<ChannelEvent>,
    ) -> anyhow::Result<Box<dyn Socket>> {
        let (tx, mut rx) = unbounded_channel::<Command>();
        let target = url.to_string();
        tokio::spawn(async move {
            let stream = match tokio_tungstenite::connect_async(target.as_str()).await {
                Ok((stream, _)) => stream,
                Err(e) => {
                    let _ = events.send(ChannelEvent::Error(e.to_string()));
                    let _ = events.send(ChannelEvent::Closed);
                    return;
                }
            };
            let _ = events.send(ChannelEvent::Opened);
            let (mut sink, mut stream) = stream.split();
            'sock: loop {
                tokio::select! {
                    biased;
                    command = rx.recv() => match command {
                        Some(Command::Text(text)) => if let Err(e) = sink.send(Message::Text(text)).await {
                            let _ = events.send(ChannelEvent::Error(e.to_string()));
                            break 'sock;
                        },
                        Some(Command::Close) | None => {
                            let _ = sink.close().await;
                            break 'sock;
                        }
                    },
                    message = stream.next() => match message {
                        Some(Ok(Message::Text(text))) => if events.send(ChannelEvent::Message(text)).is_err() { break 'sock },
                        Some(Ok(Message::Close(_))) => break 'sock,
                        Some(Err(e)) => {
                            let _ = events.send(ChannelEvent::Error(e.to_string()));
                            break 'sock;
                        }
                        None => break 'sock,
                        _ => continue 'sock,
                    },
                }
            }
            log::debug!("[socket] closed");
            let _ = events.send(ChannelEvent::Closed);
        });
        Ok(Box::new(NetSocket { commands: tx }))
    }
}

/// JSON-over-HTTP client backed by reqwest.
#[derive(Debug, Default, Clone)]
pub struct NetHttp {
    client: reqwest::Client,
}

#[async_trait::async_trait]
impl Http for NetHttp {
    async fn post(&self, url: &Url, body: &Value) -> anyhow::Result<Reply> {
        let response = self
            .client
            .post(url.clone())
            .json(body)
            .send()
            .await
            .with_context(|| format!("POST {} failed", url.path()))?;
        let status = response.status().as_u16();
        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("POST {} body unreadable", url.path()))?;
        let body = serde_json::from_slice::<Value>(&bytes).unwrap_or(Value::Null);
        Ok(Reply { status, body })
    }
}
