use serde_json::Value;
use tokio::sync::mpsc::UnboundedSender;
use url::Url;

/// Lifecycle and traffic reported by an open channel, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    Opened,
    Message(String),
    Error(String),
    Closed,
}

/// Write half of a bidirectional text channel.
/// Both calls return immediately; delivery is not acknowledged.
pub trait Socket: Send + Sync {
    fn send(&self, text: String) -> anyhow::Result<()>;
    fn close(&self) -> anyhow::Result<()>;
}

/// Opens channels. The returned socket may still be connecting;
/// progress arrives on `events`, ending with [`ChannelEvent::Closed`].
pub trait Dialer: Send + Sync {
    fn dial(&self, url: &Url, events: UnboundedSender<ChannelEvent>)
    -> anyhow::Result<Box<dyn Socket>>;
}

/// Status and decoded body of an HTTP response.
/// Bodies that are empty or not JSON read as `Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: u16,
    pub body: Value,
}

impl Reply {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
    /// Server-supplied error text, if any.
    pub fn detail(&self) -> Option<&str> {
        self.body
            .get("detail")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// JSON request/response capability.
#[async_trait::async_trait]
pub trait Http: Send + Sync {
    async fn post(&self, url: &Url, body: &Value) -> anyhow::Result<Reply>;
}

/// Maps an HTTP(S) base to its WebSocket counterpart.
pub fn websocket_url(base: &Url) -> Url {
    let mut url = base.clone();
    let scheme = match base.scheme() {
        "https" => Some("wss"),
        "http" => Some("ws"),
        _ => None,
    };
    if let Some(scheme) = scheme {
        // http <-> ws are both special schemes, so this cannot fail
        let _ = url.set_scheme(scheme);
    }
    url
}

/// Appends `segment` to the base path, keeping any path prefix.
pub fn endpoint(base: &Url, segment: &str) -> Url {
    let mut url = base.clone();
    let path = format!("{}/{}", base.path().trim_end_matches('/'), segment);
    url.set_path(&path);
    url.set_query(None);
    url
}
