use super::*;
use crate::Chips;
use crate::guard;
use crate::session::Change;
use crate::session::EventLogEntry;
use crate::session::SessionState;
use crate::session::Status;
use crate::session::UserAction;
use crate::view::TableInfo;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::sync::Mutex;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::unbounded_channel;
use tokio::task::JoinHandle;
use url::Url;

const UNKNOWN_ERROR: &str = "unknown error";
const CREDENTIAL_REQUIRED: &str = "credential required";

/// How much of the table the server reveals to this client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    /// Every seat's hole cards.
    Debug,
    #[default]
    User,
}

/// Body of `POST /start`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StartRequest {
    pub view: Visibility,
    pub human_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial_chips: Option<Chips>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_blind: Option<Chips>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub big_blind: Option<Chips>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_hands: Option<u32>,
}

impl StartRequest {
    pub fn new(human_name: impl Into<String>) -> Self {
        Self {
            human_name: human_name.into(),
            ..Self::default()
        }
    }
}

/// Success body of `POST /start`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StartReply {
    pub hero_token: String,
    pub status: Status,
    pub ws_url: Option<String>,
}

/// Everything one connection mutates. Guarded by a single mutex so the
/// pump task and callers never observe a half-applied message.
struct Inner {
    generation: u64,
    phase: Phase,
    token: String,
    socket: Option<Box<dyn Socket>>,
    pump: Option<JoinHandle<()>>,
    state: SessionState,
}

impl Inner {
    fn transition(&mut self, phase: Phase) {
        if self.phase != phase {
            log::debug!("[live] {} -> {}", self.phase, phase);
            self.phase = phase;
            self.state.notify(Change::Phase(phase));
        }
    }
    /// Drops the current channel without touching the phase.
    fn hangup(&mut self) {
        self.generation += 1;
        if let Some(pump) = self.pump.take() {
            pump.abort();
        }
        if let Some(socket) = self.socket.take() {
            if let Err(e) = socket.close() {
                log::debug!("[live] close failed: {}", e);
            }
        }
    }
    fn apply(&mut self, event: ChannelEvent) {
        match event {
            ChannelEvent::Opened => self.transition(Phase::Open),
            ChannelEvent::Message(text) => self.receive(&text),
            ChannelEvent::Error(e) => {
                let e = SessionError::transport(e);
                log::warn!("[live] {}", e);
                self.state.set_error(e.to_string());
            }
            ChannelEvent::Closed => {
                self.socket = None;
                self.transition(Phase::Closed);
            }
        }
    }
    fn receive(&mut self, text: &str) {
        let envelope = match Protocol::envelope(text) {
            Ok(Some(envelope)) => envelope,
            Ok(None) => return,
            Err(e) => {
                log::warn!("[live] {}", e);
                self.state.set_error(e.to_string());
                return;
            }
        };
        match Protocol::decode(&envelope) {
            Ok(ServerMessage::Snapshot(snapshot)) => self.state.set_snapshot(snapshot),
            Ok(ServerMessage::ActionRequest(request)) => self.state.set_request(request),
            Ok(ServerMessage::Error(error)) => self
                .state
                .set_error(error.unwrap_or_else(|| UNKNOWN_ERROR.to_string())),
            Ok(ServerMessage::Started) => self.state.set_status(Status::Running),
            Ok(ServerMessage::GameEnd) => self.state.set_status(Status::Finished),
            Ok(ServerMessage::Notice(kind)) => log::debug!("[live] {}", kind.tag()),
            Ok(ServerMessage::Unrecognized(kind)) => {
                log::debug!("[live] unrecognized message type {:?}", kind)
            }
            Err(e) => {
                log::warn!("[live] {} ({})", e, envelope.kind);
                self.state.set_error(e.to_string());
            }
        }
        self.state.record(EventLogEntry::from(&envelope));
    }
}

/// One live connection to the game server.
///
/// Inbound channel events are applied by a pump task spawned per
/// connection; events from a superseded connection are discarded.
/// Requires a tokio runtime for [`LiveSession::connect`].
pub struct LiveSession {
    base: Url,
    dialer: Arc<dyn Dialer>,
    http: Arc<dyn Http>,
    inner: Arc<Mutex<Inner>>,
}

impl LiveSession {
    pub fn new(base: Url, dialer: Arc<dyn Dialer>, http: Arc<dyn Http>) -> Self {
        Self {
            base,
            dialer,
            http,
            inner: Arc::new(Mutex::new(Inner {
                generation: 0,
                phase: Phase::Idle,
                token: String::new(),
                socket: None,
                pump: None,
                state: SessionState::default(),
            })),
        }
    }
    pub fn base(&self) -> &Url {
        &self.base
    }
    pub fn phase(&self) -> Phase {
        guard(&self.inner).phase
    }
    pub fn token(&self) -> String {
        guard(&self.inner).token.clone()
    }
    pub fn hero_authed(&self) -> bool {
        !guard(&self.inner).token.is_empty()
    }
    pub fn subscribe(&self) -> UnboundedReceiver<Change> {
        guard(&self.inner).state.subscribe()
    }
    /// Reads session state under the lock.
    pub fn with_state<R>(&self, f: impl FnOnce(&SessionState) -> R) -> R {
        f(&guard(&self.inner).state)
    }
    pub fn table(&self) -> TableInfo {
        self.with_state(|state| TableInfo::from(state.snapshot()))
    }
}

impl LiveSession {
    /// Opens a fresh connection, superseding any current one.
    /// A provided token replaces the stored one; otherwise the stored one is reused.
    /// No-op while a previous connect is still in flight.
    pub fn connect(&self, token: Option<String>) -> Result<(), SessionError> {
        let mut inner = guard(&self.inner);
        if inner.phase.is_connecting() {
            log::debug!("[live] connect ignored while connecting");
            return Ok(());
        }
        if let Some(token) = token {
            inner.token = token;
        }
        inner.hangup();
        inner.state.reset();
        inner.transition(Phase::Connecting);
        let mut url = websocket_url(&endpoint(&self.base, "ws"));
        if !inner.token.is_empty() {
            url.query_pairs_mut().append_pair("token", &inner.token);
        }
        log::info!("[live] connecting to {}{}", url.origin().ascii_serialization(), url.path());
        let (tx, rx) = unbounded_channel();
        match self.dialer.dial(&url, tx) {
            Ok(socket) => {
                inner.socket = Some(socket);
                inner.pump = Some(Self::pump(self.inner.clone(), inner.generation, rx));
                Ok(())
            }
            Err(e) => {
                let e = SessionError::transport(e);
                log::warn!("[live] {}", e);
                inner.state.set_error(e.to_string());
                inner.transition(Phase::Closed);
                Err(e)
            }
        }
    }
    /// Best-effort close. The phase is `Closed` when this returns.
    pub fn disconnect(&self) {
        let mut inner = guard(&self.inner);
        inner.hangup();
        inner.transition(Phase::Closed);
    }
    /// Submits the hero's move over the channel when it is open,
    /// otherwise over HTTP.
    ///
    /// Over the channel the pending request stays until the server
    /// replaces it. An accepted HTTP submission clears it unless the
    /// session reconnected while the post was in flight.
    pub async fn send_action(&self, action: &UserAction) -> Result<(), SessionError> {
        let (url, generation) = {
            let mut inner = guard(&self.inner);
            if inner.phase.is_open() && !inner.token.is_empty() {
                if let Some(socket) = inner.socket.as_ref() {
                    let text = Protocol::encode(&ClientMessage::UserAction(action.clone()));
                    if let Err(e) = socket.send(text) {
                        let e = SessionError::transport(e);
                        inner.state.set_error(e.to_string());
                        return Err(e);
                    }
                    log::debug!("[live] sent {} over channel", action);
                    return Ok(());
                }
            }
            if inner.token.is_empty() {
                return Err(SessionError::Validation(CREDENTIAL_REQUIRED.to_string()));
            }
            let mut url = endpoint(&self.base, "actions");
            url.query_pairs_mut().append_pair("token", &inner.token);
            (url, inner.generation)
        };
        log::debug!("[live] posting {} over http", action);
        let reply = self
            .http
            .post(&url, &serde_json::json!(action))
            .await
            .map_err(SessionError::transport)?;
        if !reply.ok() {
            return Err(SessionError::remote(reply.status, reply.detail(), "submit"));
        }
        let mut inner = guard(&self.inner);
        if inner.generation == generation {
            inner.state.clear_request();
        } else {
            log::debug!("[live] {} accepted after reconnect", action);
        }
        Ok(())
    }
    /// Asks the server for a full snapshot. No-op unless open.
    pub fn request_snapshot(&self) {
        self.push(ClientMessage::RequestSnapshot);
    }
    /// Keep-alive. No-op unless open.
    pub fn ping(&self) {
        self.push(ClientMessage::Ping);
    }
    /// Creates a game on the server and captures the hero credential.
    pub async fn start_session(&self, request: &StartRequest) -> Result<StartReply, SessionError> {
        let url = endpoint(&self.base, "start");
        log::info!("[live] starting game for {}", request.human_name);
        let reply = self
            .http
            .post(&url, &serde_json::json!(request))
            .await
            .map_err(SessionError::transport)?;
        if !reply.ok() {
            return Err(SessionError::remote(reply.status, reply.detail(), "start"));
        }
        let start = match reply.body {
            Value::Null => StartReply::default(),
            body => serde_json::from_value::<StartReply>(body).map_err(SessionError::decode)?,
        };
        let mut inner = guard(&self.inner);
        inner.token = start.hero_token.clone();
        inner.state.set_status(start.status);
        Ok(start)
    }
}

impl LiveSession {
    fn push(&self, message: ClientMessage) {
        let inner = guard(&self.inner);
        if !inner.phase.is_open() {
            return;
        }
        if let Some(socket) = inner.socket.as_ref() {
            if let Err(e) = socket.send(Protocol::encode(&message)) {
                log::warn!("[live] {} not sent: {}", message.tag(), e);
            }
        }
    }
    fn pump(
        inner: Arc<Mutex<Inner>>,
        generation: u64,
        mut events: UnboundedReceiver<ChannelEvent>,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                let mut lock = guard(&inner);
                if lock.generation != generation {
                    break;
                }
                lock.apply(event);
            }
        })
    }
}

impl Drop for LiveSession {
    fn drop(&mut self) {
        guard(&self.inner).hangup();
    }
}
