/// Errors surfaced by a live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// Channel or HTTP I/O failed before a response arrived.
    Transport(String),
    /// An inbound frame could not be decoded.
    Decode(String),
    /// The call was rejected locally; nothing was sent.
    Validation(String),
    /// The server answered with a non-success status.
    Remote { status: u16, message: String },
}

impl SessionError {
    pub fn transport(e: impl std::fmt::Display) -> Self {
        Self::Transport(e.to_string())
    }
    pub fn decode(e: impl std::fmt::Display) -> Self {
        Self::Decode(e.to_string())
    }
    /// Uses the server's `detail` when it sent one.
    pub fn remote(status: u16, detail: Option<&str>, what: &str) -> Self {
        Self::Remote {
            status,
            message: detail
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} failed ({})", what, status)),
        }
    }
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(s) => write!(f, "transport error: {}", s),
            Self::Decode(s) => write!(f, "message decode failed: {}", s),
            Self::Validation(s) => write!(f, "{}", s),
            Self::Remote { message, .. } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for SessionError {}
