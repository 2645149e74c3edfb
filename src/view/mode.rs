use crate::timeline::Decision;
use crate::timeline::PlayerInfo;

/// Whose eyes the replay is watched through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Every decision is shown.
    #[default]
    Spectator,
    /// Only the selected player's decisions are shown.
    Player,
}

impl std::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Spectator => write!(f, "spectator"),
            Self::Player => write!(f, "player"),
        }
    }
}

/// View mode plus the player it is locked to, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Perspective {
    mode: ViewMode,
    selected: Option<String>,
}

impl Perspective {
    pub fn mode(&self) -> ViewMode {
        self.mode
    }
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
    /// Entering player mode with nobody selected picks the first seat.
    pub fn set_mode(&mut self, mode: ViewMode, players: &[PlayerInfo]) {
        self.mode = mode;
        if mode == ViewMode::Player && self.selected.is_none() {
            self.selected = players.first().map(|p| p.name.clone());
        }
    }
    pub fn select(&mut self, player: impl Into<String>) {
        self.selected = Some(player.into());
    }
    /// Whether `decision` is visible from here.
    pub fn admits(&self, decision: &Decision) -> bool {
        match self.mode {
            ViewMode::Spectator => true,
            ViewMode::Player => self.selected().is_some_and(|p| decision.is_by(p)),
        }
    }
}
