use crate::Config;
use crate::live::Dialer;
use crate::live::Http;
use crate::live::LiveSession;
use crate::replay::Replay;
use crate::timeline::EventTimeline;
use std::sync::Arc;

/// Which source currently drives the viewer.
#[derive(Default)]
pub enum Mode {
    #[default]
    Idle,
    Live(LiveSession),
    Replay(Replay),
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Live(_) => write!(f, "live"),
            Self::Replay(_) => write!(f, "replay"),
        }
    }
}

/// Session core: owns exactly one mode at a time.
/// Entering a mode tears the previous one down first.
#[derive(Default)]
pub struct Viewer {
    config: Config,
    mode: Mode,
}

impl Viewer {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            mode: Mode::Idle,
        }
    }
    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn mode(&self) -> &Mode {
        &self.mode
    }
    pub fn live(&self) -> Option<&LiveSession> {
        match &self.mode {
            Mode::Live(live) => Some(live),
            _ => None,
        }
    }
    pub fn replay(&self) -> Option<&Replay> {
        match &self.mode {
            Mode::Replay(replay) => Some(replay),
            _ => None,
        }
    }
    pub fn replay_mut(&mut self) -> Option<&mut Replay> {
        match &mut self.mode {
            Mode::Replay(replay) => Some(replay),
            _ => None,
        }
    }
}

impl Viewer {
    /// Switches to live mode against the configured server.
    /// Open the channel with [`LiveSession::connect`] via [`Viewer::live`].
    pub fn go_live(&mut self, dialer: Arc<dyn Dialer>, http: Arc<dyn Http>) {
        self.teardown();
        log::info!("[viewer] live against {}", self.config.api_base);
        self.mode = Mode::Live(LiveSession::new(self.config.api_base.clone(), dialer, http));
    }
    /// Switches to live mode over real WebSocket and HTTP transports.
    #[cfg(feature = "net")]
    pub fn go_live_net(&mut self) {
        self.go_live(
            Arc::new(crate::live::NetDialer),
            Arc::new(crate::live::NetHttp::default()),
        );
    }
    /// Switches to replay mode over `timeline`, cursors at the start.
    pub fn open_replay(&mut self, timeline: EventTimeline) {
        self.teardown();
        log::info!("[viewer] replaying {}", timeline.metadata().game_id);
        self.mode = Mode::Replay(Replay::new(timeline, self.config.replay_speed));
    }
    /// Disconnects or stops whatever is active and goes idle.
    pub fn teardown(&mut self) {
        match std::mem::take(&mut self.mode) {
            Mode::Live(live) => live.disconnect(),
            Mode::Replay(mut replay) => replay.pause(),
            Mode::Idle => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::live::Phase;
    use crate::live::testing::MockDialer;
    use crate::live::testing::MockHttp;
    use crate::timeline::fixtures;
    use std::time::Duration;

    fn viewer() -> Viewer {
        Viewer::new(Config {
            replay_speed: Duration::from_millis(100),
            ..Config::default()
        })
    }

    #[tokio::test]
    async fn live_then_replay_disconnects() {
        let dialer = Arc::new(MockDialer::default());
        let mut viewer = viewer();
        viewer.go_live(dialer.clone(), Arc::new(MockHttp::default()));
        let live = viewer.live().unwrap();
        live.connect(Some("T".to_string())).unwrap();
        assert_eq!(live.phase(), Phase::Connecting);
        viewer.open_replay(fixtures::timeline());
        assert!(viewer.live().is_none());
        assert_eq!(dialer.closes(), 1);
        assert_eq!(viewer.replay().unwrap().decision_index(), 0);
        assert_eq!(viewer.mode().to_string(), "replay");
    }

    #[tokio::test(start_paused = true)]
    async fn replay_then_live_stops_autoplay() {
        let mut viewer = viewer();
        viewer.open_replay(fixtures::timeline());
        viewer.replay_mut().unwrap().play();
        let mut rx = viewer.replay().unwrap().subscribe();
        viewer.go_live(Arc::new(MockDialer::default()), Arc::new(MockHttp::default()));
        assert!(viewer.replay().is_none());
        assert_eq!(viewer.mode().to_string(), "live");
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn teardown_goes_idle() {
        let mut viewer = viewer();
        viewer.open_replay(fixtures::timeline());
        viewer.teardown();
        assert!(matches!(viewer.mode(), Mode::Idle));
        viewer.teardown();
        assert!(matches!(viewer.mode(), Mode::Idle));
    }
}
