use super::*;
use crate::guard;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// Default time between autoplay steps.
pub const DEFAULT_SPEED: Duration = Duration::from_millis(1500);

/// Advances a shared [`Cursor`] one decision per tick until it runs out.
///
/// At most one timer task exists at a time. The first step happens one
/// full period after [`Autoplay::start`]. Requires a tokio runtime.
#[derive(Debug)]
pub struct Autoplay {
    cursor: Arc<Mutex<Cursor>>,
    speed: Duration,
    task: Option<JoinHandle<()>>,
}

impl Autoplay {
    pub fn new(cursor: Arc<Mutex<Cursor>>, speed: Duration) -> Self {
        Self {
            cursor,
            speed,
            task: None,
        }
    }
    pub fn speed(&self) -> Duration {
        self.speed
    }
    pub fn running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }
    /// No-op if already running.
    pub fn start(&mut self) {
        if self.running() {
            return;
        }
        log::debug!("[autoplay] start every {:?}", self.speed);
        self.task = Some(tokio::spawn(Self::run(self.cursor.clone(), self.speed)));
    }
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                log::debug!("[autoplay] stop");
            }
            task.abort();
        }
    }
    /// Takes effect immediately: a running timer restarts at the new period.
    pub fn set_speed(&mut self, speed: Duration) {
        self.speed = speed;
        if self.running() {
            self.stop();
            self.start();
        }
    }
    async fn run(cursor: Arc<Mutex<Cursor>>, period: Duration) {
        // zero-length intervals panic in tokio
        let period = period.max(Duration::from_millis(1));
        let mut ticks = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            ticks.tick().await;
            let moved = guard(&cursor).next();
            if !moved {
                break;
            }
        }
        log::debug!("[autoplay] reached last decision");
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::EventTimeline;
    use crate::timeline::GameLog;
    use crate::timeline::fixtures;

    fn shared(decisions: usize) -> Arc<Mutex<Cursor>> {
        let log = GameLog {
            llm_decisions: (0..decisions)
                .map(|i| fixtures::decision("alice", 1, &format!("2025-03-01T12:00:0{}.000", i)))
                .collect(),
            ..GameLog::default()
        };
        Arc::new(Mutex::new(Cursor::new(Arc::new(EventTimeline::from(log)))))
    }

    #[tokio::test(start_paused = true)]
    async fn stops_at_last_decision() {
        let cursor = shared(3);
        let mut autoplay = Autoplay::new(cursor.clone(), Duration::from_millis(100));
        autoplay.start();
        assert!(autoplay.running());
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(guard(&cursor).decision_index(), 1);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(guard(&cursor).decision_index(), 2);
        assert!(!autoplay.running());
    }

    #[tokio::test(start_paused = true)]
    async fn first_step_waits_one_period() {
        let cursor = shared(3);
        let mut autoplay = Autoplay::new(cursor.clone(), Duration::from_millis(100));
        autoplay.start();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(guard(&cursor).decision_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_pending_steps() {
        let cursor = shared(5);
        let mut autoplay = Autoplay::new(cursor.clone(), Duration::from_millis(100));
        autoplay.start();
        tokio::time::sleep(Duration::from_millis(150)).await;
        autoplay.stop();
        autoplay.stop();
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert_eq!(guard(&cursor).decision_index(), 1);
        assert!(!autoplay.running());
    }

    #[tokio::test(start_paused = true)]
    async fn speed_change_restarts_timer() {
        let cursor = shared(5);
        let mut autoplay = Autoplay::new(cursor.clone(), Duration::from_millis(1000));
        autoplay.start();
        tokio::time::sleep(Duration::from_millis(900)).await;
        autoplay.set_speed(Duration::from_millis(100));
        assert!(autoplay.running());
        tokio::time::sleep(Duration::from_millis(250)).await;
        assert_eq!(guard(&cursor).decision_index(), 2);
        assert_eq!(autoplay.speed(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn start_is_idempotent() {
        let cursor = shared(5);
        let mut autoplay = Autoplay::new(cursor.clone(), Duration::from_millis(100));
        autoplay.start();
        autoplay.start();
        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(guard(&cursor).decision_index(), 1);
    }
}
