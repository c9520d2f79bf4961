use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::app::App;
use crate::config::interval::{MAX_INTERVAL, MIN_INTERVAL};
use crate::config::PollConfig;

use super::{poll_once, PollReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Idle time between the end of one merge and the start of the next tick.
    pub interval: Duration,
    pub poll_on_start: bool,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self::from(&PollConfig::default())
    }
}

impl PollSettings {
    /// The interval actually waited between ticks.
    pub fn effective_interval(&self) -> Duration {
        self.interval.clamp(MIN_INTERVAL, MAX_INTERVAL)
    }
}

impl From<&PollConfig> for PollSettings {
    fn from(config: &PollConfig) -> Self {
        Self {
            interval: config.interval,
            poll_on_start: config.poll_on_start,
        }
    }
}

#[derive(Default)]
struct LoopState {
    next_fire_at: Cell<Option<Instant>>,
    completed: Cell<u64>,
    last_report: RefCell<Option<PollReport>>,
}

/// Self-rescheduling poll loop. Must be spawned inside a `LocalSet`.
pub struct PollLoop;

impl PollLoop {
    pub fn spawn(app: Rc<App>, settings: PollSettings) -> PollHandle {
        let (stop_tx, stop_rx) = watch::channel(false);
        let shared = Rc::new(LoopState::default());
        let task = tokio::task::spawn_local(run(app, settings, shared.clone(), stop_rx));
        tracing::info!(
            interval_ms = settings.effective_interval().as_millis() as u64,
            poll_on_start = settings.poll_on_start,
            "Polling started"
        );
        PollHandle {
            shared,
            stop_tx,
            task,
        }
    }
}

async fn run(
    app: Rc<App>,
    settings: PollSettings,
    shared: Rc<LoopState>,
    mut stop_rx: watch::Receiver<bool>,
) {
    let interval = settings.effective_interval();
    let mut delay = if settings.poll_on_start {
        Duration::ZERO
    } else {
        interval
    };

    loop {
        let fire_at = Instant::now() + delay;
        shared.next_fire_at.set(Some(fire_at));

        tokio::select! {
            _ = tokio::time::sleep_until(fire_at) => {}
            _ = stop_rx.changed() => break,
        }
        shared.next_fire_at.set(None);

        // A stop during a tick abandons it before anything is merged.
        let report = tokio::select! {
            report = poll_once(&app) => report,
            _ = stop_rx.changed() => break,
        };

        let tick = shared.completed.get() + 1;
        shared.completed.set(tick);
        tracing::debug!(
            tick,
            feeds = report.feeds,
            new_posts = report.new_posts,
            failures = report.failures.len(),
            "Poll tick finished"
        );
        *shared.last_report.borrow_mut() = Some(report);

        delay = interval;
    }

    shared.next_fire_at.set(None);
    tracing::info!("Polling stopped");
}

/// Control surface for a running [`PollLoop`]. Dropping it stops the loop.
pub struct PollHandle {
    shared: Rc<LoopState>,
    stop_tx: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PollHandle {
    pub fn stop(&self) {
        self.stop_tx.send_replace(true);
    }

    /// When the next tick is due, or `None` while a tick is running or after stop.
    pub fn next_fire_at(&self) -> Option<Instant> {
        self.shared.next_fire_at.get()
    }

    pub fn completed_ticks(&self) -> u64 {
        self.shared.completed.get()
    }

    pub fn last_report(&self) -> Option<PollReport> {
        self.shared.last_report.borrow().clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the loop to exit. Does not stop it by itself.
    pub async fn join(self) {
        let PollHandle { stop_tx, task, .. } = self;
        if let Err(e) = task.await {
            tracing::error!(error = %e, "Poll loop task failed");
        }
        drop(stop_tx);
    }

    pub async fn shutdown(self) {
        self.stop();
        self.join().await;
    }
}
