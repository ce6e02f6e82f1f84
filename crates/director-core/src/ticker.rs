//! Repeating timer that drives a `ProgressDriver`.
//!
//! The spawned task is the only writer of the current index. Readers take
//! snapshots from a `watch` channel. Dropping the handle cancels the timer,
//! so a torn-down view can never be updated by a late tick.

use crate::driver::{DriverState, ProgressDriver, Tick};
use crate::error::{DirectorError, Result};
use crate::task::Task;
use crate::timeline::Progress;
use chrono::Local;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub struct ProgressHandle {
    rx: watch::Receiver<Progress>,
    cancel: CancellationToken,
    join: Option<JoinHandle<()>>,
}

impl ProgressHandle {
    /// Build the timeline for `task` and start ticking every `interval`.
    ///
    /// The first tick fires one full interval after start. Must be called
    /// from within a tokio runtime.
    pub fn spawn(task: &Task, interval: Duration) -> Result<Self> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| DirectorError::NoRuntime)?;

        let mut driver = ProgressDriver::new();
        let initial = driver.start(task, Local::now());
        let (tx, rx) = watch::channel(initial);
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let task_id = task.id;
        let first_tick = Instant::now() + interval;

        tracing::info!(
            %task_id,
            interval_ms = interval.as_millis() as u64,
            "progress timer started"
        );

        let join = runtime.spawn(async move {
            let mut timer = tokio::time::interval_at(first_tick, interval);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        tracing::debug!(%task_id, "progress timer cancelled");
                        return;
                    }
                    _ = timer.tick() => {}
                }

                match driver.tick() {
                    Tick::Advanced(index) => {
                        tracing::debug!(%task_id, index, "step advanced");
                    }
                    Tick::Finished(index) => {
                        tracing::info!(%task_id, index, "timeline finished");
                    }
                    Tick::Ignored => return,
                }

                if let Some(progress) = driver.progress() {
                    tx.send_replace(progress.clone());
                }
                if driver.state() == DriverState::Terminal {
                    return;
                }
            }
        });

        Ok(Self {
            rx,
            cancel,
            join: Some(join),
        })
    }

    /// Snapshot of the current progress.
    pub fn progress(&self) -> Progress {
        self.rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Progress> {
        self.rx.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.rx.borrow().is_complete()
    }

    /// Wait until the timeline reaches its final step. If the timer is
    /// cancelled first, resolves with the last published progress.
    pub async fn wait_finished(&self) -> Progress {
        let mut rx = self.rx.clone();
        if let Ok(progress) = rx.wait_for(Progress::is_complete).await {
            return progress.clone();
        }
        let last = rx.borrow().clone();
        last
    }

    /// Cancel the timer and wait for its task to exit.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(join) = self.join.take() {
            if let Err(e) = join.await {
                if e.is_panic() {
                    tracing::warn!("progress timer panicked: {e}");
                }
            }
        }
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
