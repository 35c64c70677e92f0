//! Repeating clock tick for claim-button re-evaluation.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use birthday_types::TimestampMillis;
use birthday_utils::Clock;

/// Publishes the clock's time every `period` until dropped.
pub struct ClaimTicker {
    rx: watch::Receiver<TimestampMillis>,
    handle: JoinHandle<()>,
}

impl ClaimTicker {
    pub const DEFAULT_PERIOD: Duration = Duration::from_secs(1);

    /// Spawn the ticking task on the current runtime.
    pub fn spawn(clock: Arc<dyn Clock>, period: Duration) -> Self {
        let (tx, rx) = watch::channel(clock.now());
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                if tx.send(clock.now()).is_err() {
                    break;
                }
            }
        });
        Self { rx, handle }
    }

    /// Time as of the last tick.
    pub fn now(&self) -> TimestampMillis {
        *self.rx.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<TimestampMillis> {
        self.rx.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for ClaimTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
