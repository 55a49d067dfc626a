//! The invalid-keystroke flash timer.

use std::time::Duration;

use tokio::task::JoinHandle;

use super::AppEvent;

/// Schedules the delayed revert of the display's invalid flash.
///
/// Every rejection restarts the timer: the pending revert task is aborted
/// and a fresh one is scheduled, so the flag returns to Valid exactly once
/// per quiescent period. Expiries carry a generation counter; an expiry from
/// a superseded trigger that slipped out before the abort is simply ignored
/// by the receiver.
pub struct FlashTimer {
    duration: Duration,
    tx: flume::Sender<AppEvent>,
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

impl FlashTimer {
    pub fn new(duration: Duration, tx: flume::Sender<AppEvent>) -> Self {
        Self {
            duration,
            tx,
            generation: 0,
            pending: None,
        }
    }

    /// Cancel any pending revert and schedule a fresh one.
    pub fn trigger(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.abort();
        }
        self.generation += 1;

        let generation = self.generation;
        let duration = self.duration;
        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let _ = tx.send(AppEvent::FlashEnded(generation));
        }));
    }

    /// True if this expiry belongs to the most recent trigger.
    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_flash_expires_once() {
        let (tx, rx) = flume::unbounded();
        let mut flash = FlashTimer::new(Duration::from_millis(300), tx);

        flash.trigger();
        match rx.recv_async().await.unwrap() {
            AppEvent::FlashEnded(generation) => assert!(flash.is_current(generation)),
            other => panic!("unexpected event {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retrigger_supersedes_pending_revert() {
        let (tx, rx) = flume::unbounded();
        let mut flash = FlashTimer::new(Duration::from_millis(300), tx);

        flash.trigger();
        flash.trigger();

        // Only the second trigger's expiry arrives, and it is current.
        match rx.recv_async().await.unwrap() {
            AppEvent::FlashEnded(generation) => {
                assert_eq!(generation, 2);
                assert!(flash.is_current(generation));
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_expiry_is_detectable() {
        let (tx, _rx) = flume::unbounded();
        let mut flash = FlashTimer::new(Duration::from_millis(300), tx);

        flash.trigger();
        let stale = 1;
        flash.trigger();
        assert!(!flash.is_current(stale));
    }
}
