//! Logical step counter shared between the host and the run loop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::Notify;

use super::ShutdownListener;

/// Step counter incremented by the host and consumed by the scheduler.
///
/// Every mutation wakes waiters, and waits also poll at a fixed interval,
/// so a missed wake-up costs at most one poll.
#[derive(Debug, Default)]
pub struct StepCounter {
    count: AtomicU64,
    changed: Notify,
}

impl StepCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> u64 {
        self.count.load(Ordering::Acquire)
    }

    /// Add one step and return the new count.
    pub fn increment(&self) -> u64 {
        let value = self.count.fetch_add(1, Ordering::AcqRel).saturating_add(1);
        self.changed.notify_waiters();
        value
    }

    pub fn set(&self, value: u64) {
        self.count.store(value, Ordering::Release);
        self.changed.notify_waiters();
    }

    /// Subtract `unit` if at least that many steps exist. Never goes negative.
    pub fn try_consume(&self, unit: u64) -> bool {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |count| {
                count.checked_sub(unit)
            })
            .is_ok()
    }

    /// Wait until the count reaches `threshold`.
    /// Returns `false` if stopped while waiting.
    pub async fn wait_for_threshold(
        &self,
        threshold: f64,
        poll: Duration,
        shutdown: &ShutdownListener,
    ) -> bool {
        self.wait_until(|count| count as f64 >= threshold, poll, shutdown)
            .await
    }

    /// Wait until `unit` steps exist, then consume them.
    /// Returns `false` if stopped while waiting.
    pub async fn consume(&self, unit: u64, poll: Duration, shutdown: &ShutdownListener) -> bool {
        loop {
            let changed = self.changed.notified();
            if self.try_consume(unit) {
                return true;
            }
            if !self.park(changed, poll, shutdown).await {
                return false;
            }
        }
    }

    async fn wait_until<F>(&self, ready: F, poll: Duration, shutdown: &ShutdownListener) -> bool
    where
        F: Fn(u64) -> bool,
    {
        loop {
            let changed = self.changed.notified();
            if shutdown.is_triggered() {
                return false;
            }
            if ready(self.get()) {
                return true;
            }
            if !self.park(changed, poll, shutdown).await {
                return false;
            }
        }
    }

    async fn park(
        &self,
        changed: tokio::sync::futures::Notified<'_>,
        poll: Duration,
        shutdown: &ShutdownListener,
    ) -> bool {
        tokio::select! {
            _ = changed => true,
            _ = tokio::time::sleep(poll) => true,
            _ = shutdown.triggered() => false,
        }
    }
}
