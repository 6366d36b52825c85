//! Stop signal shared between the scheduler handle and its loop.

use std::time::Duration;

use tokio::sync::watch;

/// Sender half, owned by the scheduler handle.
#[derive(Debug)]
pub struct ShutdownSignal {
    tx: watch::Sender<bool>,
}

/// Receiver half, owned by the run loop.
#[derive(Debug, Clone)]
pub struct ShutdownListener {
    rx: watch::Receiver<bool>,
}

pub fn shutdown_channel() -> (ShutdownSignal, ShutdownListener) {
    let (tx, rx) = watch::channel(false);
    (ShutdownSignal { tx }, ShutdownListener { rx })
}

impl ShutdownSignal {
    /// Request the loop to stop. Safe to call more than once.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl ShutdownListener {
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once stop is requested or the signal is dropped.
    pub async fn triggered(&self) {
        let mut rx = self.rx.clone();
        let _ = rx.wait_for(|stop| *stop).await;
    }

    /// Sleep for `duration` unless stopped first.
    /// Returns `true` if the full sleep elapsed and the loop should go on.
    pub async fn sleep(&self, duration: Duration) -> bool {
        if duration.is_zero() {
            return !self.is_triggered();
        }
        tokio::select! {
            _ = tokio::time::sleep(duration) => !self.is_triggered(),
            _ = self.triggered() => false,
        }
    }
}
