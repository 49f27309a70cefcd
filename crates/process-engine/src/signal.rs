//! # Signal Slot
//!
//! A single-assignment cell that carries the one external decision an instance
//! may receive. The signal handler resolves it at most once; the instance's
//! wait races the slot against a timer.
//!
//! # No Lost Wakeups
//! The slot is backed by a `tokio::sync::watch` channel, so a value recorded
//! *before* the instance reaches its wait is observed immediately: the wait
//! evaluates already-recorded state, not only future notifications.

use tokio::sync::watch;
use tracing::debug;

/// Single-assignment signal cell shared between a worker loop and one
/// process instance.
pub struct SignalSlot<S> {
    tx: std::sync::Arc<watch::Sender<Option<S>>>,
}

impl<S> Clone for SignalSlot<S> {
    fn clone(&self) -> Self {
        Self {
            tx: std::sync::Arc::clone(&self.tx),
        }
    }
}

impl<S> Default for SignalSlot<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> SignalSlot<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self {
            tx: std::sync::Arc::new(tx),
        }
    }

    /// Records the signal if none has been recorded yet.
    ///
    /// Returns `false` when a signal was already recorded; the earlier value
    /// stands and this one is discarded.
    pub fn resolve(&self, signal: S) -> bool {
        self.tx.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(signal);
            true
        })
    }

    /// Whether a signal has been recorded.
    pub fn is_resolved(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Waits until a signal is recorded and returns it.
    ///
    /// Resolves immediately if the signal was recorded before the call.
    pub async fn wait(&self) -> S {
        let mut rx = self.tx.subscribe();
        loop {
            if let Some(signal) = rx.borrow_and_update().as_ref() {
                return signal.clone();
            }
            if rx.changed().await.is_err() {
                // Unreachable while `self` holds the sender; park forever
                // rather than fabricate a signal.
                debug!("signal slot sender dropped mid-wait");
                std::future::pending::<()>().await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn first_resolution_wins() {
        let slot = SignalSlot::<bool>::new();
        assert!(!slot.is_resolved());

        assert!(slot.resolve(true));
        assert!(!slot.resolve(false), "duplicate must be discarded");

        assert!(slot.is_resolved());
        assert!(slot.wait().await, "recorded decision must stand");
    }

    #[tokio::test]
    async fn wait_sees_value_recorded_before_the_wait_began() {
        let slot = SignalSlot::<u32>::new();
        slot.resolve(7);
        assert_eq!(slot.wait().await, 7);
    }

    #[tokio::test]
    async fn wait_wakes_on_later_resolution() {
        let slot = SignalSlot::<u32>::new();
        let waiter = {
            let slot = slot.clone();
            tokio::spawn(async move { slot.wait().await })
        };

        tokio::task::yield_now().await;
        slot.resolve(42);

        assert_eq!(waiter.await.unwrap(), 42);
    }
}
