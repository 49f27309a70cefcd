//! # Process Context
//!
//! `ProcessContext` is the only surface through which a state machine touches
//! the outside world. Every method on it is a well-defined suspension point:
//! a fixed-duration timer, a signal-vs-timeout race, or an activity invocation
//! with its own deadline and retry policy. Code between suspension points runs
//! as a single logical thread over values the instance owns exclusively.

use crate::error::ActivityFailure;
use crate::policy::ActivityOptions;
use crate::process::{Process, ProcessId};
use crate::signal::SignalSlot;
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, warn};

/// Per-instance handle to the engine's suspension points and injected
/// dependencies.
pub struct ProcessContext<P: Process> {
    id: ProcessId,
    deps: P::Context,
    slot: SignalSlot<P::Signal>,
    activity_slots: Arc<Semaphore>,
}

impl<P: Process> Clone for ProcessContext<P> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            deps: self.deps.clone(),
            slot: self.slot.clone(),
            activity_slots: Arc::clone(&self.activity_slots),
        }
    }
}

impl<P: Process> ProcessContext<P> {
    pub(crate) fn new(
        id: ProcessId,
        deps: P::Context,
        slot: SignalSlot<P::Signal>,
        activity_slots: Arc<Semaphore>,
    ) -> Self {
        Self {
            id,
            deps,
            slot,
            activity_slots,
        }
    }

    /// Id of the instance this context belongs to.
    pub fn id(&self) -> &ProcessId {
        &self.id
    }

    /// Dependencies injected via [`ProcessEngine::run`](crate::ProcessEngine::run).
    pub fn deps(&self) -> &P::Context {
        &self.deps
    }

    /// Fixed-duration suspension. Resumes strictly after `duration` has
    /// elapsed; never busy-waits.
    pub async fn sleep(&self, duration: Duration) {
        sleep(duration).await;
    }

    /// Races the instance's signal slot against a timer.
    ///
    /// Returns the recorded signal, or `None` if `wait_timeout` elapses first.
    /// A signal recorded before this call is observed immediately, and the
    /// same recorded signal is returned on every subsequent call - the slot is
    /// single-assignment, so replays of the wait are deterministic.
    pub async fn wait_signal(&self, wait_timeout: Duration) -> Option<P::Signal> {
        tokio::select! {
            biased;
            signal = self.slot.wait() => Some(signal),
            _ = sleep(wait_timeout) => None,
        }
    }

    /// Invokes a side-effecting activity under `options`.
    ///
    /// Each attempt first obtains an activity execution slot (bounded by
    /// `schedule_to_start`), then runs with a per-attempt `start_to_close`
    /// deadline, further clamped by the overall `schedule_to_close` budget.
    /// Failed or timed-out attempts back off per the retry policy; exhaustion
    /// surfaces as [`ActivityFailure::RetriesExhausted`].
    pub async fn run_activity<T, E, F, Fut>(
        &self,
        activity: &str,
        options: &ActivityOptions,
        mut attempt_fn: F,
    ) -> Result<T, ActivityFailure>
    where
        F: FnMut() -> Fut + Send,
        Fut: Future<Output = Result<T, E>> + Send,
        T: Send,
        E: Display,
    {
        let deadline = Instant::now() + options.schedule_to_close;
        let mut backoff = options.retry.initial_backoff;
        let mut last_error = String::new();
        let attempts = options.retry.max_attempts.max(1);

        for attempt in 1..=attempts {
            let permit = match timeout(
                options.schedule_to_start,
                Arc::clone(&self.activity_slots).acquire_owned(),
            )
            .await
            {
                Ok(Ok(permit)) => permit,
                Ok(Err(_)) => {
                    return Err(ActivityFailure::WorkerStopped {
                        activity: activity.to_string(),
                    })
                }
                Err(_) => {
                    return Err(ActivityFailure::ScheduleTimedOut {
                        activity: activity.to_string(),
                        after: options.schedule_to_start,
                    })
                }
            };

            let remaining = deadline.saturating_duration_since(Instant::now());
            let per_attempt = options.start_to_close.min(remaining);
            let result = timeout(per_attempt, attempt_fn()).await;
            drop(permit);

            match result {
                Ok(Ok(value)) => {
                    debug!(id = %self.id, activity, attempt, "Activity completed");
                    return Ok(value);
                }
                Ok(Err(error)) => {
                    last_error = error.to_string();
                    warn!(id = %self.id, activity, attempt, error = %last_error, "Activity attempt failed");
                }
                Err(_) => {
                    last_error = format!("attempt timed out after {per_attempt:?}");
                    warn!(id = %self.id, activity, attempt, "Activity attempt timed out");
                }
            }

            if attempt < attempts {
                sleep(backoff).await;
                backoff = options.retry.next_backoff(backoff);
            }
        }

        Err(ActivityFailure::RetriesExhausted {
            activity: activity.to_string(),
            attempts,
            last: last_error,
        })
    }
}
