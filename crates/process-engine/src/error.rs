//! # Engine Errors
//!
//! This module defines the common error types used throughout the process
//! engine. By centralizing error definitions, the split between transport
//! faults ([`EngineError`]), terminal instance outcomes ([`ProcessFailure`]),
//! and activity-executor faults ([`ActivityFailure`]) stays consistent across
//! all workers and clients.

use std::time::Duration;

/// Errors that can occur while talking to a worker over its channel.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Worker closed")]
    WorkerClosed,
    #[error("Worker dropped reply channel")]
    WorkerDropped,
}

/// Terminal failure of one process instance.
///
/// Cloneable on purpose: the outcome of an instance is broadcast by value to
/// every attached caller, including a parent process awaiting a child. A child
/// failure is a value the parent inspects, never an exception that escapes the
/// orchestration boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProcessFailure {
    /// The state machine returned a fatal (non-retryable, or retry-exhausted)
    /// domain error.
    #[error("{process} failed: {message}")]
    Failed {
        process: &'static str,
        message: String,
    },

    /// The instance exceeded its absolute start-to-close deadline.
    #[error("{process} exceeded its start-to-close deadline of {after:?}")]
    TimedOut {
        process: &'static str,
        after: Duration,
    },

    /// Transient scheduling failures exhausted the process retry policy.
    #[error("{process} exhausted {attempts} scheduling attempts: {last}")]
    RetriesExhausted {
        process: &'static str,
        attempts: u32,
        last: String,
    },

    /// The worker shut down before the instance produced a result.
    #[error("worker shut down before the process completed")]
    WorkerLost,
}

/// Failure of an activity invocation after the activity executor has applied
/// the configured retry policy.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ActivityFailure {
    /// No activity execution slot became free within the schedule-to-start
    /// deadline.
    #[error("activity {activity} not scheduled within {after:?}")]
    ScheduleTimedOut { activity: String, after: Duration },

    /// Every attempt failed or timed out; `last` carries the final error text.
    #[error("activity {activity} exhausted {attempts} attempts: {last}")]
    RetriesExhausted {
        activity: String,
        attempts: u32,
        last: String,
    },

    /// The worker stopped while the activity was waiting for a slot.
    #[error("worker stopped while activity {activity} was pending")]
    WorkerStopped { activity: String },
}
