//! # Timeout & Retry Policies
//!
//! Named configuration structs for process scheduling, activity execution, and
//! worker capacity. Policies are passed explicitly into each engine/process/
//! activity invocation rather than living as ambient globals, which keeps the
//! state machines testable in isolation.

use std::time::Duration;

/// Bounded, capped exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Backoff before the first retry.
    pub initial_backoff: Duration,
    /// Ceiling for the doubled backoff.
    pub max_backoff: Duration,
    /// Total attempts, including the first one.
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// The backoff to use after sleeping `current`: doubled, capped at
    /// `max_backoff`.
    pub fn next_backoff(&self, current: Duration) -> Duration {
        (current * 2).min(self.max_backoff)
    }
}

/// Scheduling policy for one process type.
#[derive(Debug, Clone, Copy)]
pub struct ProcessOptions {
    /// Absolute existence bound for one instance, measured from its spawn.
    pub start_to_close: Duration,
    /// Deadline for one scheduling step: how long an instance may wait for a
    /// process-execution slot. A miss is a transient scheduling failure
    /// covered by `retry`.
    pub task_timeout: Duration,
    /// Process-level retry policy, applied to transient scheduling failures
    /// and to errors the process marks retryable. Independent from the retry
    /// policy of individual activity invocations.
    pub retry: RetryPolicy,
}

/// Execution policy for activity invocations made through
/// [`ProcessContext::run_activity`](crate::ProcessContext::run_activity).
#[derive(Debug, Clone, Copy)]
pub struct ActivityOptions {
    /// Overall deadline across all attempts.
    pub schedule_to_close: Duration,
    /// Deadline for a single attempt.
    pub start_to_close: Duration,
    /// How long one attempt may wait for an activity execution slot.
    pub schedule_to_start: Duration,
    /// Per-invocation retry policy.
    pub retry: RetryPolicy,
}

/// Capacity and identity of one worker loop.
#[derive(Debug, Clone)]
pub struct WorkerOptions {
    /// Logical work queue this worker serves. Parent and child processes run
    /// on distinct queues so an awaiting parent never starves its child.
    pub queue: String,
    /// Capacity of the request channel between clients and the worker.
    pub buffer: usize,
    /// Ceiling on concurrently executing process instances.
    pub max_concurrent_processes: usize,
    /// Ceiling on concurrently executing activity attempts.
    pub max_concurrent_activities: usize,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            queue: "default".to_string(),
            buffer: 32,
            max_concurrent_processes: 10,
            max_concurrent_activities: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backoff_doubles_until_capped() {
        let policy = RetryPolicy {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(3),
            max_attempts: 5,
        };

        let first = policy.initial_backoff;
        let second = policy.next_backoff(first);
        let third = policy.next_backoff(second);

        assert_eq!(second, Duration::from_secs(2));
        assert_eq!(third, Duration::from_secs(3));
        assert_eq!(policy.next_backoff(third), Duration::from_secs(3));
    }
}
