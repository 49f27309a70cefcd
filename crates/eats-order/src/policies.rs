//! # Scheduling Policies
//!
//! Named timeout/retry tuples for every process and activity invocation in the
//! sample. Passed explicitly where they apply so the state machines stay
//! testable in isolation; no policy lives as an ambient global.

use process_engine::{ActivityOptions, ProcessOptions, RetryPolicy, WorkerOptions};
use std::time::Duration;

/// How long an order-handling instance waits for the restaurant's decision
/// before failing with a decision timeout.
pub const DECISION_WAIT: Duration = Duration::from_secs(60);

/// Hand-off/preparation latency applied after acceptance, before delivery.
pub const HANDOFF_DELAY: Duration = Duration::from_secs(3);

/// Simulated transit time inside the delivery process.
pub const TRANSIT_DELAY: Duration = Duration::from_secs(4);

/// Work queue served by the order-handling worker.
pub const ORDER_QUEUE: &str = "handle-eats-order";

/// Work queue served by the delivery worker. Logically distinct from the order
/// queue so an awaiting parent never starves its child.
pub const DELIVERY_QUEUE: &str = "deliver-order";

/// Scheduling policy of the order-handling process: 10 minute existence bound,
/// 1 minute per scheduling step, two attempts with 1s-3s backoff.
pub fn order_process_options() -> ProcessOptions {
    ProcessOptions {
        start_to_close: Duration::from_secs(600),
        task_timeout: Duration::from_secs(60),
        retry: RetryPolicy {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(3),
            max_attempts: 2,
        },
    }
}

/// Scheduling policy of the delivery process. Same bounds as the parent, but
/// measured from the child's own spawn time.
pub fn delivery_process_options() -> ProcessOptions {
    ProcessOptions {
        start_to_close: Duration::from_secs(600),
        task_timeout: Duration::from_secs(60),
        retry: RetryPolicy {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(3),
            max_attempts: 2,
        },
    }
}

/// Activity policy used by the order-handling process.
pub fn order_activity_options() -> ActivityOptions {
    ActivityOptions {
        schedule_to_close: Duration::from_secs(60),
        start_to_close: Duration::from_secs(30),
        schedule_to_start: Duration::from_secs(30),
        retry: RetryPolicy {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(10),
            max_attempts: 3,
        },
    }
}

/// Activity policy used by the delivery process.
pub fn delivery_activity_options() -> ActivityOptions {
    ActivityOptions {
        schedule_to_close: Duration::from_secs(120),
        start_to_close: Duration::from_secs(30),
        schedule_to_start: Duration::from_secs(10),
        retry: RetryPolicy {
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(3),
            max_attempts: 2,
        },
    }
}

/// Capacity of the order worker: up to ten concurrent process and activity
/// executions.
pub fn order_worker_options() -> WorkerOptions {
    WorkerOptions {
        queue: ORDER_QUEUE.to_string(),
        ..WorkerOptions::default()
    }
}

/// Capacity of the delivery worker.
pub fn delivery_worker_options() -> WorkerOptions {
    WorkerOptions {
        queue: DELIVERY_QUEUE.to_string(),
        ..WorkerOptions::default()
    }
}
