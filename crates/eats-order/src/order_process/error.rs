//! Error types for the order-handling process.

use process_engine::ActivityFailure;
use thiserror::Error;

/// Fatal failures of one order-handling instance.
///
/// Every variant is deterministic or already retry-exhausted, so the process
/// never marks any of them retryable: validation faults and an absent external
/// decision would fail identically on re-execution, and activity failures only
/// reach this type after the activity executor has applied its own policy.
/// Child delivery failures never appear here - they are absorbed into a
/// returned status string.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Caller-input fault, raised before any side effect occurs.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No restaurant decision arrived within the decision wait.
    #[error("timeout waiting for restaurant decision")]
    DecisionTimeout,

    /// An activity exhausted its retry policy.
    #[error(transparent)]
    Activity(#[from] ActivityFailure),

    /// The delivery worker was unreachable when spawning the child.
    #[error("delivery worker unavailable")]
    DeliveryUnavailable,
}
