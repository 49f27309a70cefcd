//! # Process Trait
//!
//! The `Process` trait defines the contract a durable state machine must
//! implement to be run by the generic [`ProcessEngine`](crate::ProcessEngine).
//! It specifies associated types for inputs, signals, outputs, context, and
//! errors, plus the policy and identity derivation the engine needs.
//!
//! # Architecture Note
//! By defining a contract (`Process`) that every workflow type must satisfy, the
//! engine logic (instance table, signal routing, deadline and retry enforcement)
//! is written *once* and reused for every state machine. Associated types keep
//! this type-safe: you cannot signal an order process with a delivery payload.
//!
//! # Determinism
//! `execute` must confine all non-determinism to the suspension points offered
//! by [`ProcessContext`](crate::ProcessContext) (timers, signal waits, activity
//! invocations, child awaits). Everything between suspension points is plain
//! sequential code operating on values the instance owns exclusively.

use crate::context::ProcessContext;
use crate::policy::ProcessOptions;
use async_trait::async_trait;
use std::fmt::{Debug, Display};

/// Identifier of one durable process instance.
///
/// Derived deterministically from the input (see [`Process::process_id`]), which
/// is what guarantees at-most-one instance per business key: starting a second
/// instance with the same id attaches to the existing one instead of spawning a
/// duplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProcessId(String);

impl ProcessId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProcessId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProcessId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ProcessId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Contract for a durable process state machine run by the engine.
///
/// # Async & Context
/// The trait is `#[async_trait]` because `execute` suspends at timers, signal
/// waits, and activity calls. The `Context` associated type carries the
/// dependencies the state machine needs (activity gateways, child process
/// clients); it is injected into the worker via
/// [`ProcessEngine::run`](crate::ProcessEngine::run), not at construction time.
#[async_trait]
pub trait Process: Sized + Send + Sync + 'static {
    /// Input handed to the instance by value. Must be `Clone` so the engine can
    /// re-run `execute` when the process-level retry policy applies.
    type Input: Clone + Send + Sync + Debug + 'static;

    /// External decision payload delivered to a running instance. At most one
    /// signal is ever honored per instance; use `()` for signal-free processes.
    type Signal: Clone + Send + Sync + Debug + 'static;

    /// Terminal result returned by value to every attached caller.
    type Output: Clone + Send + Sync + Debug + 'static;

    /// Dependencies injected into every instance of this worker.
    /// Use `()` if the process needs none.
    type Context: Clone + Send + Sync + 'static;

    /// The error type for this process.
    ///
    /// # Design Note: Error Granularity
    /// One error enum covers the whole state machine rather than one per
    /// transition. Callers deal with a single type, and the engine only needs
    /// [`retryable`](Process::retryable) to tell transient faults from fatal
    /// ones.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Short name used in logs and failure reports.
    const NAME: &'static str;

    /// Derive the instance id from the input. Must be deterministic: the same
    /// input always maps to the same id.
    fn process_id(input: &Self::Input) -> ProcessId;

    /// Scheduling policy for instances of this process: start-to-close
    /// deadline, per-step task timeout, and the process-level retry policy.
    fn options() -> ProcessOptions;

    /// Whether a failure is transient and worth re-running `execute` for.
    ///
    /// Defaults to `false`: deterministic failures (input validation, an absent
    /// external decision) never benefit from a retry. Scheduling failures are
    /// classified by the engine itself and do not pass through here.
    fn retryable(_error: &Self::Error) -> bool {
        false
    }

    /// The state machine body. Runs as a single logical thread; all suspension
    /// happens through `ctx`.
    async fn execute(
        ctx: &ProcessContext<Self>,
        input: Self::Input,
    ) -> Result<Self::Output, Self::Error>;
}
