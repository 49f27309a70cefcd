//! # Process Engine
//!
//! This crate provides the execution substrate for durable, long-lived business
//! processes: a generic worker loop that runs process state machines as isolated
//! Tokio tasks, delivers external signals to them, enforces their timeout and
//! retry policies, and composes parent/child processes by process-id.
//!
//! ## Architecture Overview
//!
//! The crate separates concerns into three layers:
//!
//! 1. **Process Layer** ([`Process`]) - Your state machine and domain types
//! 2. **Runtime Layer** ([`ProcessEngine`]) - Instance scheduling, signal routing,
//!    deadline and retry enforcement
//! 3. **Interface Layer** ([`ProcessClient`]) - Type-safe communication with a
//!    running worker
//!
//! You write the state machine **once** against the [`Process`] trait, and the
//! engine handles instance de-duplication, suspension points, and failure policy.
//!
//! ## Concurrency Model
//!
//! - Each process instance runs in its own Tokio task as a single logical thread:
//!   no two pieces of logic inside one instance ever run concurrently.
//! - All apparent concurrency (racing a signal against a timeout, awaiting a
//!   child process) is expressed as explicit suspension points on the
//!   [`ProcessContext`], with event- or timer-driven wakeups. Nothing polls.
//! - Instances of different ids run fully independently; a per-worker
//!   [`tokio::sync::Semaphore`] caps concurrent process and activity executions
//!   (see [`WorkerOptions`]).
//!
//! ## Signals
//!
//! A signal is delivered to a specific instance by process-id and recorded in a
//! single-assignment [`SignalSlot`]. Only the first signal has effect; later
//! signals are logged and ignored. A signal recorded *before* the instance
//! reaches its wait is still observed - the wait condition is evaluated against
//! recorded state, not only against future events.
//!
//! ## Parent/Child Composition
//!
//! A parent process holds the child worker's [`ProcessClient`] in its context,
//! starts the child by value, and awaits the returned [`Completion`]. Child
//! failures come back as `Err(ProcessFailure)` values - they never escape the
//! orchestration boundary as panics or unhandled errors.
//!
//! ## Usage Pattern
//!
//! 1. **Create**: Call `ProcessEngine::new(options)` to get the engine (worker)
//!    and its client.
//! 2. **Wire**: Pass dependencies (activity gateways, child clients) into
//!    `engine.run(context)`.
//! 3. **Run**: Spawn the worker loop in a background task.
//!
//! ```rust
//! use process_engine::{
//!     Process, ProcessContext, ProcessEngine, ProcessId, ProcessOptions, RetryPolicy,
//!     WorkerOptions,
//! };
//! use async_trait::async_trait;
//! use std::time::Duration;
//!
//! struct Greeter;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("greeting failed")]
//! struct GreetError;
//!
//! #[async_trait]
//! impl Process for Greeter {
//!     type Input = String;
//!     type Signal = ();
//!     type Output = String;
//!     type Context = ();
//!     type Error = GreetError;
//!
//!     const NAME: &'static str = "greeter";
//!
//!     fn process_id(input: &String) -> ProcessId {
//!         ProcessId::new(format!("greet-{input}"))
//!     }
//!
//!     fn options() -> ProcessOptions {
//!         ProcessOptions {
//!             start_to_close: Duration::from_secs(60),
//!             task_timeout: Duration::from_secs(10),
//!             retry: RetryPolicy {
//!                 initial_backoff: Duration::from_secs(1),
//!                 max_backoff: Duration::from_secs(3),
//!                 max_attempts: 2,
//!             },
//!         }
//!     }
//!
//!     async fn execute(_ctx: &ProcessContext<Self>, input: String) -> Result<String, GreetError> {
//!         Ok(format!("Hello, {input}!"))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (engine, client) = ProcessEngine::<Greeter>::new(WorkerOptions::default());
//!     tokio::spawn(engine.run(()));
//!
//!     let greeting = client.run("world".to_string()).await.unwrap();
//!     assert_eq!(greeting, "Hello, world!");
//! }
//! ```

pub mod client;
pub mod context;
pub mod engine;
pub mod error;
pub mod message;
pub mod policy;
pub mod process;
pub mod signal;
pub mod tracing;

// Re-export core types for convenience
pub use client::{Completion, ProcessClient};
pub use context::ProcessContext;
pub use engine::ProcessEngine;
pub use error::{ActivityFailure, EngineError, ProcessFailure};
pub use message::{EngineRequest, Outcome};
pub use policy::{ActivityOptions, ProcessOptions, RetryPolicy, WorkerOptions};
pub use process::{Process, ProcessId};
pub use signal::SignalSlot;
