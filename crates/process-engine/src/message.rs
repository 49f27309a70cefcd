//! # Engine Messages
//!
//! This module defines the message types exchanged between a
//! [`ProcessClient`](crate::ProcessClient) and its
//! [`ProcessEngine`](crate::ProcessEngine) worker loop.
//!
//! The surface is deliberately small. A durable process has exactly two
//! externally driven operations:
//!
//! - **Start**: begin (or attach to) the instance derived from the input's
//!   process-id. The reply is a [`Completion`] handle the caller awaits.
//! - **Signal**: deliver an external decision to a running instance.
//!   Fire-and-forget from the caller's perspective; duplicates and signals to
//!   unknown ids are logged and ignored by the worker, never surfaced as
//!   errors.
//!
//! Everything else about an instance's lifecycle (timers, retries, deadlines,
//! child composition) is driven by the engine itself, not by messages.

use crate::client::Completion;
use crate::error::ProcessFailure;
use crate::process::{Process, ProcessId};
use tokio::sync::oneshot;

/// Terminal result of one process instance, shared by value with every
/// attached caller.
pub type Outcome<P> = Result<<P as Process>::Output, ProcessFailure>;

/// Reply channel for a start request.
pub type StartReply<P> = oneshot::Sender<Completion<P>>;

/// Request sent to a worker loop.
pub enum EngineRequest<P: Process> {
    Start {
        input: P::Input,
        respond_to: StartReply<P>,
    },
    Signal {
        id: ProcessId,
        signal: P::Signal,
    },
}
