//! # Process Client
//!
//! This module defines the client half of a worker: a cheaply cloneable handle
//! that starts process instances and delivers signals to them over the worker's
//! request channel, plus the [`Completion`] handle callers await for an
//! instance's terminal outcome.

use crate::error::{EngineError, ProcessFailure};
use crate::message::{EngineRequest, Outcome};
use crate::process::{Process, ProcessId};
use tokio::sync::{mpsc, oneshot, watch};

/// Awaitable handle to one instance's terminal outcome.
///
/// Cloneable by design: every caller that starts (or re-starts) the same
/// process-id gets a `Completion` attached to the *same* instance, and each
/// receives the same outcome by value. Awaiting it suspends the caller without
/// blocking a thread, so a parent process can hold a child's completion while
/// its worker keeps serving other instances.
pub struct Completion<P: Process> {
    rx: watch::Receiver<Option<Outcome<P>>>,
}

impl<P: Process> Clone for Completion<P> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<P: Process> Completion<P> {
    pub(crate) fn new(rx: watch::Receiver<Option<Outcome<P>>>) -> Self {
        Self { rx }
    }

    /// Waits for the instance to reach a terminal state.
    ///
    /// Resolves immediately if the instance already completed. Returns
    /// [`ProcessFailure::WorkerLost`] if the instance task went away without
    /// publishing an outcome.
    pub async fn wait(mut self) -> Outcome<P> {
        loop {
            let settled = self.rx.borrow_and_update().clone();
            if let Some(outcome) = settled {
                return outcome;
            }
            if self.rx.changed().await.is_err() {
                let settled = self.rx.borrow().clone();
                return settled.unwrap_or(Err(ProcessFailure::WorkerLost));
            }
        }
    }
}

/// A type-safe client for one worker loop.
///
/// Holds only the sender half of the worker's request channel, so cloning is
/// inexpensive and clones can be shared across tasks - including into another
/// process's context for parent/child composition.
pub struct ProcessClient<P: Process> {
    sender: mpsc::Sender<EngineRequest<P>>,
}

impl<P: Process> Clone for ProcessClient<P> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<P: Process> ProcessClient<P> {
    pub(crate) fn new(sender: mpsc::Sender<EngineRequest<P>>) -> Self {
        Self { sender }
    }

    /// Starts the instance derived from `input`, or attaches to it when one
    /// with the same process-id already exists.
    pub async fn start(&self, input: P::Input) -> Result<Completion<P>, EngineError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(EngineRequest::Start { input, respond_to })
            .await
            .map_err(|_| EngineError::WorkerClosed)?;
        response.await.map_err(|_| EngineError::WorkerDropped)
    }

    /// Starts (or attaches to) the instance and waits for its outcome.
    pub async fn run(&self, input: P::Input) -> Outcome<P> {
        match self.start(input).await {
            Ok(completion) => completion.wait().await,
            Err(_) => Err(ProcessFailure::WorkerLost),
        }
    }

    /// Delivers a signal to the instance with the given id.
    ///
    /// Fire-and-forget: duplicates and signals to unknown ids are logged and
    /// discarded by the worker. The only error is a closed worker channel.
    pub async fn signal(&self, id: ProcessId, signal: P::Signal) -> Result<(), EngineError> {
        self.sender
            .send(EngineRequest::Signal { id, signal })
            .await
            .map_err(|_| EngineError::WorkerClosed)
    }
}
