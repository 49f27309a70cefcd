//! # Generic Process Worker
//!
//! This module defines the `ProcessEngine`, the server half of the substrate.
//! It owns the instance table and the receiver end of the request channel, and
//! processes start/signal requests sequentially in its own Tokio task.
//!
//! **Concurrency Model**:
//! The worker loop itself handles one request at a time, so the instance table
//! needs no locking. Each started instance then runs in its *own* task as a
//! single logical thread; the loop stays free to route signals and start
//! requests while instances are suspended. A semaphore sized by
//! [`WorkerOptions::max_concurrent_processes`] caps how many instances execute
//! at once.
//!
//! **De-duplication**:
//! The instance table is keyed by the deterministic process-id. A start request
//! for an id that already exists - still running or already completed - attaches
//! the caller to the existing instance's completion instead of spawning a
//! duplicate. This is what guarantees at most one delivery per order id.
//!
//! **Scheduling policy**:
//! Each instance is bounded by its `start_to_close` deadline. Obtaining an
//! execution slot is one scheduling step bounded by `task_timeout`; a miss is a
//! transient scheduling failure retried with capped backoff per the process
//! [`RetryPolicy`](crate::RetryPolicy). Domain errors the process marks
//! retryable go through the same policy; everything else is fatal on first
//! occurrence.

use crate::client::{Completion, ProcessClient};
use crate::context::ProcessContext;
use crate::error::ProcessFailure;
use crate::message::{EngineRequest, Outcome};
use crate::policy::WorkerOptions;
use crate::process::{Process, ProcessId};
use crate::signal::SignalSlot;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, watch, Semaphore};
use tokio::time::{sleep, timeout, Instant};
use tracing::{debug, info, warn};

struct Instance<P: Process> {
    slot: SignalSlot<P::Signal>,
    completion: Completion<P>,
}

/// The worker loop running all instances of one process type.
pub struct ProcessEngine<P: Process> {
    receiver: mpsc::Receiver<EngineRequest<P>>,
    instances: HashMap<ProcessId, Instance<P>>,
    options: WorkerOptions,
    process_slots: Arc<Semaphore>,
    activity_slots: Arc<Semaphore>,
}

impl<P: Process> ProcessEngine<P> {
    /// Creates a worker and its associated client.
    ///
    /// The worker must be driven by calling [`run`](ProcessEngine::run); the
    /// client can be cloned and shared to start instances and deliver signals.
    pub fn new(options: WorkerOptions) -> (Self, ProcessClient<P>) {
        let (sender, receiver) = mpsc::channel(options.buffer);
        let engine = Self {
            receiver,
            instances: HashMap::new(),
            process_slots: Arc::new(Semaphore::new(options.max_concurrent_processes)),
            activity_slots: Arc::new(Semaphore::new(options.max_concurrent_activities)),
            options,
        };
        let client = ProcessClient::new(sender);
        (engine, client)
    }

    /// Runs the worker loop until every client is dropped.
    ///
    /// # Context Injection
    /// `context` is handed to every instance started by this worker. Passing
    /// dependencies here instead of at construction time lets a parent worker
    /// receive the client of a child worker created alongside it.
    pub async fn run(mut self, context: P::Context) {
        let queue = self.options.queue.clone();
        info!(process = P::NAME, queue = %queue, "Worker started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                EngineRequest::Start { input, respond_to } => {
                    let id = P::process_id(&input);
                    if let Some(instance) = self.instances.get(&id) {
                        debug!(process = P::NAME, %id, "Instance exists, attaching caller");
                        let _ = respond_to.send(instance.completion.clone());
                        continue;
                    }

                    debug!(process = P::NAME, %id, ?input, "Start");
                    let slot = SignalSlot::new();
                    let (publish, subscribe) = watch::channel(None);
                    let completion = Completion::new(subscribe);
                    let ctx = ProcessContext::new(
                        id.clone(),
                        context.clone(),
                        slot.clone(),
                        Arc::clone(&self.activity_slots),
                    );
                    let process_slots = Arc::clone(&self.process_slots);
                    let instance_id = id.clone();

                    tokio::spawn(async move {
                        let outcome = run_instance::<P>(&ctx, input, process_slots).await;
                        match &outcome {
                            Ok(output) => {
                                info!(process = P::NAME, id = %instance_id, ?output, "Instance completed")
                            }
                            Err(failure) => {
                                warn!(process = P::NAME, id = %instance_id, error = %failure, "Instance failed")
                            }
                        }
                        let _ = publish.send(Some(outcome));
                    });

                    self.instances.insert(
                        id,
                        Instance {
                            slot,
                            completion: completion.clone(),
                        },
                    );
                    let _ = respond_to.send(completion);
                }
                EngineRequest::Signal { id, signal } => match self.instances.get(&id) {
                    Some(instance) => {
                        debug!(process = P::NAME, %id, ?signal, "Signal");
                        if !instance.slot.resolve(signal) {
                            warn!(
                                process = P::NAME,
                                %id,
                                "Signal already recorded for this instance, ignoring duplicate"
                            );
                        }
                    }
                    None => {
                        warn!(process = P::NAME, %id, "No such instance, dropping signal")
                    }
                },
            }
        }

        info!(
            process = P::NAME,
            queue = %queue,
            instances = self.instances.len(),
            "Worker shutdown"
        );
    }
}

/// Drives one instance to a terminal outcome under the process options.
async fn run_instance<P: Process>(
    ctx: &ProcessContext<P>,
    input: P::Input,
    process_slots: Arc<Semaphore>,
) -> Outcome<P> {
    let options = P::options();
    let deadline = Instant::now() + options.start_to_close;
    let mut backoff = options.retry.initial_backoff;
    let mut attempt: u32 = 1;

    loop {
        // One scheduling step: obtain an execution slot within the task
        // timeout. A miss is transient and goes through the retry policy.
        let permit = match timeout(
            options.task_timeout,
            Arc::clone(&process_slots).acquire_owned(),
        )
        .await
        {
            Ok(Ok(permit)) => permit,
            Ok(Err(_)) => return Err(ProcessFailure::WorkerLost),
            Err(_) => {
                if attempt < options.retry.max_attempts {
                    warn!(
                        process = P::NAME,
                        id = %ctx.id(),
                        attempt,
                        "No execution slot within task timeout, backing off"
                    );
                    sleep(backoff).await;
                    backoff = options.retry.next_backoff(backoff);
                    attempt += 1;
                    continue;
                }
                return Err(ProcessFailure::RetriesExhausted {
                    process: P::NAME,
                    attempts: attempt,
                    last: "no execution slot within task timeout".to_string(),
                });
            }
        };

        let remaining = deadline.saturating_duration_since(Instant::now());
        let result = timeout(remaining, P::execute(ctx, input.clone())).await;
        drop(permit);

        match result {
            Ok(Ok(output)) => return Ok(output),
            Ok(Err(error)) if P::retryable(&error) && attempt < options.retry.max_attempts => {
                warn!(
                    process = P::NAME,
                    id = %ctx.id(),
                    attempt,
                    error = %error,
                    "Retryable failure, backing off"
                );
                sleep(backoff).await;
                backoff = options.retry.next_backoff(backoff);
                attempt += 1;
            }
            Ok(Err(error)) => {
                return Err(ProcessFailure::Failed {
                    process: P::NAME,
                    message: error.to_string(),
                })
            }
            Err(_) => {
                return Err(ProcessFailure::TimedOut {
                    process: P::NAME,
                    after: options.start_to_close,
                })
            }
        }
    }
}
