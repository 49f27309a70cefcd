//! # System Lifecycle & Orchestration
//!
//! This module manages the runtime lifecycle of the two-worker system: the
//! order-handling worker and the delivery worker, each serving its own logical
//! work queue.
//!
//! ## Wiring
//!
//! The delivery worker is created first and has no dependencies beyond the
//! activity gateway. The order worker then receives the delivery worker's
//! *client* in its context - late binding, so the parent can spawn and await
//! child instances without any circular reference at construction time.
//!
//! ## Graceful Shutdown
//!
//! 1. Drop the system's clients - closes the sender side of the order worker's
//!    channel.
//! 2. The order worker drains its loop and exits, dropping its context and
//!    with it the last clone of the delivery client.
//! 3. The delivery worker detects the closed channel and exits in turn.
//! 4. `shutdown()` awaits both worker tasks.
//!
//! The dependency graph is acyclic, so channel closure alone produces a
//! deterministic shutdown order.

use crate::activities::SharedActivities;
use crate::clients::OrderClient;
use crate::delivery_process::{self, DeliveryDeps, DeliveryProcess};
use crate::order_process::{self, OrderDeps};
use crate::policies;
use process_engine::{ProcessClient, WorkerOptions};
use std::env;
use tracing::{debug, error, info};

/// Worker configuration, resolvable from the environment.
#[derive(Debug, Clone)]
pub struct WorkerSettings {
    pub order: WorkerOptions,
    pub delivery: WorkerOptions,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            order: policies::order_worker_options(),
            delivery: policies::delivery_worker_options(),
        }
    }
}

impl WorkerSettings {
    /// Reads overrides from the environment, falling back silently to the
    /// defaults when a variable is unset or malformed.
    ///
    /// - `EATS_ORDER_QUEUE` / `EATS_DELIVERY_QUEUE`: queue names
    /// - `EATS_MAX_CONCURRENT`: ceiling for concurrent process and activity
    ///   executions on both workers
    pub fn from_env() -> Self {
        let mut settings = Self::default();
        if let Ok(queue) = env::var("EATS_ORDER_QUEUE") {
            if !queue.is_empty() {
                settings.order.queue = queue;
            }
        }
        if let Ok(queue) = env::var("EATS_DELIVERY_QUEUE") {
            if !queue.is_empty() {
                settings.delivery.queue = queue;
            }
        }
        if let Ok(raw) = env::var("EATS_MAX_CONCURRENT") {
            match raw.parse::<usize>() {
                Ok(ceiling) if ceiling > 0 => {
                    for options in [&mut settings.order, &mut settings.delivery] {
                        options.max_concurrent_processes = ceiling;
                        options.max_concurrent_activities = ceiling;
                    }
                }
                _ => debug!(raw = %raw, "Ignoring malformed EATS_MAX_CONCURRENT"),
            }
        }
        settings
    }
}

/// The main runtime orchestrator for the eats order system.
///
/// `EatsSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping both workers
/// - **Dependency Wiring**: Handing the delivery client and the activity
///   gateway to the order worker's context
/// - **Graceful Shutdown**: Coordinating clean termination of both loops
pub struct EatsSystem {
    /// Client for the order-handling worker.
    pub order_client: OrderClient,

    /// Client for the delivery worker. Exposed for direct child access in
    /// tests and tooling; production flow goes through the order process.
    pub delivery_client: ProcessClient<DeliveryProcess>,

    /// Task handles for both running workers (used for graceful shutdown).
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl EatsSystem {
    /// Creates the system with settings resolved from the environment.
    pub fn new(activities: SharedActivities) -> Self {
        Self::with_settings(activities, WorkerSettings::from_env())
    }

    /// Creates the system with explicit worker settings.
    pub fn with_settings(activities: SharedActivities, settings: WorkerSettings) -> Self {
        info!(
            order_queue = %settings.order.queue,
            delivery_queue = %settings.delivery.queue,
            "Starting eats workers"
        );

        // 1. Create both workers (no dependencies yet)
        let (delivery_engine, delivery_client) = delivery_process::worker(settings.delivery);
        let (order_engine, order_inner) = order_process::worker(settings.order);

        // 2. Start workers with injected context
        let delivery_handle = tokio::spawn(delivery_engine.run(DeliveryDeps {
            activities: activities.clone(),
        }));
        let order_handle = tokio::spawn(order_engine.run(OrderDeps {
            activities,
            delivery: delivery_client.clone(),
        }));

        Self {
            order_client: OrderClient::new(order_inner),
            delivery_client,
            handles: vec![order_handle, delivery_handle],
        }
    }

    /// Gracefully shuts down both workers.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down eats system...");

        // Dropping the clients closes the order worker's channel; the delivery
        // worker follows once the order worker releases its context.
        drop(self.order_client);
        drop(self.delivery_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Worker task failed: {e:?}");
                return Err(format!("Worker task failed: {e:?}"));
            }
        }

        info!("Eats system shutdown complete.");
        Ok(())
    }
}
