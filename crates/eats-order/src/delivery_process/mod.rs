//! # Delivery Process
//!
//! The short-lived child state machine simulating the physical delivery of an
//! accepted order:
//!
//! ```text
//! STARTED -> DELAYING -> NOTIFYING -> CONFIRMING -> COMPLETED
//! ```
//!
//! The instance id is derived as `deliver-order-{order_id}`, which guarantees
//! at most one delivery per order id - a second start request for the same
//! order attaches to the existing instance instead of spawning another
//! delivery. Activity retry exhaustion fails the whole instance; the parent
//! decides what that means (see [`crate::order_process`]).

pub mod error;

pub use error::DeliveryError;

use crate::activities::SharedActivities;
use crate::policies;
use async_trait::async_trait;
use process_engine::{
    Process, ProcessClient, ProcessContext, ProcessEngine, ProcessId, ProcessOptions, WorkerOptions,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Logical states of one delivery instance, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryState {
    Started,
    Delaying,
    Notifying,
    Confirming,
    Completed,
}

/// Input of the delivery process: the order to deliver, passed by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryRequest {
    pub order_id: String,
}

/// Dependencies injected into the delivery worker.
#[derive(Clone)]
pub struct DeliveryDeps {
    pub activities: SharedActivities,
}

/// The delivery state machine.
pub struct DeliveryProcess;

/// Derives the delivery instance id for an order.
pub fn delivery_process_id(order_id: &str) -> ProcessId {
    ProcessId::new(format!("deliver-order-{order_id}"))
}

/// Creates the delivery worker and its client.
pub fn worker(
    options: WorkerOptions,
) -> (ProcessEngine<DeliveryProcess>, ProcessClient<DeliveryProcess>) {
    ProcessEngine::new(options)
}

fn enter(ctx: &ProcessContext<DeliveryProcess>, state: DeliveryState) {
    info!(id = %ctx.id(), state = ?state, "Delivery state");
}

#[async_trait]
impl Process for DeliveryProcess {
    type Input = DeliveryRequest;
    type Signal = ();
    type Output = String;
    type Context = DeliveryDeps;
    type Error = DeliveryError;

    const NAME: &'static str = "deliver-order";

    fn process_id(input: &DeliveryRequest) -> ProcessId {
        delivery_process_id(&input.order_id)
    }

    fn options() -> ProcessOptions {
        policies::delivery_process_options()
    }

    async fn execute(
        ctx: &ProcessContext<Self>,
        input: DeliveryRequest,
    ) -> Result<String, DeliveryError> {
        let order_id = input.order_id;
        let activities = ctx.deps().activities.clone();
        let options = policies::delivery_activity_options();
        enter(ctx, DeliveryState::Started);

        enter(ctx, DeliveryState::Delaying);
        ctx.sleep(policies::TRANSIT_DELAY).await;

        enter(ctx, DeliveryState::Notifying);
        ctx.run_activity("notify_delivered", &options, || {
            let activities = activities.clone();
            let order_id = order_id.clone();
            async move { activities.notify_delivered(&order_id).await }
        })
        .await?;

        enter(ctx, DeliveryState::Confirming);
        ctx.run_activity("print_confirmation", &options, || {
            let activities = activities.clone();
            let order_id = order_id.clone();
            async move { activities.print_confirmation(&order_id).await }
        })
        .await?;

        enter(ctx, DeliveryState::Completed);
        Ok(format!("Order {order_id} delivered!"))
    }
}
