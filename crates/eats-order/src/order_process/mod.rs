//! # Order-Handling Process
//!
//! The top-level state machine coordinating one food-delivery order:
//!
//! ```text
//! VALIDATING -> AWAITING_DECISION -> {REJECTED, DELIVERING} -> COMPLETED
//! ```
//!
//! plus a terminal `FAILED` for validation errors, decision timeouts, and
//! activity retry exhaustion, all of which surface to the caller as failed
//! instances.
//!
//! ## The decision race
//!
//! After recording intake, the instance suspends for up to
//! [`DECISION_WAIT`](crate::policies::DECISION_WAIT), racing the restaurant's
//! [`RestaurantDecision`] signal against the timer. Whichever occurs first ends
//! the wait; a timeout is fatal and never retried, since retrying a stale
//! external decision makes no sense. Only the first signal per instance has
//! effect - duplicates are logged and ignored by the engine's signal slot.
//!
//! ## Child composition
//!
//! On acceptance the instance starts a [`DeliveryProcess`] child with id
//! `deliver-order-{order.id}` on the delivery queue and awaits its completion
//! without blocking the worker. Child success yields the literal door
//! confirmation (the child's own status string is logged, not propagated).
//! Child failure is deliberately *absorbed*: the business process defines "we
//! attempted delivery and it failed" as a valid completed outcome, so the
//! instance records a failure notice and returns a failure status string
//! instead of raising.

pub mod error;

pub use error::OrderError;

use crate::activities::SharedActivities;
use crate::delivery_process::{DeliveryProcess, DeliveryRequest};
use crate::model::{OrderRequest, RestaurantDecision};
use crate::policies;
use async_trait::async_trait;
use process_engine::{
    Process, ProcessClient, ProcessContext, ProcessEngine, ProcessId, ProcessOptions, WorkerOptions,
};
use tracing::{info, warn};

/// Logical states of one order-handling instance, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderState {
    Validating,
    AwaitingDecision,
    Rejected,
    Delivering,
    Completed,
    Failed,
}

/// Dependencies injected into the order worker: the activity gateway and the
/// client of the delivery worker.
#[derive(Clone)]
pub struct OrderDeps {
    pub activities: SharedActivities,
    pub delivery: ProcessClient<DeliveryProcess>,
}

/// The order-handling state machine.
pub struct OrderProcess;

/// Derives the order-handling instance id for an order.
pub fn order_process_id(order_id: &str) -> ProcessId {
    ProcessId::new(format!("handle-order-{order_id}"))
}

/// Creates the order worker and its generic client.
pub fn worker(options: WorkerOptions) -> (ProcessEngine<OrderProcess>, ProcessClient<OrderProcess>) {
    ProcessEngine::new(options)
}

fn enter(ctx: &ProcessContext<OrderProcess>, state: OrderState) {
    info!(id = %ctx.id(), state = ?state, "Order state");
}

/// Fails fast on malformed input, before any side effect occurs.
fn validate(request: &OrderRequest) -> Result<(), OrderError> {
    if request.user_id.trim().is_empty() {
        return Err(OrderError::Validation("User ID cannot be empty".into()));
    }
    if request.order.id.trim().is_empty() {
        return Err(OrderError::Validation("Order ID cannot be empty".into()));
    }
    if request.restaurant_id.trim().is_empty() {
        return Err(OrderError::Validation(
            "Restaurant ID cannot be empty".into(),
        ));
    }
    Ok(())
}

#[async_trait]
impl Process for OrderProcess {
    type Input = OrderRequest;
    type Signal = RestaurantDecision;
    type Output = String;
    type Context = OrderDeps;
    type Error = OrderError;

    const NAME: &'static str = "handle-eats-order";

    fn process_id(input: &OrderRequest) -> ProcessId {
        order_process_id(&input.order.id)
    }

    fn options() -> ProcessOptions {
        policies::order_process_options()
    }

    async fn execute(ctx: &ProcessContext<Self>, input: OrderRequest) -> Result<String, OrderError> {
        let deps = ctx.deps().clone();
        let options = policies::order_activity_options();

        enter(ctx, OrderState::Validating);
        if let Err(error) = validate(&input) {
            enter(ctx, OrderState::Failed);
            return Err(error);
        }
        let order = input.order;

        let received = format!("Your order received! {}", order.summary());
        ctx.run_activity("record_order_update", &options, || {
            let activities = deps.activities.clone();
            let received = received.clone();
            async move { activities.record_order_update(&received).await }
        })
        .await?;

        enter(ctx, OrderState::AwaitingDecision);
        let Some(decision) = ctx.wait_signal(policies::DECISION_WAIT).await else {
            enter(ctx, OrderState::Failed);
            return Err(OrderError::DecisionTimeout);
        };
        info!(id = %ctx.id(), accepted = decision.accepted, "Restaurant decision received");

        if !decision.accepted {
            enter(ctx, OrderState::Rejected);
            let notice = format!(
                "Order {} was rejected by the restaurant\nItems: {:?}",
                order.id, order.content
            );
            ctx.run_activity("record_order_update", &options, || {
                let activities = deps.activities.clone();
                let notice = notice.clone();
                async move { activities.record_order_update(&notice).await }
            })
            .await?;
            return Ok(format!("Order {} was rejected by the restaurant", order.id));
        }

        // Hand-off/preparation latency before the courier picks up.
        ctx.sleep(policies::HANDOFF_DELAY).await;

        enter(ctx, OrderState::Delivering);
        let delivery = deps
            .delivery
            .start(DeliveryRequest {
                order_id: order.id.clone(),
            })
            .await
            .map_err(|_| OrderError::DeliveryUnavailable)?;

        match delivery.wait().await {
            Ok(result) => {
                enter(ctx, OrderState::Completed);
                info!(id = %ctx.id(), result = %result, "Delivery completed");
                Ok("Your order is in front of your door!".to_string())
            }
            Err(failure) => {
                // Absorbed on purpose: an attempted-and-failed delivery is a
                // complete, reportable outcome, not a process fault.
                enter(ctx, OrderState::Completed);
                warn!(id = %ctx.id(), error = %failure, "Delivery failed");
                let notice = format!(
                    "Order {} delivery failed: {}\nItems: {:?}",
                    order.id, failure, order.content
                );
                ctx.run_activity("record_order_update", &options, || {
                    let activities = deps.activities.clone();
                    let notice = notice.clone();
                    async move { activities.record_order_update(&notice).await }
                })
                .await?;
                Ok(format!("Order {} delivery failed: {}", order.id, failure))
            }
        }
    }
}
