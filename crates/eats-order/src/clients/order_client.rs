//! # Order Client
//!
//! High-level API for the order-handling worker. It wraps a
//! `ProcessClient<OrderProcess>` and exposes the two entry points of the
//! business process: starting an order and delivering the restaurant's
//! decision.

use crate::model::{OrderRequest, RestaurantDecision};
use crate::order_process::{order_process_id, OrderProcess};
use process_engine::{Completion, EngineError, Outcome, ProcessClient};
use tracing::{debug, instrument};

/// Client for the order-handling worker.
#[derive(Clone)]
pub struct OrderClient {
    inner: ProcessClient<OrderProcess>,
}

impl OrderClient {
    pub fn new(inner: ProcessClient<OrderProcess>) -> Self {
        Self { inner }
    }

    /// Starts handling an order (or attaches to the instance already handling
    /// it) without waiting for the outcome.
    #[instrument(skip(self, request), fields(order_id = %request.order.id))]
    pub async fn start_order(
        &self,
        request: OrderRequest,
    ) -> Result<Completion<OrderProcess>, EngineError> {
        debug!("Sending start to order worker");
        self.inner.start(request).await
    }

    /// Starts handling an order and waits for its terminal status string.
    pub async fn handle_order(&self, request: OrderRequest) -> Outcome<OrderProcess> {
        self.inner.run(request).await
    }

    /// Delivers the restaurant's accept/reject decision for an order.
    ///
    /// Fire-and-forget: a decision for an order that already has one recorded
    /// is logged and ignored by the worker, never an error.
    #[instrument(skip(self))]
    pub async fn signal_restaurant_decision(
        &self,
        order_id: &str,
        accepted: bool,
    ) -> Result<(), EngineError> {
        debug!("Sending restaurant decision");
        self.inner
            .signal(order_process_id(order_id), RestaurantDecision { accepted })
            .await
    }
}
