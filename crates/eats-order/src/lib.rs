//! # Eats Order Sample
//!
//! End-to-end orchestration of a food-delivery order on top of the
//! [`process_engine`] substrate.
//!
//! ## Core Components
//!
//! - **[model]**: Payload value objects ([`Order`](model::Order),
//!   [`OrderRequest`](model::OrderRequest),
//!   [`RestaurantDecision`](model::RestaurantDecision)) crossing the substrate
//!   boundary.
//! - **[order_process]**: The top-level state machine - validate, record
//!   intake, race the restaurant's decision against a timeout, then reject or
//!   hand off to delivery.
//! - **[delivery_process]**: The child state machine simulating the physical
//!   delivery - transit delay, notification, confirmation.
//! - **[activities]**: The [`EatsActivities`](activities::EatsActivities)
//!   gateway the processes call for side effects, plus the console
//!   implementation.
//! - **[policies]**: Named timeout/retry tuples for every process and activity
//!   invocation.
//! - **[clients]**: Typed wrappers ([`OrderClient`](clients::OrderClient))
//!   hiding the process-id derivation and message plumbing.
//! - **[lifecycle]**: The [`EatsSystem`](lifecycle::EatsSystem) orchestrator
//!   wiring both workers together.

pub mod activities;
pub mod clients;
pub mod delivery_process;
pub mod lifecycle;
pub mod model;
pub mod order_process;
pub mod policies;
