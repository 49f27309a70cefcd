//! Payload value objects exchanged with the substrate.

mod order;

pub use order::{Order, OrderRequest, RestaurantDecision};
