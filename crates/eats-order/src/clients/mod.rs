//! Typed client wrappers hiding process-id derivation and message plumbing.

mod order_client;

pub use order_client::OrderClient;
