//! # Order Model
//!
//! The order and its surrounding request/signal payloads. These are plain
//! value objects: constructed by the caller, handed to a process by value, and
//! immutable for the lifetime of that process. They round-trip through the
//! substrate's payload boundary via serde; unknown fields on deserialization
//! are ignored rather than rejected.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A customer's order: a unique id plus the ordered item descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    #[serde(default)]
    pub content: Vec<String>,
}

impl Order {
    pub fn new(id: impl Into<String>, content: Vec<String>) -> Self {
        Self {
            id: id.into(),
            content,
        }
    }

    /// Human-readable summary of the order contents, used in intake notices.
    pub fn summary(&self) -> String {
        self.content.join(", ")
    }
}

impl Display for Order {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Order{{id='{}', content={:?}}}", self.id, self.content)
    }
}

/// Input of the order-handling process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user_id: String,
    pub order: Order,
    pub restaurant_id: String,
}

/// The restaurant's accept/reject decision, delivered as a signal to a running
/// order-handling instance. Only the first decision per instance has effect.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RestaurantDecision {
    pub accepted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_round_trips_through_the_payload_boundary() {
        let order = Order::new("42", vec!["Pad Thai".to_string(), "Spring Rolls".to_string()]);
        let bytes = serde_json::to_vec(&order).unwrap();
        let back: Order = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, order);
    }

    #[test]
    fn unknown_fields_are_ignored_on_deserialization() {
        let raw = r#"{"id":"7","content":["Ramen"],"coupon":"WELCOME10"}"#;
        let order: Order = serde_json::from_str(raw).unwrap();
        assert_eq!(order.id, "7");
        assert_eq!(order.content, vec!["Ramen".to_string()]);
    }

    #[test]
    fn missing_content_defaults_to_empty() {
        let order: Order = serde_json::from_str(r#"{"id":"9"}"#).unwrap();
        assert!(order.content.is_empty());
    }
}
