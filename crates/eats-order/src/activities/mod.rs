//! # Eats Activities
//!
//! The activity gateway: the three idempotent, side-effect-only operations the
//! processes invoke. The processes consume this interface but never implement
//! it - retries, deadlines, and concurrency caps are applied by the activity
//! executor in the engine, per the options in [`crate::policies`], not by the
//! gateway itself.

use async_trait::async_trait;
use tracing::info;

/// Transient failure of a gateway operation. Retried by the activity executor
/// per the configured policy; exhaustion escalates to the invoking process.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ActivityError {
    #[error("gateway unavailable: {0}")]
    Unavailable(String),
}

/// Side-effecting operations available to the order and delivery processes.
///
/// Each operation takes a string payload, performs its effect, and reports
/// only success or failure. Implementations must be idempotent: the executor
/// may re-invoke an operation that failed transiently.
#[async_trait]
pub trait EatsActivities: Send + Sync {
    /// Records an order status update (intake, rejection, delivery failure).
    async fn record_order_update(&self, text: &str) -> Result<(), ActivityError>;

    /// Notifies that the order with the given id was delivered.
    async fn notify_delivered(&self, order_id: &str) -> Result<(), ActivityError>;

    /// Prints the final delivery confirmation for the given order id.
    async fn print_confirmation(&self, order_id: &str) -> Result<(), ActivityError>;
}

/// Shared handle to a gateway implementation, injected into worker contexts.
pub type SharedActivities = std::sync::Arc<dyn EatsActivities>;

/// Console-backed gateway printing banner blocks for each update.
pub struct ConsoleActivities;

fn banner(title: &str, body: &str) -> String {
    format!("\n{title}:\n============================\n{body}\n============================\n")
}

#[async_trait]
impl EatsActivities for ConsoleActivities {
    async fn record_order_update(&self, text: &str) -> Result<(), ActivityError> {
        info!(text, "Recording order update");
        println!("{}", banner("ORDER UPDATE", text));
        Ok(())
    }

    async fn notify_delivered(&self, order_id: &str) -> Result<(), ActivityError> {
        let message = format!("Order {order_id} delivered!");
        info!(order_id, "Notifying delivery");
        println!("{}", banner("DELIVERY NOTIFICATION", &message));
        Ok(())
    }

    async fn print_confirmation(&self, order_id: &str) -> Result<(), ActivityError> {
        info!(order_id, "Printing delivery confirmation");
        println!(
            "{}",
            banner("DELIVERY CONFIRMATION", "Your order is in front of your door!")
        );
        Ok(())
    }
}
