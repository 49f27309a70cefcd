//! Demo run of the eats order system: place an order, have the restaurant
//! accept it shortly after intake, and report the final status.

use eats_order::activities::ConsoleActivities;
use eats_order::lifecycle::EatsSystem;
use eats_order::model::{Order, OrderRequest};
use process_engine::tracing::setup_tracing;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting eats order application");

    let system = EatsSystem::new(Arc::new(ConsoleActivities));

    let order = Order::new(
        "42",
        vec!["Pad Thai".to_string(), "Spring Rolls".to_string()],
    );
    let request = OrderRequest {
        user_id: "alice".to_string(),
        order: order.clone(),
        restaurant_id: "thai-corner".to_string(),
    };

    info!(%order, "Placing order");
    let completion = system
        .order_client
        .start_order(request)
        .await
        .map_err(|e| e.to_string())?;

    // The restaurant accepts a moment after intake.
    let decision_client = system.order_client.clone();
    let order_id = order.id.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        if let Err(e) = decision_client
            .signal_restaurant_decision(&order_id, true)
            .await
        {
            error!(error = %e, "Failed to deliver restaurant decision");
        }
    });

    match completion.wait().await {
        Ok(status) => info!(status = %status, "Order process completed"),
        Err(failure) => error!(error = %failure, "Order process failed"),
    }

    system.shutdown().await?;

    info!("Application completed");
    Ok(())
}
