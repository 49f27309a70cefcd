//! Full end-to-end tests with the real console gateway and both workers.

use eats_order::activities::ConsoleActivities;
use eats_order::lifecycle::{EatsSystem, WorkerSettings};
use eats_order::model::{Order, OrderRequest};
use std::sync::Arc;

fn system() -> EatsSystem {
    EatsSystem::with_settings(Arc::new(ConsoleActivities), WorkerSettings::default())
}

fn request(order_id: &str, items: &[&str]) -> OrderRequest {
    OrderRequest {
        user_id: "alice".to_string(),
        order: Order::new(order_id, items.iter().map(|s| s.to_string()).collect()),
        restaurant_id: "thai-corner".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn accepted_order_flows_through_both_workers() {
    let system = system();

    let completion = system
        .order_client
        .start_order(request("100", &["Green Curry", "Rice"]))
        .await
        .expect("failed to start order");
    system
        .order_client
        .signal_restaurant_decision("100", true)
        .await
        .expect("failed to signal decision");

    let status = completion.wait().await.expect("order process failed");
    assert_eq!(status, "Your order is in front of your door!");

    system.shutdown().await.expect("failed to shutdown system");
}

#[tokio::test(start_paused = true)]
async fn rejected_order_completes_without_delivery() {
    let system = system();

    let completion = system
        .order_client
        .start_order(request("200", &["Dumplings"]))
        .await
        .expect("failed to start order");
    system
        .order_client
        .signal_restaurant_decision("200", false)
        .await
        .expect("failed to signal decision");

    let status = completion.wait().await.expect("order process failed");
    assert!(status.contains("200"));
    assert!(status.contains("rejected"));

    system.shutdown().await.expect("failed to shutdown system");
}

/// Several independent orders run concurrently; each gets its own decision and
/// its own isolated outcome.
#[tokio::test(start_paused = true)]
async fn concurrent_orders_are_isolated() {
    let system = system();

    let mut completions = Vec::new();
    for i in 0..5 {
        let id = format!("multi-{i}");
        let completion = system
            .order_client
            .start_order(request(&id, &["Noodles"]))
            .await
            .expect("failed to start order");
        completions.push((id, completion));
    }

    // Accept the even orders, reject the odd ones.
    for (i, (id, _)) in completions.iter().enumerate() {
        system
            .order_client
            .signal_restaurant_decision(id, i % 2 == 0)
            .await
            .expect("failed to signal decision");
    }

    for (i, (id, completion)) in completions.into_iter().enumerate() {
        let status = completion.wait().await.expect("order process failed");
        if i % 2 == 0 {
            assert_eq!(status, "Your order is in front of your door!");
        } else {
            assert_eq!(status, format!("Order {id} was rejected by the restaurant"));
        }
    }

    system.shutdown().await.expect("failed to shutdown system");
}
