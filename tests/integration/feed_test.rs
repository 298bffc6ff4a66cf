//! Integration tests for OrderFeed

use std::sync::Arc;

use ag_orders::oms::feed::channel;
use ag_orders::{
    FeedConfig, MarketId, Order, OrderEvent, OrderFeed, OrderId, OrderStatus, OrderTracker, Side,
    TrackerConfig,
};
use chrono::Utc;
use rust_decimal_macros::dec;

fn create_test_order(id: u64) -> Order {
    Order::new(
        OrderId::new(id),
        MarketId::new("LTC/BTC"),
        Side::Buy,
        dec!(123.456),
        dec!(20.0),
        Utc::now(),
    )
}

#[tokio::test]
async fn test_submission_and_update_paths_share_tracker() {
    let config = TrackerConfig::from_yaml("initial_capacity: 16\nfeed:\n  channel_capacity: 8\n")
        .unwrap();
    let tracker = Arc::new(OrderTracker::from_config(&config));

    let (submit_tx, submit_rx) = channel(&config.feed);
    let (update_tx, update_rx) = channel(&config.feed);

    let submissions = tokio::spawn(
        OrderFeed::new(tracker.clone(), config.feed.clone()).run(submit_rx),
    );

    for id in 1..=10 {
        submit_tx
            .send(OrderEvent::Submitted(create_test_order(id)))
            .await
            .unwrap();
    }
    drop(submit_tx);
    let submit_stats = submissions.await.unwrap().unwrap();
    assert_eq!(submit_stats.applied, 10);

    let updates = tokio::spawn(OrderFeed::new(tracker.clone(), config.feed.clone()).run(update_rx));

    for id in 1..=5 {
        let mut done = create_test_order(id);
        done.status = OrderStatus::Completed;
        done.completed_amount = dec!(20.0);
        update_tx.send(OrderEvent::Updated(done)).await.unwrap();
    }
    update_tx
        .send(OrderEvent::Updated(create_test_order(123)))
        .await
        .unwrap();
    drop(update_tx);

    let update_stats = updates.await.unwrap().unwrap();
    assert_eq!(update_stats.applied, 5);
    assert_eq!(update_stats.unknown, 1);

    assert_eq!(tracker.open_count().unwrap(), 5);
    assert_eq!(tracker.completed_count().unwrap(), 5);

    let order = tracker.get_order_info(OrderId::new(3)).unwrap();
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.completed_amount, order.amount);
}

#[test]
fn test_json_events_drive_lifecycle() {
    let tracker = Arc::new(OrderTracker::new());
    let mut feed = OrderFeed::new(tracker.clone(), FeedConfig::default());

    feed.apply_json(
        r#"{"event":"submitted","order":{"id":2,"status":"SUBMITTED","market":"SKY/DOGE",
            "price":"654.321","amount":"5.0","side":"SELL","submitted":"2024-01-01T00:00:00Z"}}"#,
    )
    .unwrap();

    let err = feed
        .apply_json(
            r#"{"event":"submitted","order":{"id":5,"market":"BTC/LTC",
                "price":"123.456","amount":"10.0","side":"SELL","submitted":"2024-01-01T00:00:00Z"}}"#,
        )
        .unwrap_err();
    assert!(err.is_invalid_status());

    feed.apply_json(
        r#"{"event":"updated","order":{"id":2,"status":"CANCELLED","market":"SKY/DOGE",
            "price":"654.321","amount":"5.0","side":"SELL","submitted":"2024-01-01T00:00:00Z",
            "completed":"2024-01-01T00:01:00Z","fee":"0.04","completed_amount":"4.0"}}"#,
    )
    .unwrap();

    let order = tracker.get_order_info(OrderId::new(2)).unwrap();
    assert_eq!(order.status, OrderStatus::Cancelled);
    assert_eq!(order.fee, dec!(0.04));
    assert_eq!(order.completed_amount, dec!(4.0));

    let stats = feed.stats();
    assert_eq!(stats.applied, 2);
    assert_eq!(stats.rejected, 1);
}
