use chrono::NaiveDate;
use resource_store::{ConflictPolicy, RequestState, StoreClient};
use serde_json::json;
use shopfront::api::mock::MockTransport;
use shopfront::api::HttpMethod;
use shopfront::clients::{ClientError, OrderClient, ProductClient};
use shopfront::config::AppConfig;
use shopfront::domain::OrderLifeCycle;
use shopfront::runtime::ShopSystem;
use shopfront::storage::MemoryStorage;
use shopfront::view::{summarize_orders, BucketUnit, ViewState};
use std::sync::Arc;
use tokio::sync::oneshot;

async fn start(mock: &MockTransport, policy: ConflictPolicy) -> ShopSystem {
    let mut config = AppConfig::default();
    config.stores.conflict_policy = policy;
    ShopSystem::with_parts(config, mock.transport(), Arc::new(MemoryStorage::new()))
        .await
        .expect("system should start")
}

fn day(date: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap()
}

/// Issues two fetch-alls where the first-issued response arrives last and
/// returns the product ids the store ends up holding.
async fn overlapping_fetches(policy: ConflictPolicy) -> Vec<String> {
    let mock = MockTransport::new();
    let (release_first, first_gate) = oneshot::channel();
    mock.expect(HttpMethod::Get, "/Product/Product-Get")
        .hold_until(first_gate)
        .respond_json(json!([{"productID": "first", "productName": "Old", "price": 1.0}]));
    mock.expect(HttpMethod::Get, "/Product/Product-Get")
        .respond_json(json!([{"productID": "second", "productName": "New", "price": 2.0}]));

    let system = start(&mock, policy).await;

    let products = system.products.clone();
    let first = tokio::spawn(async move { products.fetch_all().await });
    mock.wait_for_requests(1).await;

    system.products.fetch_all().await.unwrap();
    release_first.send(()).unwrap();
    first.await.unwrap().unwrap();

    let snapshot = system.products.snapshot().await.unwrap();
    assert_eq!(snapshot.state(ProductClient::FETCH_ALL), RequestState::Succeeded);

    mock.verify();
    system.shutdown().await.unwrap();
    snapshot.collection.into_iter().map(|p| p.product_id).collect()
}

#[tokio::test]
async fn test_last_write_wins_keeps_last_settled_response() {
    assert_eq!(overlapping_fetches(ConflictPolicy::LastWriteWins).await, vec!["first"]);
}

#[tokio::test]
async fn test_latest_issued_discards_stale_response() {
    assert_eq!(overlapping_fetches(ConflictPolicy::LatestIssued).await, vec!["second"]);
}

#[tokio::test]
async fn test_empty_date_range_renders_empty_with_zero_buckets() {
    let mock = MockTransport::new();
    mock.expect(HttpMethod::Get, "/Order/GetOrdersByDate/2020-01-01/2020-01-07")
        .respond_json(json!([]));

    let system = start(&mock, ConflictPolicy::default()).await;
    let (from, to) = (day("2020-01-01"), day("2020-01-07"));
    let orders = system.orders.fetch_by_date(from, to).await.unwrap();
    assert!(orders.is_empty());

    let snapshot = system.orders.stores().orders.snapshot().await.unwrap();
    assert_eq!(ViewState::of(&snapshot, OrderClient::ORDERS), ViewState::Empty);

    let summary = summarize_orders(&snapshot.collection, BucketUnit::Day, from, to);
    assert_eq!(summary.order_count, 0);
    assert_eq!(summary.buckets.len(), 7);
    assert!(summary.buckets.iter().all(|bucket| bucket.count == 0));

    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_inverted_date_range_is_rejected_before_dispatch() {
    let mock = MockTransport::new();
    let system = start(&mock, ConflictPolicy::default()).await;

    let err = system
        .orders
        .fetch_by_date(day("2020-02-01"), day("2020-01-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(mock.requests().is_empty());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_transition_and_sales_order_track_separate_operations() {
    let mock = MockTransport::new();
    mock.expect(HttpMethod::Get, "/Order/GetOrdersByDate/2020-01-01/2020-01-31")
        .respond_json(json!([
            {"orderId": 7, "orderCode": "ORD-7", "orderDate": "2020-01-03T09:30:00", "totalAmount": 120.0, "orderStatus": "Pending"},
            {"orderId": 8, "orderCode": "ORD-8", "orderDate": "2020-01-04T11:00:00", "totalAmount": 80.0, "orderStatus": "Pending"}
        ]));
    mock.expect(HttpMethod::Post, "/Order/UpdateOrderTransition/3/7").respond_empty();
    mock.expect(HttpMethod::Get, "/Order/SalesOrderGet/8").respond_json(json!([]));

    let system = start(&mock, ConflictPolicy::default()).await;
    let orders = system
        .orders
        .fetch_by_date(day("2020-01-01"), day("2020-01-31"))
        .await
        .unwrap();

    let shipped = OrderLifeCycle {
        life_cycle_id: 3,
        life_cycle_name: "Shipped".into(),
    };
    system.orders.transition(&orders[0], &shipped).await.unwrap();

    let err = system.orders.fetch_sales_order(8).await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(
        err,
        ClientError::Api(shopfront::api::ApiError::NotFound("No order details found".into()))
    );

    let snapshot = system.orders.stores().orders.snapshot().await.unwrap();
    assert_eq!(snapshot.collection[0].order_status.as_deref(), Some("Shipped"));
    assert_eq!(snapshot.collection[1].order_status.as_deref(), Some("Pending"));
    assert_eq!(snapshot.state(OrderClient::TRANSITION), RequestState::Succeeded);
    assert_eq!(snapshot.state(OrderClient::ORDERS), RequestState::Succeeded);

    let lines = system.orders.stores().lines.snapshot().await.unwrap();
    assert_eq!(lines.state(OrderClient::SALES_ORDER), RequestState::Failed);
    assert_eq!(lines.error(OrderClient::SALES_ORDER), Some("No order details found"));

    let summary = summarize_orders(
        &snapshot.collection,
        BucketUnit::Week,
        day("2020-01-01"),
        day("2020-01-14"),
    );
    assert_eq!(summary.order_count, 2);
    assert_eq!(summary.revenue, 200.0);
    assert_eq!(summary.buckets[0].count, 2);

    mock.verify();
    system.shutdown().await.unwrap();
}
