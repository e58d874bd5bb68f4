//! End-to-end seed pipeline runs over an in-memory store.

use std::str::FromStr;

use clover_core::entities::Order;
use clover_pipeline::{PipelineConfig, PipelineError, seed::run_seed};
use clover_store::{DocumentStore as _, MemoryStore, collections};
use rust_decimal::Decimal;
use serde_json::json;

use clover_integration_tests::write_seed_fixture;

fn d(s: &str) -> Decimal {
    Decimal::from_str(s).expect("literal decimal")
}

// =============================================================================
// Full-run behavior
// =============================================================================

#[tokio::test]
async fn test_full_seed_writes_every_collection() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    let store = MemoryStore::new();

    let report = run_seed(&store, dir.path(), &[], &PipelineConfig::default())
        .await
        .expect("seed");

    assert_eq!(report.users, 3);
    assert_eq!(report.addresses, 2);
    assert_eq!(report.products, 3);
    assert_eq!(report.discounts, 1);
    assert_eq!(report.orders, 2);
    assert_eq!(report.tickets, 1);
    assert_eq!(report.replies, 1);
    assert_eq!(store.collection_len(collections::USERS), 3);
    assert_eq!(store.collection_len(collections::ORDERS), 2);
}

#[tokio::test]
async fn test_order_money_ladder_matches_worked_example() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    let store = MemoryStore::new();

    run_seed(&store, dir.path(), &[], &PipelineConfig::default())
        .await
        .expect("seed");

    let doc = store
        .document(collections::ORDERS, "O1")
        .expect("order O1 written");
    let order: Order = serde_json::from_value(doc).expect("decode stored order");

    let line = order.items_expanded.first().expect("one line");
    assert_eq!(line.line_total_usd, d("30.00"));
    assert_eq!(order.subtotal_usd, d("30.00"));
    assert_eq!(order.tax_usd, d("3.00"));
    assert_eq!(order.shipping_usd, d("2.00"));
    assert_eq!(order.total_usd, d("35.00"));
    assert_eq!(order.currency, "USD");
    assert_eq!(order.status, "paid");
    assert_eq!(order.customer_snapshot.email, "ada@example.com");
}

#[tokio::test]
async fn test_user_documents_carry_profile_but_not_addresses() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    let store = MemoryStore::new();

    run_seed(&store, dir.path(), &[], &PipelineConfig::default())
        .await
        .expect("seed");

    let user = store
        .document(collections::USERS, "U1")
        .expect("user written");
    assert_eq!(user.get("tier"), Some(&json!("gold")));
    assert!(user.get("addresses").is_none());

    let addr = store
        .document(collections::ADDRESSES, "U1-addr-1")
        .expect("billing address extracted");
    assert_eq!(addr.get("type"), Some(&json!("billing")));
    assert_eq!(addr.get("userId"), Some(&json!("U1")));
}

// =============================================================================
// Idempotency
// =============================================================================

#[tokio::test]
async fn test_seeding_twice_yields_identical_document_set() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    let store = MemoryStore::new();
    let config = PipelineConfig::default();

    run_seed(&store, dir.path(), &[], &config)
        .await
        .expect("first seed");
    let users_before = store.ids(collections::USERS);
    let order_before = store.document(collections::ORDERS, "O2");

    run_seed(&store, dir.path(), &[], &config)
        .await
        .expect("second seed");

    assert_eq!(store.ids(collections::USERS), users_before);
    assert_eq!(store.collection_len(collections::ADDRESSES), 2);
    assert_eq!(store.document(collections::ORDERS, "O2"), order_before);
}

#[tokio::test]
async fn test_reseed_merges_instead_of_clobbering() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    let store = MemoryStore::new();
    let config = PipelineConfig::default();

    run_seed(&store, dir.path(), &[], &config)
        .await
        .expect("first seed");

    // A field written outside the seed input survives a re-seed because
    // batch writes are upsert-merge, not replace.
    store
        .upsert_merge(
            collections::USERS,
            vec![("U1".to_string(), json!({"loyaltyPoints": 120}))],
        )
        .await
        .expect("side write");
    run_seed(&store, dir.path(), &[], &config)
        .await
        .expect("second seed");

    let user = store.document(collections::USERS, "U1").expect("user");
    assert_eq!(user.get("loyaltyPoints"), Some(&json!(120)));
    assert_eq!(user.get("email"), Some(&json!("ada@example.com")));
}

// =============================================================================
// Failure behavior
// =============================================================================

#[tokio::test]
async fn test_unknown_sku_aborts_orders_without_writing_them() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    tokio::fs::write(
        dir.path().join("orders.json"),
        json!([
            {"orderId": "O1", "userId": "U1", "items": [{"sku": "A1", "qty": 1}]},
            {"orderId": "O9", "userId": "U1", "items": [{"sku": "GHOST", "qty": 1}]}
        ])
        .to_string(),
    )
    .await
    .expect("overwrite orders");
    let store = MemoryStore::new();

    let err = run_seed(&store, dir.path(), &[], &PipelineConfig::default())
        .await
        .expect_err("unknown sku");
    let message = err.to_string();
    assert!(message.contains("O9"), "error names the order: {message}");
    assert!(message.contains("GHOST"), "error names the key: {message}");

    // The whole orders stage aborts before any order is written; the
    // stages before it persist.
    assert_eq!(store.collection_len(collections::ORDERS), 0);
    assert_eq!(store.collection_len(collections::USERS), 3);
    assert_eq!(store.collection_len(collections::PRODUCTS), 3);
}

#[tokio::test]
async fn test_non_array_seed_file_is_fatal() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    tokio::fs::write(dir.path().join("products.json"), "{\"sku\": \"A1\"}")
        .await
        .expect("overwrite products");
    let store = MemoryStore::new();

    let err = run_seed(&store, dir.path(), &[], &PipelineConfig::default())
        .await
        .expect_err("non-array top level");
    assert!(matches!(err, PipelineError::MalformedInput { .. }));
}
