//! Seed, flush, and re-seed sequenced together.

use clover_pipeline::PipelineConfig;
use clover_pipeline::flush::run_flush;
use clover_pipeline::seed::{SeedTarget, run_seed};
use clover_store::{MemoryStore, collections};
use serde_json::json;

use clover_integration_tests::write_seed_fixture;

#[tokio::test]
async fn test_seed_flush_reseed_round_trip() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    let store = MemoryStore::new();
    let config = PipelineConfig::default();

    let first = run_seed(&store, dir.path(), &[], &config)
        .await
        .expect("initial seed");
    run_flush(&store, &["demo-shopper".to_string()], &config)
        .await
        .expect("flush");
    let second = run_seed(&store, dir.path(), &[], &config)
        .await
        .expect("re-seed");

    // Same input, same counts, same document set either side of the flush.
    assert_eq!(first, second);
    assert_eq!(store.collection_len(collections::USERS), 3);
    assert_eq!(store.ids(collections::ORDERS), ["O1", "O2"]);
    let order = store.document(collections::ORDERS, "O1").expect("order");
    assert_eq!(order.get("totalUSD"), Some(&json!("35.00")));
}

#[tokio::test]
async fn test_partial_reseed_after_flush_repopulates_only_the_target() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    let store = MemoryStore::new();
    let config = PipelineConfig::default();

    run_seed(&store, dir.path(), &[], &config)
        .await
        .expect("initial seed");
    run_flush(&store, &["demo-shopper".to_string()], &config)
        .await
        .expect("flush");
    run_seed(&store, dir.path(), &[SeedTarget::Products], &config)
        .await
        .expect("products-only seed");

    assert_eq!(store.collection_len(collections::PRODUCTS), 3);
    assert_eq!(store.collection_len(collections::ORDERS), 0);
    assert_eq!(store.ids(collections::USERS), ["demo-shopper"]);
}

#[tokio::test]
async fn test_flush_after_partial_seed_handles_missing_collections() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_seed_fixture(dir.path()).await;
    let store = MemoryStore::new();
    let config = PipelineConfig::default();

    run_seed(&store, dir.path(), &[SeedTarget::Users], &config)
        .await
        .expect("users-only seed");
    let report = run_flush(&store, &["demo-shopper".to_string()], &config)
        .await
        .expect("flush");

    // products/orders/discounts never existed; flushing them is a no-op.
    assert_eq!(report.deleted.get(collections::PRODUCTS), Some(&0));
    assert_eq!(report.deleted.get(collections::USERS), Some(&2));
    assert_eq!(store.ids(collections::USERS), ["demo-shopper"]);
}
