//! End-to-end flush runs and the cross-collection preservation invariant.

use clover_pipeline::flush::{DEPENDENT_COLLECTIONS, run_flush};
use clover_pipeline::seed::run_seed;
use clover_pipeline::{PipelineConfig, flush::deleter::delete_except};
use clover_store::{DocumentStore as _, MemoryStore, collections};
use serde_json::json;

use clover_integration_tests::write_seed_fixture;

async fn seeded_store(dir: &std::path::Path) -> MemoryStore {
    write_seed_fixture(dir).await;
    let store = MemoryStore::new();
    run_seed(&store, dir, &[], &PipelineConfig::default())
        .await
        .expect("seed");
    // Collections the seed pipeline does not populate but flush covers.
    store
        .upsert_merge(
            collections::PAYMENT_METHODS,
            vec![
                ("pm-U1".to_string(), json!({"userId": "U1", "brand": "visa"})),
                (
                    "pm-demo".to_string(),
                    json!({"userId": "demo-shopper", "brand": "amex"}),
                ),
            ],
        )
        .await
        .expect("payment methods");
    store
        .upsert_merge(
            collections::SETTINGS,
            vec![("site".to_string(), json!({"theme": "light"}))],
        )
        .await
        .expect("settings");
    store
        .upsert_merge(
            collections::CONTENT,
            vec![("home-hero".to_string(), json!({"headline": "Fresh finds"}))],
        )
        .await
        .expect("content");
    store
}

// =============================================================================
// Cross-collection preservation invariant
// =============================================================================

#[tokio::test]
async fn test_flush_preserves_exactly_the_demo_user_everywhere() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = seeded_store(dir.path()).await;

    run_flush(
        &store,
        &["demo-shopper".to_string()],
        &PipelineConfig::default(),
    )
    .await
    .expect("flush");

    // users holds exactly the preserved document.
    assert_eq!(store.ids(collections::USERS), ["demo-shopper"]);

    // Every other primary collection is empty.
    for collection in [
        collections::PRODUCTS,
        collections::ORDERS,
        collections::DISCOUNTS,
        collections::SETTINGS,
        collections::CONTENT,
    ] {
        assert_eq!(store.collection_len(collection), 0, "{collection}");
    }

    // Dependent collections hold documents only for preserved users.
    for collection in DEPENDENT_COLLECTIONS {
        for id in store.ids(collection) {
            let doc = store.document(collection, &id).expect("doc");
            assert_eq!(
                doc.get("userId"),
                Some(&json!("demo-shopper")),
                "{collection}/{id}"
            );
        }
    }
}

#[tokio::test]
async fn test_flush_then_reseed_restores_the_catalog() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = seeded_store(dir.path()).await;
    let config = PipelineConfig::default();

    run_flush(&store, &["demo-shopper".to_string()], &config)
        .await
        .expect("flush");
    run_seed(&store, dir.path(), &[], &config)
        .await
        .expect("re-seed");

    assert_eq!(store.collection_len(collections::USERS), 3);
    assert_eq!(store.collection_len(collections::PRODUCTS), 3);
    assert_eq!(store.collection_len(collections::ORDERS), 2);
}

// =============================================================================
// Pagination termination
// =============================================================================

#[tokio::test]
async fn test_deleter_terminates_on_large_collections() {
    let store = MemoryStore::new();
    for chunk_start in (0..1200).step_by(400) {
        let writes = (chunk_start..chunk_start + 400)
            .map(|i| (format!("O{i:05}"), json!({"n": i})))
            .collect();
        store
            .upsert_merge(collections::ORDERS, writes)
            .await
            .expect("fill");
    }

    let preserve = std::collections::HashSet::new();
    let outcome = delete_except(&store, collections::ORDERS, &preserve, 500)
        .await
        .expect("delete");

    assert_eq!(outcome.deleted, 1200);
    // ceil(1200 / 500) = 3 deleting pages, plus the terminal fetch that
    // proves nothing deletable remains.
    assert_eq!(outcome.iterations, 4);
    assert_eq!(store.collection_len(collections::ORDERS), 0);
}

#[tokio::test]
async fn test_deleter_on_empty_collection_is_single_iteration() {
    let store = MemoryStore::new();
    let preserve = std::collections::HashSet::new();
    let outcome = delete_except(&store, collections::ORDERS, &preserve, 500)
        .await
        .expect("delete");
    assert_eq!(outcome.deleted, 0);
    assert_eq!(outcome.iterations, 1);
}
