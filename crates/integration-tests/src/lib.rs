//! Integration tests for Clover Market.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p clover-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `seed_flow` - End-to-end seed pipeline runs over an in-memory store
//! - `flush_flow` - End-to-end flush runs and the cross-collection
//!   preservation invariant
//! - `lifecycle` - Seed, flush, and re-seed sequenced together
//!
//! The shared fixture helpers below build a seed directory on disk and run
//! the pipelines against [`clover_store::MemoryStore`]; no external services
//! are involved.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use serde_json::{Value, json};

/// Write a complete, internally consistent set of seed files into `dir`.
///
/// Three users (one with nested addresses), three products, one discount,
/// two orders, one ticket with one reply. Orders exercise the worked money
/// example: `O1` is 3 x 10 USD with 10% tax and 2 USD shipping.
///
/// # Panics
///
/// Panics if a file cannot be written; fixtures have no error path.
pub async fn write_seed_fixture(dir: &Path) {
    let files: [(&str, Value); 6] = [
        (
            "users.json",
            json!([
                {
                    "userId": "U1",
                    "email": "ada@example.com",
                    "name": "Ada Lovelace",
                    "tier": "gold",
                    "addresses": [
                        {"label": "default", "line1": "1 Analytical Way", "city": "London", "country": "GB"},
                        {"label": "billing", "line1": "2 Ledger Lane", "city": "London", "country": "GB"}
                    ]
                },
                {"userId": "U2", "email": "sam@example.com", "name": "Sam"},
                {"userId": "demo-shopper", "email": "demo@example.com", "name": "Demo Shopper"}
            ]),
        ),
        (
            "products.json",
            json!([
                {"sku": "A1", "name": "Stoneware Mug", "priceUSD": 10, "inventory": 5},
                {"sku": "B2", "name": "Loose-Leaf Tea", "priceUSD": "4.50", "inventory": 40},
                {"sku": "C3", "name": "Gift Wrap", "priceUSD": 1.25, "inventory": 0}
            ]),
        ),
        (
            "discounts.json",
            json!([
                {"code": "WELCOME10", "percentOff": 10, "validFrom": "2026-01-01T00:00:00Z"}
            ]),
        ),
        (
            "orders.json",
            json!([
                {
                    "orderId": "O1",
                    "userId": "U1",
                    "items": [{"sku": "A1", "qty": 3}],
                    "shippingUSD": 2,
                    "taxRate": 0.1
                },
                {
                    "orderId": "O2",
                    "userId": "U2",
                    "items": [{"sku": "B2", "qty": 2}, {"sku": "C3", "qty": 1}],
                    "status": "shipped",
                    "placedAt": "2026-07-15T08:00:00Z"
                }
            ]),
        ),
        (
            "support-tickets.json",
            json!([
                {
                    "id": "T1",
                    "userId": "U2",
                    "subject": "Mug arrived chipped",
                    "createdAt": "2026-07-20T10:00:00Z"
                }
            ]),
        ),
        (
            "ticket-replies.json",
            json!([
                {
                    "id": "R1",
                    "ticketId": "T1",
                    "userId": "U2",
                    "message": "Photos attached",
                    "attachments": ["chip-1.jpg"],
                    "createdAt": "2026-07-20T10:05:00Z"
                }
            ]),
        ),
    ];

    for (name, value) in files {
        let body = serde_json::to_vec_pretty(&value).expect("serialize fixture");
        tokio::fs::write(dir.join(name), body)
            .await
            .expect("write fixture file");
    }
}
