//! Seed the document store from per-entity JSON files.
//!
//! This command reads one JSON array per entity type from the seed
//! directory, validates and enriches the records (order expansion, address
//! extraction), and upserts them into the store in dependency order.

use clover_pipeline::seed::{SeedTarget, run_seed};
use clover_store::JsonDirStore;
use tracing::info;

use crate::config::CliConfig;

/// Run the seed pipeline for the selected targets (empty = all).
///
/// # Errors
///
/// Returns an error if configuration is invalid, a seed file is missing or
/// malformed, a record fails validation, or a store commit fails.
pub async fn run(only: &[SeedTarget]) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = CliConfig::from_env()?;

    let store = JsonDirStore::new(&config.store_dir);
    info!(
        seed_dir = %config.seed_dir.display(),
        store_dir = %config.store_dir.display(),
        targets = ?only,
        "Starting seed run"
    );

    let report = run_seed(&store, &config.seed_dir, only, &config.pipeline).await?;

    // Print summary
    info!("Seeding complete!");
    info!("  Users: {}", report.users);
    info!("  Addresses: {}", report.addresses);
    info!("  Products: {}", report.products);
    info!("  Discounts: {}", report.discounts);
    info!("  Orders: {}", report.orders);
    info!("  Support tickets: {}", report.tickets);
    info!("  Ticket replies: {}", report.replies);
    info!("  Total documents: {}", report.total());

    Ok(())
}
