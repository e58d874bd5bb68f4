//! Flush the storefront collections, preserving one user.
//!
//! Runs the paginated deleter over every primary collection (preserving the
//! configured user in `users` only), then purges the dependent collections
//! so they hold documents only for the preserved user.

use clover_pipeline::flush::run_flush;
use clover_store::JsonDirStore;
use tracing::info;

use crate::config::CliConfig;

/// Run the flush pipeline. `preserve_user` overrides the configured id.
///
/// # Errors
///
/// Returns an error if configuration is invalid or a store operation fails.
pub async fn run(preserve_user: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenvy::dotenv().ok();
    let config = CliConfig::from_env()?;
    let preserved = preserve_user.unwrap_or(config.preserve_user);

    let store = JsonDirStore::new(&config.store_dir);
    info!(
        store_dir = %config.store_dir.display(),
        preserve_user = %preserved,
        "Starting flush run"
    );

    let report = run_flush(&store, &[preserved], &config.pipeline).await?;

    // Print summary
    info!("Flush complete!");
    for (collection, deleted) in &report.deleted {
        info!("  {collection}: {deleted} deleted");
    }
    for (collection, purged) in &report.purged {
        info!("  {collection}: {purged} purged (dependent)");
    }
    info!("  Total documents removed: {}", report.total());

    Ok(())
}
