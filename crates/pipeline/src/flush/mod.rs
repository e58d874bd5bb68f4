//! The flush pipeline: selective mass deletion across the storefront
//! collections.
//!
//! Two phases, strictly sequential so progress reporting stays
//! deterministic and store load stays bounded:
//!
//! 1. [`deleter::delete_except`] over each primary collection, preserving
//!    the given user ids in `users` and nothing anywhere else.
//! 2. [`purger::purge_orphaned`] over the dependent collections, removing
//!    documents whose owning user was not preserved. After this phase the
//!    dependent collections hold documents only for preserved users - a
//!    cross-collection invariant, not merely a per-collection one.
//!
//! The preserve set is an explicit parameter threaded down from the caller,
//! never ambient state. Re-running a flush is a no-op.

pub mod deleter;
pub mod purger;

use std::collections::{BTreeMap, HashSet};

use clover_store::{DocumentStore, collections};
use tracing::{info, instrument};

use crate::config::PipelineConfig;
use crate::error::PipelineError;

pub use deleter::DeleteOutcome;

/// Primary collections, flushed in this order.
pub const PRIMARY_COLLECTIONS: [&str; 8] = [
    collections::PRODUCTS,
    collections::ORDERS,
    collections::DISCOUNTS,
    collections::ADDRESSES,
    collections::USERS,
    collections::PAYMENT_METHODS,
    collections::SETTINGS,
    collections::CONTENT,
];

/// Collections owned by users, purged against the preserve set after the
/// primary pass.
pub const DEPENDENT_COLLECTIONS: [&str; 2] =
    [collections::ADDRESSES, collections::PAYMENT_METHODS];

/// Per-collection counts from one flush run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FlushReport {
    /// Documents deleted per primary collection.
    pub deleted: BTreeMap<&'static str, usize>,
    /// Documents purged per dependent collection.
    pub purged: BTreeMap<&'static str, usize>,
}

impl FlushReport {
    /// Total documents removed across both phases.
    #[must_use]
    pub fn total(&self) -> usize {
        self.deleted.values().sum::<usize>() + self.purged.values().sum::<usize>()
    }
}

/// Run the flush pipeline, preserving `preserve_user_ids` in the `users`
/// collection and their documents in the dependent collections.
///
/// # Errors
///
/// Returns [`PipelineError::StoreCommit`] when a fetch or delete fails.
/// Collections already flushed stay flushed; re-running completes the rest.
#[instrument(skip_all, fields(preserved = preserve_user_ids.len()))]
pub async fn run_flush<S: DocumentStore>(
    store: &S,
    preserve_user_ids: &[String],
    config: &PipelineConfig,
) -> Result<FlushReport, PipelineError> {
    let preserve: HashSet<String> = preserve_user_ids.iter().cloned().collect();
    let none: HashSet<String> = HashSet::new();
    let mut report = FlushReport::default();

    for collection in PRIMARY_COLLECTIONS {
        // Only `users` carries a preserve set; every other primary
        // collection is wiped outright.
        let preserve_ids = if collection == collections::USERS {
            &preserve
        } else {
            &none
        };
        let outcome =
            deleter::delete_except(store, collection, preserve_ids, config.delete_page_size)
                .await?;
        info!(
            collection,
            deleted = outcome.deleted,
            iterations = outcome.iterations,
            "Flushed collection"
        );
        report.deleted.insert(collection, outcome.deleted);
    }

    for collection in DEPENDENT_COLLECTIONS {
        let purged =
            purger::purge_orphaned(store, collection, &preserve, config.purge_chunk_size).await?;
        info!(collection, purged, "Purged dependent collection");
        report.purged.insert(collection, purged);
    }

    info!(total = report.total(), "Flush run complete");
    Ok(report)
}
