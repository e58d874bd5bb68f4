//! Exclusion-aware paginated deletion of a single collection.

use std::collections::HashSet;

use clover_store::DocumentStore;
use tracing::debug;

use crate::error::PipelineError;

/// What one [`delete_except`] run did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Documents deleted.
    pub deleted: usize,
    /// Pages fetched, including the final page that proved nothing more was
    /// deletable.
    pub iterations: usize,
}

/// Delete every document in `collection` except those whose id is in
/// `preserve_ids`.
///
/// An explicit loop, never recursion: fetch a page from the start of the
/// collection, partition it against the preserve set, delete the deletable
/// part, repeat. The loop ends when a fetched page yields zero deletable
/// documents - the collection is then either empty or holds only preserved
/// documents. That predicate, not an empty page, is the termination check:
/// a page consisting entirely of preserved documents terminates the loop
/// even if the collection holds more documents than were scanned, because
/// none of the rest would ever become deletable.
///
/// Deleted documents vanish from subsequent fetches, so each deleting
/// iteration consumes up to a full page of deletable documents and the loop
/// finishes in at most `ceil(N / page_size)` deleting iterations for N
/// non-preserved documents. Re-running on an already-flushed collection is a
/// no-op.
///
/// # Errors
///
/// Returns [`PipelineError::StoreCommit`] when a page fetch or delete batch
/// fails; documents already deleted stay deleted.
pub async fn delete_except<S: DocumentStore + ?Sized>(
    store: &S,
    collection: &str,
    preserve_ids: &HashSet<String>,
    page_size: usize,
) -> Result<DeleteOutcome, PipelineError> {
    let page_size = page_size.clamp(1, store.max_batch_size());
    let mut outcome = DeleteOutcome::default();

    loop {
        let page = store
            .fetch_page(collection, page_size)
            .await
            .map_err(|e| PipelineError::store(collection, e))?;
        outcome.iterations += 1;

        let to_delete: Vec<String> = page
            .into_iter()
            .filter(|doc| !preserve_ids.contains(&doc.id))
            .map(|doc| doc.id)
            .collect();
        if to_delete.is_empty() {
            break;
        }

        // page_size is capped at the batch limit, so one batch suffices.
        store
            .delete_batch(collection, &to_delete)
            .await
            .map_err(|e| PipelineError::store(collection, e))?;
        outcome.deleted += to_delete.len();
        debug!(
            collection,
            deleted = outcome.deleted,
            iteration = outcome.iterations,
            "Deleted page"
        );
    }

    Ok(outcome)
}
