//! Purging of dependent collections by owning user.

use std::collections::HashSet;

use clover_store::DocumentStore;
use serde_json::Value;
use tracing::debug;

use crate::error::PipelineError;

/// Delete every document in `collection` whose `userId` is not in
/// `preserve_user_ids`.
///
/// Dependent collections (addresses, payment methods) are assumed bounded
/// in size, so this fetches the whole collection at once rather than
/// paginating, then deletes the complement in sequential chunks. Documents
/// with no `userId` field have no preserved owner and are deleted. Returns
/// the number of documents deleted.
///
/// # Errors
///
/// Returns [`PipelineError::StoreCommit`] when the fetch or a delete chunk
/// fails; chunks already deleted stay deleted.
pub async fn purge_orphaned<S: DocumentStore + ?Sized>(
    store: &S,
    collection: &str,
    preserve_user_ids: &HashSet<String>,
    chunk_size: usize,
) -> Result<usize, PipelineError> {
    let chunk_size = chunk_size.clamp(1, store.max_batch_size());

    let docs = store
        .fetch_all(collection)
        .await
        .map_err(|e| PipelineError::store(collection, e))?;

    let doomed: Vec<String> = docs
        .into_iter()
        .filter(|doc| {
            doc.data
                .get("userId")
                .and_then(Value::as_str)
                .is_none_or(|user_id| !preserve_user_ids.contains(user_id))
        })
        .map(|doc| doc.id)
        .collect();

    for chunk in doomed.chunks(chunk_size) {
        store
            .delete_batch(collection, chunk)
            .await
            .map_err(|e| PipelineError::store(collection, e))?;
        debug!(collection, chunk = chunk.len(), "Purged dependent chunk");
    }

    Ok(doomed.len())
}
