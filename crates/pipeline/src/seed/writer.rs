//! Chunked, sequential upsert-merge writes.

use clover_store::DocumentStore;
use serde_json::Value;
use tracing::debug;

use crate::error::PipelineError;

/// Write `(id, document)` pairs to `collection` in fixed-size chunks, one
/// upsert-merge commit per chunk, awaiting each before starting the next.
///
/// The effective chunk size is `chunk_size` capped at the store binding's
/// batch limit. Returns the number of documents written.
///
/// A failed commit aborts the call; chunks already committed remain
/// committed. There is no cross-chunk rollback - re-running the seed is the
/// recovery path, and upsert-by-key makes that idempotent.
///
/// # Errors
///
/// Returns [`PipelineError::StoreCommit`] when a chunk commit fails.
pub async fn write_batches<S: DocumentStore + ?Sized>(
    store: &S,
    collection: &str,
    writes: Vec<(String, Value)>,
    chunk_size: usize,
) -> Result<usize, PipelineError> {
    let chunk_size = chunk_size.clamp(1, store.max_batch_size());
    let total = writes.len();

    let mut pending = writes.into_iter();
    let mut written = 0;
    loop {
        let chunk: Vec<(String, Value)> = pending.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        let len = chunk.len();
        store
            .upsert_merge(collection, chunk)
            .await
            .map_err(|e| PipelineError::store(collection, e))?;
        written += len;
        debug!(collection, written, total, "Committed seed chunk");
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use clover_store::MemoryStore;
    use serde_json::json;

    use super::*;

    fn writes(n: usize) -> Vec<(String, Value)> {
        (0..n)
            .map(|i| (format!("id-{i:04}"), json!({ "n": i })))
            .collect()
    }

    #[tokio::test]
    async fn test_writes_all_documents_in_chunks() {
        let store = MemoryStore::new();
        let written = write_batches(&store, "products", writes(10), 3)
            .await
            .expect("write");
        assert_eq!(written, 10);
        assert_eq!(store.collection_len("products"), 10);
    }

    #[tokio::test]
    async fn test_empty_input_writes_nothing() {
        let store = MemoryStore::new();
        let written = write_batches(&store, "products", Vec::new(), 400)
            .await
            .expect("write");
        assert_eq!(written, 0);
        assert_eq!(store.collection_len("products"), 0);
    }

    #[tokio::test]
    async fn test_chunk_size_capped_at_store_limit() {
        // Asking for a chunk larger than the store's batch limit must not
        // produce an oversized batch.
        let store = MemoryStore::new();
        let written = write_batches(&store, "products", writes(501), 10_000)
            .await
            .expect("write");
        assert_eq!(written, 501);
        assert_eq!(store.collection_len("products"), 501);
    }

    #[tokio::test]
    async fn test_committed_chunks_survive_later_failure() {
        let store = MemoryStore::new();
        store.fail_commits_after(2);

        let err = write_batches(&store, "products", writes(10), 4)
            .await
            .expect_err("third chunk fails");
        assert!(matches!(err, PipelineError::StoreCommit { .. }));
        // Two chunks of 4 committed before the failure; no rollback.
        assert_eq!(store.collection_len("products"), 8);
    }

    #[tokio::test]
    async fn test_rerun_is_idempotent() {
        let store = MemoryStore::new();
        write_batches(&store, "products", writes(5), 2)
            .await
            .expect("first run");
        write_batches(&store, "products", writes(5), 2)
            .await
            .expect("second run");
        assert_eq!(store.collection_len("products"), 5);
    }
}
