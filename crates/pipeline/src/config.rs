//! Tunable batch and page sizes.
//!
//! These are bounded by the store backend's maximum batch-operation size
//! (see [`clover_store::MAX_BATCH_OPS`]), which varies across backends, so
//! they are configuration rather than constants baked into the pipelines.
//! Every pipeline call site additionally caps them at the active binding's
//! [`max_batch_size`](clover_store::DocumentStore::max_batch_size).

/// Default chunk size for seed upsert batches.
pub const DEFAULT_SEED_CHUNK_SIZE: usize = 400;

/// Default page size for the paginated deleter.
pub const DEFAULT_DELETE_PAGE_SIZE: usize = 500;

/// Default chunk size for dependent-collection purge deletes.
pub const DEFAULT_PURGE_CHUNK_SIZE: usize = 500;

/// Batch/page sizing for both pipelines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Documents per upsert-merge commit during seeding.
    pub seed_chunk_size: usize,
    /// Documents fetched per iteration of the paginated deleter.
    pub delete_page_size: usize,
    /// Documents per delete batch during dependent-collection purging.
    pub purge_chunk_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            seed_chunk_size: DEFAULT_SEED_CHUNK_SIZE,
            delete_page_size: DEFAULT_DELETE_PAGE_SIZE,
            purge_chunk_size: DEFAULT_PURGE_CHUNK_SIZE,
        }
    }
}
