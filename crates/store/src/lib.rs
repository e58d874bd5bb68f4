//! Clover Store - Document-store capability and bindings.
//!
//! The seed and flush pipelines talk to the document store exclusively
//! through the [`DocumentStore`] trait: keyed upsert-merge batches, bounded
//! page fetches, full-collection fetches, and batched deletes. The hosted
//! backend's own SDK lives behind a binding of this trait; this crate ships
//! two bindings of its own:
//!
//! - [`MemoryStore`] - in-process, used by unit and integration tests
//! - [`JsonDirStore`] - one JSON file per collection under a data directory,
//!   used by the CLI for local/demo runs
//!
//! # Consistency model
//!
//! A batch commits atomically per call, but there is no transaction spanning
//! multiple batches or collections. Callers sequence their own writes.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod json_dir;
mod memory;
mod merge;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;

/// Maximum operations a single batch commit or batched delete may carry.
///
/// Hosted document stores cap batch writes; 500 matches the common limit and
/// both shipped bindings enforce it.
pub const MAX_BATCH_OPS: usize = 500;

/// Fixed collection names used by the storefront.
pub mod collections {
    pub const USERS: &str = "users";
    pub const PRODUCTS: &str = "products";
    pub const DISCOUNTS: &str = "discounts";
    pub const ORDERS: &str = "orders";
    pub const ADDRESSES: &str = "addresses";
    pub const PAYMENT_METHODS: &str = "paymentMethods";
    pub const SETTINGS: &str = "settings";
    pub const CONTENT: &str = "content";
    pub const SUPPORT_TICKETS: &str = "supportTickets";
    pub const TICKET_REPLIES: &str = "ticketReplies";
}

/// A document fetched from a collection, with its id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDoc {
    pub id: String,
    pub data: Value,
}

/// Errors that can occur talking to a document-store binding.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A batch carried more operations than the backend allows.
    #[error("batch of {len} operations exceeds the store limit of {max}")]
    BatchTooLarge { len: usize, max: usize },

    /// I/O failure inside a binding.
    #[error("store I/O error for collection `{collection}`")]
    Io {
        collection: String,
        #[source]
        source: std::io::Error,
    },

    /// Persisted collection data could not be parsed.
    #[error("corrupt data for collection `{collection}`")]
    Corrupt {
        collection: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backend refused the commit.
    #[error("commit rejected: {0}")]
    CommitRejected(String),
}

/// Abstract document-store capability.
///
/// Contracts the pipelines rely on:
///
/// - `upsert_merge` creates absent documents and recursively merges supplied
///   fields into existing ones without clobbering unspecified fields; the
///   whole batch commits atomically per call.
/// - `fetch_page` returns up to `limit` documents from the start of the
///   collection in a stable but otherwise unspecified order.
/// - `delete_batch` removes the given ids; absent ids are not an error.
/// - No call may exceed [`max_batch_size`](Self::max_batch_size) operations.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Largest batch this binding accepts per commit or delete call.
    fn max_batch_size(&self) -> usize {
        MAX_BATCH_OPS
    }

    /// Create-or-merge each `(id, document)` pair into `collection`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BatchTooLarge`] when the batch exceeds
    /// [`max_batch_size`](Self::max_batch_size), or a binding error if the
    /// commit fails. A failed call commits nothing.
    async fn upsert_merge(
        &self,
        collection: &str,
        writes: Vec<(String, Value)>,
    ) -> Result<(), StoreError>;

    /// Fetch up to `limit` documents from the start of `collection`.
    ///
    /// # Errors
    ///
    /// Returns a binding error if the collection cannot be read.
    async fn fetch_page(&self, collection: &str, limit: usize)
    -> Result<Vec<StoredDoc>, StoreError>;

    /// Fetch every document in `collection`.
    ///
    /// Only appropriate for collections known to be bounded in size.
    ///
    /// # Errors
    ///
    /// Returns a binding error if the collection cannot be read.
    async fn fetch_all(&self, collection: &str) -> Result<Vec<StoredDoc>, StoreError>;

    /// Delete the given document ids from `collection` in one batch.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::BatchTooLarge`] when the batch exceeds
    /// [`max_batch_size`](Self::max_batch_size), or a binding error if the
    /// delete fails.
    async fn delete_batch(&self, collection: &str, ids: &[String]) -> Result<(), StoreError>;
}

fn check_batch_len(len: usize, max: usize) -> Result<(), StoreError> {
    if len > max {
        return Err(StoreError::BatchTooLarge { len, max });
    }
    Ok(())
}
