//! In-process document store used by tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use crate::merge::merge_into;
use crate::{DocumentStore, MAX_BATCH_OPS, StoreError, StoredDoc, check_batch_len};

/// In-memory [`DocumentStore`] binding.
///
/// Documents are kept in id order, so page fetches are deterministic. The
/// store can be told to start rejecting commits after a number of successful
/// ones, which is how tests exercise the pipelines' no-rollback contract.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    collections: BTreeMap<String, BTreeMap<String, Value>>,
    commits_remaining: Option<usize>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow `n` more successful commits (upsert or delete batches), then
    /// reject every subsequent one.
    pub fn fail_commits_after(&self, n: usize) {
        self.lock().commits_remaining = Some(n);
    }

    /// Number of documents currently in `collection`.
    #[must_use]
    pub fn collection_len(&self, collection: &str) -> usize {
        self.lock()
            .collections
            .get(collection)
            .map_or(0, BTreeMap::len)
    }

    /// Ids currently in `collection`, in id order.
    #[must_use]
    pub fn ids(&self, collection: &str) -> Vec<String> {
        self.lock()
            .collections
            .get(collection)
            .map(|docs| docs.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Clone of the document at `collection/id`, if present.
    #[must_use]
    pub fn document(&self, collection: &str, id: &str) -> Option<Value> {
        self.lock()
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).cloned())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // The mutex only guards plain data; a poisoned lock means a test
        // already panicked.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Inner {
    fn consume_commit(&mut self) -> Result<(), StoreError> {
        match self.commits_remaining.as_mut() {
            Some(0) => Err(StoreError::CommitRejected(
                "injected failure: commit budget exhausted".to_string(),
            )),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn max_batch_size(&self) -> usize {
        MAX_BATCH_OPS
    }

    async fn upsert_merge(
        &self,
        collection: &str,
        writes: Vec<(String, Value)>,
    ) -> Result<(), StoreError> {
        check_batch_len(writes.len(), self.max_batch_size())?;
        let mut inner = self.lock();
        inner.consume_commit()?;
        let docs = inner.collections.entry(collection.to_string()).or_default();
        for (id, value) in writes {
            match docs.get_mut(&id) {
                Some(existing) => merge_into(existing, value),
                None => {
                    docs.insert(id, value);
                }
            }
        }
        Ok(())
    }

    async fn fetch_page(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<StoredDoc>, StoreError> {
        let inner = self.lock();
        let page = inner
            .collections
            .get(collection)
            .into_iter()
            .flatten()
            .take(limit)
            .map(|(id, data)| StoredDoc {
                id: id.clone(),
                data: data.clone(),
            })
            .collect();
        Ok(page)
    }

    async fn fetch_all(&self, collection: &str) -> Result<Vec<StoredDoc>, StoreError> {
        self.fetch_page(collection, usize::MAX).await
    }

    async fn delete_batch(&self, collection: &str, ids: &[String]) -> Result<(), StoreError> {
        check_batch_len(ids.len(), self.max_batch_size())?;
        let mut inner = self.lock();
        inner.consume_commit()?;
        if let Some(docs) = inner.collections.get_mut(collection) {
            for id in ids {
                docs.remove(id);
            }
        }
        Ok(())
    }
}
