//! JSON-directory document store used by the CLI for local runs.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::merge::merge_into;
use crate::{DocumentStore, MAX_BATCH_OPS, StoreError, StoredDoc, check_batch_len};

/// [`DocumentStore`] binding that keeps each collection in
/// `<dir>/<collection>.json` as an id-to-document object.
///
/// Writes go to a temporary sibling file and are renamed into place, so a
/// crash mid-commit leaves the previous collection contents intact. Intended
/// for local and demo data sets, not concurrent writers.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    dir: PathBuf,
}

type Collection = BTreeMap<String, Value>;

impl JsonDirStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the collection files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn collection_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    async fn read_collection(&self, collection: &str) -> Result<Collection, StoreError> {
        let path = self.collection_path(collection);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Collection::new()),
            Err(e) => {
                return Err(StoreError::Io {
                    collection: collection.to_string(),
                    source: e,
                });
            }
        };
        serde_json::from_slice(&bytes).map_err(|e| StoreError::Corrupt {
            collection: collection.to_string(),
            source: e,
        })
    }

    async fn write_collection(
        &self,
        collection: &str,
        docs: &Collection,
    ) -> Result<(), StoreError> {
        let io_err = |e: std::io::Error| StoreError::Io {
            collection: collection.to_string(),
            source: e,
        };

        tokio::fs::create_dir_all(&self.dir).await.map_err(io_err)?;

        let body = serde_json::to_vec_pretty(docs).map_err(|e| StoreError::Corrupt {
            collection: collection.to_string(),
            source: e,
        })?;

        // Write-then-rename keeps the previous file intact on failure.
        let path = self.collection_path(collection);
        let tmp = self.dir.join(format!("{collection}.json.tmp"));
        tokio::fs::write(&tmp, body).await.map_err(io_err)?;
        tokio::fs::rename(&tmp, &path).await.map_err(io_err)?;

        debug!(collection, docs = docs.len(), "Persisted collection file");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for JsonDirStore {
    fn max_batch_size(&self) -> usize {
        MAX_BATCH_OPS
    }

    async fn upsert_merge(
        &self,
        collection: &str,
        writes: Vec<(String, Value)>,
    ) -> Result<(), StoreError> {
        check_batch_len(writes.len(), self.max_batch_size())?;
        let mut docs = self.read_collection(collection).await?;
        for (id, value) in writes {
            match docs.get_mut(&id) {
                Some(existing) => merge_into(existing, value),
                None => {
                    docs.insert(id, value);
                }
            }
        }
        self.write_collection(collection, &docs).await
    }

    async fn fetch_page(
        &self,
        collection: &str,
        limit: usize,
    ) -> Result<Vec<StoredDoc>, StoreError> {
        let docs = self.read_collection(collection).await?;
        Ok(docs
            .into_iter()
            .take(limit)
            .map(|(id, data)| StoredDoc { id, data })
            .collect())
    }

    async fn fetch_all(&self, collection: &str) -> Result<Vec<StoredDoc>, StoreError> {
        self.fetch_page(collection, usize::MAX).await
    }

    async fn delete_batch(&self, collection: &str, ids: &[String]) -> Result<(), StoreError> {
        check_batch_len(ids.len(), self.max_batch_size())?;
        let mut docs = self.read_collection(collection).await?;
        let before = docs.len();
        for id in ids {
            docs.remove(id);
        }
        if docs.len() != before {
            self.write_collection(collection, &docs).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_missing_collection_reads_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonDirStore::new(dir.path());
        assert!(store.fetch_all("products").await.expect("fetch").is_empty());
    }

    #[tokio::test]
    async fn test_upsert_persists_across_instances() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = JsonDirStore::new(dir.path());
            store
                .upsert_merge("products", vec![("A1".to_string(), json!({"sku": "A1"}))])
                .await
                .expect("commit");
        }

        let reopened = JsonDirStore::new(dir.path());
        let docs = reopened.fetch_all("products").await.expect("fetch");
        assert_eq!(docs.len(), 1);
        assert_eq!(docs.first().map(|d| d.id.as_str()), Some("A1"));
    }

    #[tokio::test]
    async fn test_merge_and_delete_roundtrip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonDirStore::new(dir.path());
        store
            .upsert_merge(
                "users",
                vec![
                    ("U1".to_string(), json!({"email": "u1@x.io", "tier": "gold"})),
                    ("U2".to_string(), json!({"email": "u2@x.io"})),
                ],
            )
            .await
            .expect("commit");
        store
            .upsert_merge("users", vec![("U1".to_string(), json!({"tier": "silver"}))])
            .await
            .expect("merge commit");
        store
            .delete_batch("users", &["U2".to_string()])
            .await
            .expect("delete");

        let docs = store.fetch_all("users").await.expect("fetch");
        assert_eq!(docs.len(), 1);
        assert_eq!(
            docs.first().map(|d| d.data.clone()),
            Some(json!({"email": "u1@x.io", "tier": "silver"}))
        );
    }

    #[tokio::test]
    async fn test_corrupt_collection_file_reports_corrupt() {
        let dir = tempfile::tempdir().expect("tempdir");
        tokio::fs::write(dir.path().join("orders.json"), b"not json")
            .await
            .expect("write corrupt file");

        let store = JsonDirStore::new(dir.path());
        let err = store.fetch_all("orders").await.expect_err("corrupt");
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }
}
