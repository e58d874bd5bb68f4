//! In-memory reference indexes for cross-collection validation.

use std::collections::HashMap;

/// A key-to-record map built once per run, used to validate and resolve
/// cross-collection references (order `userId` -> user, item `sku` ->
/// product) without repeated store queries.
///
/// Lookup returns `None` rather than failing; callers decide whether a
/// missing reference is fatal in their context.
#[derive(Debug)]
pub struct ReferenceIndex<T> {
    map: HashMap<String, T>,
}

impl<T> ReferenceIndex<T> {
    /// Build from `records` in O(n), keying each record with `key`.
    ///
    /// Later duplicates win, mirroring the store's upsert-by-key behavior
    /// for duplicate keys within one seed file.
    pub fn build<I, F>(records: I, key: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> &str,
    {
        let map = records
            .into_iter()
            .map(|record| (key(&record).to_string(), record))
            .collect();
        Self { map }
    }

    /// Look up a record by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&T> {
        self.map.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
