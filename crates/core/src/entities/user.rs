//! Customer documents for the `users` collection.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A storefront customer as stored in the `users` collection.
///
/// Nested addresses from the seed input are *not* stored here; they are
/// extracted into the standalone `addresses` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique customer identifier; doubles as the document id.
    pub user_id: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Arbitrary profile fields preserved verbatim from the seed input.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

impl User {
    /// Document id in the `users` collection.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.user_id
    }
}
