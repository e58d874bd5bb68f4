//! Discount-code documents for the `discounts` collection.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A discount code as stored in the `discounts` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    /// Redemption code; unique, doubles as the document id.
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<DateTime<Utc>>,
    /// Discount mechanics (percent off, minimum spend, ...) pass through
    /// from the seed input untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Discount {
    /// Document id in the `discounts` collection.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.code
    }
}
