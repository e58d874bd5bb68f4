//! Catalog documents for the `products` collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product as stored in the `products` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stock-keeping unit; unique, doubles as the document id.
    pub sku: String,
    pub name: String,
    #[serde(rename = "priceUSD")]
    pub price_usd: Decimal,
    /// Units on hand. Zero is a valid value; the seed pipeline rejects
    /// records where the field is absent or null.
    pub inventory: i64,
}

impl Product {
    /// Document id in the `products` collection.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.sku
    }
}
