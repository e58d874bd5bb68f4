//! Order documents for the `orders` collection.
//!
//! Orders are the one entity the seed pipeline *derives* rather than copies:
//! the raw `items` list is expanded into priced line items and order-level
//! totals, and a customer snapshot is denormalized from the user record.
//! Every monetary field below has already passed through
//! [`crate::money::round2`].

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A placed order as stored in the `orders` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Unique order identifier; doubles as the document id.
    pub order_id: String,
    pub user_id: String,
    /// The raw `{sku, qty}` list from the seed input.
    pub items: Vec<OrderItem>,
    /// Priced expansion of `items`, in the same element order.
    pub items_expanded: Vec<LineItem>,
    #[serde(rename = "subtotalUSD")]
    pub subtotal_usd: Decimal,
    #[serde(rename = "taxUSD")]
    pub tax_usd: Decimal,
    #[serde(rename = "shippingUSD")]
    pub shipping_usd: Decimal,
    #[serde(rename = "totalUSD")]
    pub total_usd: Decimal,
    pub tax_rate: Decimal,
    pub currency: String,
    pub status: String,
    pub placed_at: DateTime<Utc>,
    pub customer_snapshot: CustomerSnapshot,
}

impl Order {
    /// Document id in the `orders` collection.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.order_id
    }
}

/// One raw order line: which product, how many.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub sku: String,
    pub qty: u32,
}

/// One priced order line derived from an [`OrderItem`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub sku: String,
    pub name: String,
    pub qty: u32,
    #[serde(rename = "unitPriceUSD")]
    pub unit_price_usd: Decimal,
    #[serde(rename = "lineTotalUSD")]
    pub line_total_usd: Decimal,
}

/// Customer name and email frozen onto the order at seed time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSnapshot {
    pub name: String,
    pub email: String,
}
