//! Standalone address documents for the `addresses` collection.

use serde::{Deserialize, Serialize};

/// A customer address as stored in the `addresses` collection.
///
/// Addresses arrive nested inside user seed records and are extracted into
/// this standalone shape with a deterministic composite id, so re-seeding
/// the same input overwrites rather than duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Composite id: `{userId}-addr-{index}`.
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: AddressKind,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
    pub is_default: bool,
}

impl Address {
    /// Build the composite document id for a user's address at `index`.
    ///
    /// Stable for the same user and array position, which is what makes
    /// nested-address re-seeding idempotent.
    #[must_use]
    pub fn composite_id(user_id: &str, index: usize) -> String {
        format!("{user_id}-addr-{index}")
    }
}

/// Address classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    #[default]
    Shipping,
    Billing,
    Other,
}
