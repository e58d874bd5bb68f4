//! Support-ticket documents for the `supportTickets` and `ticketReplies`
//! collections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A support ticket as stored in the `supportTickets` collection.
///
/// Each lifecycle timestamp is coerced from the seed input when present and
/// stored as an explicit null otherwise, so the storefront can distinguish
/// "never happened" without probing for missing fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportTicket {
    pub id: String,
    pub user_id: String,
    pub subject: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub read_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_reply_at: Option<DateTime<Utc>>,
    /// Remaining ticket fields (status, priority, body, ...) pass through
    /// from the seed input untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SupportTicket {
    /// Document id in the `supportTickets` collection.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.id
    }
}

/// A reply on a support ticket, stored in the `ticketReplies` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketReply {
    pub id: String,
    pub ticket_id: String,
    pub user_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl TicketReply {
    /// Document id in the `ticketReplies` collection.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        &self.id
    }
}
