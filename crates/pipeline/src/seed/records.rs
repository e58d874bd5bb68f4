//! Raw seed-input record shapes and their field-level validation.
//!
//! Seed files are looser than the stored documents: required fields may be
//! absent, money may arrive as numbers or strings, users carry nested
//! address arrays. Each raw shape here mirrors one input record, with every
//! required field optional so that absence surfaces as a typed
//! [`PipelineError::MissingRequiredField`] rather than a decode failure.
//! `validate` converts a raw record into its stored entity (orders stop at
//! [`OrderInput`]; the expander derives the rest).

use chrono::{DateTime, Utc};
use clover_core::entities::{Address, Discount, OrderItem, Product, SupportTicket, User};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::PipelineError;
use crate::seed::addresses;

fn context(collection: &str, position: usize) -> String {
    format!("{collection} record {position}")
}

/// Decode one raw record out of a seed array.
pub(crate) fn decode<T: serde::de::DeserializeOwned>(
    collection: &str,
    position: usize,
    value: Value,
) -> Result<T, PipelineError> {
    serde_json::from_value(value).map_err(|e| PipelineError::MalformedRecord {
        context: context(collection, position),
        source: e,
    })
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// A raw `users.json` record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    pub user_id: Option<String>,
    pub email: Option<String>,
    pub name: Option<String>,
    #[serde(default)]
    pub addresses: Vec<RawAddressInput>,
    /// Arbitrary profile fields, preserved verbatim.
    #[serde(flatten)]
    pub profile: Map<String, Value>,
}

/// One nested address on a raw user record. Entirely best-effort: absent
/// sub-fields become empty strings during extraction and never abort a run.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAddressInput {
    pub label: Option<String>,
    pub line1: Option<String>,
    pub line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

impl RawUser {
    /// Validate and split into the stored user plus its extracted addresses.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingRequiredField`] when `userId` or
    /// `email` is absent.
    pub fn validate(self, position: usize) -> Result<(User, Vec<Address>), PipelineError> {
        let ctx = || context("users", position);
        let user_id = self.user_id.ok_or_else(|| {
            PipelineError::missing(ctx(), "userId")
        })?;
        let email = self
            .email
            .ok_or_else(|| PipelineError::missing(ctx(), "email"))?;

        let extracted = addresses::extract(&user_id, &self.addresses);
        let user = User {
            user_id,
            email,
            name: self.name,
            profile: self.profile,
        };
        Ok((user, extracted))
    }
}

// ---------------------------------------------------------------------------
// Products
// ---------------------------------------------------------------------------

/// A raw `products.json` record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub sku: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "priceUSD")]
    pub price_usd: Option<Decimal>,
    /// `Option` so that an absent or null inventory is distinguishable from
    /// zero, which is a valid stock level.
    pub inventory: Option<i64>,
}

impl RawProduct {
    /// Validate into a stored [`Product`].
    ///
    /// # Errors
    ///
    /// Missing `sku`, `name`, `priceUSD`, or `inventory` is a
    /// [`PipelineError::MissingRequiredField`]; a negative price or
    /// inventory is a [`PipelineError::InvalidValue`].
    pub fn validate(self, position: usize) -> Result<Product, PipelineError> {
        let ctx = || context("products", position);
        let sku = self
            .sku
            .ok_or_else(|| PipelineError::missing(ctx(), "sku"))?;
        let name = self
            .name
            .ok_or_else(|| PipelineError::missing(ctx(), "name"))?;
        let price_usd = self
            .price_usd
            .ok_or_else(|| PipelineError::missing(ctx(), "priceUSD"))?;
        let inventory = self
            .inventory
            .ok_or_else(|| PipelineError::missing(ctx(), "inventory"))?;

        if price_usd < Decimal::ZERO {
            return Err(PipelineError::invalid(
                ctx(),
                "priceUSD",
                format!("must not be negative (sku `{sku}`)"),
            ));
        }
        if inventory < 0 {
            return Err(PipelineError::invalid(
                ctx(),
                "inventory",
                format!("must not be negative (sku `{sku}`)"),
            ));
        }

        Ok(Product {
            sku,
            name,
            price_usd,
            inventory,
        })
    }
}

// ---------------------------------------------------------------------------
// Discounts
// ---------------------------------------------------------------------------

/// A raw `discounts.json` record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDiscount {
    pub code: Option<String>,
    pub valid_from: Option<DateTime<Utc>>,
    pub valid_until: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawDiscount {
    /// Validate into a stored [`Discount`].
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingRequiredField`] when `code` is
    /// absent.
    pub fn validate(self, position: usize) -> Result<Discount, PipelineError> {
        let code = self
            .code
            .ok_or_else(|| PipelineError::missing(context("discounts", position), "code"))?;
        Ok(Discount {
            code,
            valid_from: self.valid_from,
            valid_until: self.valid_until,
            extra: self.extra,
        })
    }
}

// ---------------------------------------------------------------------------
// Orders
// ---------------------------------------------------------------------------

/// A raw `orders.json` record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub order_id: Option<String>,
    pub user_id: Option<String>,
    pub items: Option<Vec<RawOrderItem>>,
    pub tax_rate: Option<Decimal>,
    #[serde(rename = "shippingUSD")]
    pub shipping_usd: Option<Decimal>,
    pub status: Option<String>,
    pub placed_at: Option<DateTime<Utc>>,
}

/// One raw `{sku, qty}` order line.
#[derive(Debug, Deserialize)]
pub struct RawOrderItem {
    pub sku: Option<String>,
    pub qty: Option<u32>,
}

/// A validated-but-unexpanded order, ready for the line-item expander.
#[derive(Debug, Clone)]
pub struct OrderInput {
    pub order_id: String,
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub tax_rate: Option<Decimal>,
    pub shipping_usd: Option<Decimal>,
    pub status: Option<String>,
    pub placed_at: Option<DateTime<Utc>>,
}

impl RawOrder {
    /// Validate into an [`OrderInput`].
    ///
    /// Reference resolution (user, skus) happens later against the
    /// reference indexes; this only checks local shape.
    ///
    /// # Errors
    ///
    /// Missing `orderId`, `userId`, `items`, or any item's `sku`/`qty` is a
    /// [`PipelineError::MissingRequiredField`]; an empty `items` list is a
    /// [`PipelineError::InvalidValue`].
    pub fn validate(self, position: usize) -> Result<OrderInput, PipelineError> {
        let ctx = || context("orders", position);
        let order_id = self
            .order_id
            .ok_or_else(|| PipelineError::missing(ctx(), "orderId"))?;
        let user_id = self
            .user_id
            .ok_or_else(|| PipelineError::missing(ctx(), "userId"))?;
        let raw_items = self
            .items
            .ok_or_else(|| PipelineError::missing(ctx(), "items"))?;
        if raw_items.is_empty() {
            return Err(PipelineError::invalid(
                ctx(),
                "items",
                format!("must not be empty (order `{order_id}`)"),
            ));
        }

        let mut items = Vec::with_capacity(raw_items.len());
        for (i, item) in raw_items.into_iter().enumerate() {
            let sku = item
                .sku
                .ok_or_else(|| PipelineError::missing(ctx(), format!("items[{i}].sku")))?;
            let qty = item
                .qty
                .ok_or_else(|| PipelineError::missing(ctx(), format!("items[{i}].qty")))?;
            items.push(OrderItem { sku, qty });
        }

        Ok(OrderInput {
            order_id,
            user_id,
            items,
            tax_rate: self.tax_rate,
            shipping_usd: self.shipping_usd,
            status: self.status,
            placed_at: self.placed_at,
        })
    }
}

// ---------------------------------------------------------------------------
// Support tickets and replies
// ---------------------------------------------------------------------------

/// A raw `support-tickets.json` record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTicket {
    pub id: Option<String>,
    pub user_id: Option<String>,
    pub subject: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub read_at: Option<DateTime<Utc>>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub closed_at: Option<DateTime<Utc>>,
    pub last_reply_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawTicket {
    /// Validate into a stored [`SupportTicket`]. Each lifecycle timestamp is
    /// taken from the input when present and left null otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingRequiredField`] when `id`, `userId`,
    /// or `subject` is absent.
    pub fn validate(self, position: usize) -> Result<SupportTicket, PipelineError> {
        let ctx = || context("supportTickets", position);
        let id = self.id.ok_or_else(|| PipelineError::missing(ctx(), "id"))?;
        let user_id = self
            .user_id
            .ok_or_else(|| PipelineError::missing(ctx(), "userId"))?;
        let subject = self
            .subject
            .ok_or_else(|| PipelineError::missing(ctx(), "subject"))?;

        Ok(SupportTicket {
            id,
            user_id,
            subject,
            created_at: self.created_at,
            updated_at: self.updated_at,
            read_at: self.read_at,
            resolved_at: self.resolved_at,
            closed_at: self.closed_at,
            last_reply_at: self.last_reply_at,
            extra: self.extra,
        })
    }
}

/// A raw `ticket-replies.json` record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReply {
    pub id: Option<String>,
    pub ticket_id: Option<String>,
    pub user_id: Option<String>,
    pub message: Option<String>,
    pub attachments: Option<Vec<String>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RawReply {
    /// Validate into a stored [`clover_core::entities::TicketReply`];
    /// `createdAt` falls back to `now` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::MissingRequiredField`] when `id`,
    /// `ticketId`, or `userId` is absent.
    pub fn validate(
        self,
        position: usize,
        now: DateTime<Utc>,
    ) -> Result<clover_core::entities::TicketReply, PipelineError> {
        let ctx = || context("ticketReplies", position);
        let id = self.id.ok_or_else(|| PipelineError::missing(ctx(), "id"))?;
        let ticket_id = self
            .ticket_id
            .ok_or_else(|| PipelineError::missing(ctx(), "ticketId"))?;
        let user_id = self
            .user_id
            .ok_or_else(|| PipelineError::missing(ctx(), "userId"))?;

        Ok(clover_core::entities::TicketReply {
            id,
            ticket_id,
            user_id,
            message: self.message.unwrap_or_default(),
            attachments: self.attachments.unwrap_or_default(),
            created_at: self.created_at.unwrap_or(now),
        })
    }
}
