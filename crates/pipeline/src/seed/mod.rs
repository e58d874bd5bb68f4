//! The seed pipeline: load, validate, enrich, and batch-write seed data.
//!
//! Collections are processed in strict dependency order:
//!
//! ```text
//! users -> products -> discounts -> orders -> supportTickets -> ticketReplies
//! ```
//!
//! Orders must follow users and products because line-item expansion needs
//! both reference indexes. Tickets and replies have no cross-collection
//! dependency and simply stay last. A fatal error in any stage halts the
//! run at that stage; writes from earlier stages persist.

pub mod addresses;
pub mod index;
pub mod loader;
pub mod orders;
pub mod records;
pub mod writer;

use std::collections::BTreeSet;
use std::path::Path;

use chrono::Utc;
use clover_core::entities::{Address, Discount, Order, Product, SupportTicket, TicketReply, User};
use clover_store::{DocumentStore, collections};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, instrument};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::seed::index::ReferenceIndex;

/// One seedable collection group, selectable from the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeedTarget {
    Users,
    Products,
    Discounts,
    Orders,
    Tickets,
    Replies,
}

impl SeedTarget {
    /// Every target, in dependency order.
    pub const ALL: [Self; 6] = [
        Self::Users,
        Self::Products,
        Self::Discounts,
        Self::Orders,
        Self::Tickets,
        Self::Replies,
    ];

    /// The seed file holding this target's records.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Users => "users.json",
            Self::Products => "products.json",
            Self::Discounts => "discounts.json",
            Self::Orders => "orders.json",
            Self::Tickets => "support-tickets.json",
            Self::Replies => "ticket-replies.json",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Products => "products",
            Self::Discounts => "discounts",
            Self::Orders => "orders",
            Self::Tickets => "tickets",
            Self::Replies => "replies",
        }
    }
}

impl std::str::FromStr for SeedTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "users" => Ok(Self::Users),
            "products" => Ok(Self::Products),
            "discounts" => Ok(Self::Discounts),
            "orders" => Ok(Self::Orders),
            "tickets" => Ok(Self::Tickets),
            "replies" => Ok(Self::Replies),
            other => Err(format!(
                "unknown seed target `{other}` (expected one of: users, products, discounts, orders, tickets, replies)"
            )),
        }
    }
}

/// Documents written per collection during one seed run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub users: usize,
    pub addresses: usize,
    pub products: usize,
    pub discounts: usize,
    pub orders: usize,
    pub tickets: usize,
    pub replies: usize,
}

impl SeedReport {
    /// Total documents written across all collections.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.users
            + self.addresses
            + self.products
            + self.discounts
            + self.orders
            + self.tickets
            + self.replies
    }
}

/// Run the seed pipeline.
///
/// `targets` restricts which collections are written; an empty slice means
/// all of them. When orders are selected, the users and products files are
/// still loaded and validated (without being written) because expansion
/// needs both reference indexes.
///
/// Re-running with unchanged input is idempotent: every document is upserted
/// by its stable key, so nothing duplicates and unchanged fields survive.
///
/// # Errors
///
/// Any error from loading, validation, expansion, or a chunk commit halts
/// the pipeline at the current stage; earlier stages' writes persist.
#[instrument(skip_all, fields(seed_dir = %seed_dir.display()))]
pub async fn run_seed<S: DocumentStore>(
    store: &S,
    seed_dir: &Path,
    targets: &[SeedTarget],
    config: &PipelineConfig,
) -> Result<SeedReport, PipelineError> {
    let selected: BTreeSet<SeedTarget> = if targets.is_empty() {
        SeedTarget::ALL.into_iter().collect()
    } else {
        targets.iter().copied().collect()
    };
    let now = Utc::now();
    let chunk = config.seed_chunk_size;
    let mut report = SeedReport::default();

    // Stage 1: users (loaded whenever written or needed for the user index).
    let orders_selected = selected.contains(&SeedTarget::Orders);
    let mut users: Vec<User> = Vec::new();
    let mut extracted: Vec<Address> = Vec::new();
    if selected.contains(&SeedTarget::Users) || orders_selected {
        for (position, value) in load(seed_dir, SeedTarget::Users).await?.into_iter().enumerate() {
            let raw: records::RawUser = records::decode("users", position, value)?;
            let (user, addrs) = raw.validate(position)?;
            users.push(user);
            extracted.extend(addrs);
        }
    }
    if selected.contains(&SeedTarget::Users) {
        report.users =
            writer::write_batches(store, collections::USERS, to_writes(&users, User::doc_id)?, chunk)
                .await?;
        report.addresses = writer::write_batches(
            store,
            collections::ADDRESSES,
            to_writes(&extracted, |a| a.id.as_str())?,
            chunk,
        )
        .await?;
        info!(
            users = report.users,
            addresses = report.addresses,
            "Seeded users and extracted addresses"
        );
    }

    // Stage 2: products.
    let mut products: Vec<Product> = Vec::new();
    if selected.contains(&SeedTarget::Products) || orders_selected {
        for (position, value) in load(seed_dir, SeedTarget::Products)
            .await?
            .into_iter()
            .enumerate()
        {
            let raw: records::RawProduct = records::decode("products", position, value)?;
            products.push(raw.validate(position)?);
        }
    }
    if selected.contains(&SeedTarget::Products) {
        report.products = writer::write_batches(
            store,
            collections::PRODUCTS,
            to_writes(&products, Product::doc_id)?,
            chunk,
        )
        .await?;
        info!(products = report.products, "Seeded products");
    }

    // Stage 3: discounts.
    if selected.contains(&SeedTarget::Discounts) {
        let mut discounts: Vec<Discount> = Vec::new();
        for (position, value) in load(seed_dir, SeedTarget::Discounts)
            .await?
            .into_iter()
            .enumerate()
        {
            let raw: records::RawDiscount = records::decode("discounts", position, value)?;
            discounts.push(raw.validate(position)?);
        }
        report.discounts = writer::write_batches(
            store,
            collections::DISCOUNTS,
            to_writes(&discounts, Discount::doc_id)?,
            chunk,
        )
        .await?;
        info!(discounts = report.discounts, "Seeded discounts");
    }

    // Stage 4: orders, expanded against the user and product indexes.
    if orders_selected {
        let user_index = ReferenceIndex::build(users, |u| u.user_id.as_str());
        let product_index = ReferenceIndex::build(products, |p| p.sku.as_str());

        let mut expanded: Vec<Order> = Vec::new();
        for (position, value) in load(seed_dir, SeedTarget::Orders)
            .await?
            .into_iter()
            .enumerate()
        {
            let raw: records::RawOrder = records::decode("orders", position, value)?;
            let input = raw.validate(position)?;
            expanded.push(orders::expand_order(input, &product_index, &user_index, now)?);
        }
        report.orders = writer::write_batches(
            store,
            collections::ORDERS,
            to_writes(&expanded, Order::doc_id)?,
            chunk,
        )
        .await?;
        info!(orders = report.orders, "Seeded orders");
    }

    // Stage 5: support tickets.
    if selected.contains(&SeedTarget::Tickets) {
        let mut tickets: Vec<SupportTicket> = Vec::new();
        for (position, value) in load(seed_dir, SeedTarget::Tickets)
            .await?
            .into_iter()
            .enumerate()
        {
            let raw: records::RawTicket = records::decode("supportTickets", position, value)?;
            tickets.push(raw.validate(position)?);
        }
        report.tickets = writer::write_batches(
            store,
            collections::SUPPORT_TICKETS,
            to_writes(&tickets, SupportTicket::doc_id)?,
            chunk,
        )
        .await?;
        info!(tickets = report.tickets, "Seeded support tickets");
    }

    // Stage 6: ticket replies.
    if selected.contains(&SeedTarget::Replies) {
        let mut replies: Vec<TicketReply> = Vec::new();
        for (position, value) in load(seed_dir, SeedTarget::Replies)
            .await?
            .into_iter()
            .enumerate()
        {
            let raw: records::RawReply = records::decode("ticketReplies", position, value)?;
            replies.push(raw.validate(position, now)?);
        }
        report.replies = writer::write_batches(
            store,
            collections::TICKET_REPLIES,
            to_writes(&replies, TicketReply::doc_id)?,
            chunk,
        )
        .await?;
        info!(replies = report.replies, "Seeded ticket replies");
    }

    info!(total = report.total(), "Seed run complete");
    Ok(report)
}

async fn load(seed_dir: &Path, target: SeedTarget) -> Result<Vec<Value>, PipelineError> {
    loader::load_records(&seed_dir.join(target.file_name())).await
}

fn to_writes<'a, T, F>(items: &'a [T], id: F) -> Result<Vec<(String, Value)>, PipelineError>
where
    T: Serialize,
    F: Fn(&'a T) -> &'a str,
{
    items
        .iter()
        .map(|item| Ok((id(item).to_string(), serde_json::to_value(item)?)))
        .collect()
}
