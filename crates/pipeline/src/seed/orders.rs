//! Line-item expansion: raw order items into priced lines and totals.

use chrono::{DateTime, Utc};
use clover_core::entities::{CustomerSnapshot, LineItem, Order, Product, User};
use clover_core::money::{round2, sum};
use rust_decimal::Decimal;

use crate::error::{PipelineError, RefKind};
use crate::seed::index::ReferenceIndex;
use crate::seed::records::OrderInput;

/// Expand one validated order into its fully derived stored form.
///
/// Rounding happens independently at each aggregation step, in this exact
/// order: line total, subtotal, tax, shipping, total. Summing unrounded line
/// totals and rounding once at the end can differ by a cent and is not the
/// contract the storefront expects.
///
/// Side-effect free: all lookups go through the in-memory indexes.
///
/// # Errors
///
/// - [`PipelineError::UnknownReference`] when `userId` or any item `sku`
///   does not resolve, naming the order and the missing key.
/// - [`PipelineError::InvalidValue`] when a resolved unit price is not
///   strictly positive, even if the product record itself allowed it.
pub fn expand_order(
    input: OrderInput,
    products: &ReferenceIndex<Product>,
    users: &ReferenceIndex<User>,
    now: DateTime<Utc>,
) -> Result<Order, PipelineError> {
    let user = users
        .get(&input.user_id)
        .ok_or_else(|| PipelineError::UnknownReference {
            order_id: input.order_id.clone(),
            kind: RefKind::User,
            key: input.user_id.clone(),
        })?;

    let mut items_expanded = Vec::with_capacity(input.items.len());
    for item in &input.items {
        let product =
            products
                .get(&item.sku)
                .ok_or_else(|| PipelineError::UnknownReference {
                    order_id: input.order_id.clone(),
                    kind: RefKind::Sku,
                    key: item.sku.clone(),
                })?;
        if product.price_usd <= Decimal::ZERO {
            return Err(PipelineError::invalid(
                format!("order `{}`", input.order_id),
                "unitPriceUSD",
                format!("resolved price for sku `{}` must be > 0", item.sku),
            ));
        }
        let line_total_usd = round2(product.price_usd * Decimal::from(item.qty));
        items_expanded.push(LineItem {
            sku: item.sku.clone(),
            name: product.name.clone(),
            qty: item.qty,
            unit_price_usd: round2(product.price_usd),
            line_total_usd,
        });
    }

    let subtotal_usd = round2(sum(items_expanded.iter().map(|line| line.line_total_usd)));
    let tax_rate = input.tax_rate.unwrap_or(Decimal::ZERO);
    let tax_usd = round2(subtotal_usd * tax_rate);
    let shipping_usd = round2(input.shipping_usd.unwrap_or(Decimal::ZERO));
    let total_usd = round2(subtotal_usd + tax_usd + shipping_usd);

    Ok(Order {
        order_id: input.order_id,
        user_id: input.user_id,
        items: input.items,
        items_expanded,
        subtotal_usd,
        tax_usd,
        shipping_usd,
        total_usd,
        tax_rate,
        currency: "USD".to_string(),
        status: input.status.unwrap_or_else(|| "paid".to_string()),
        placed_at: input.placed_at.unwrap_or(now),
        customer_snapshot: CustomerSnapshot {
            name: user.name.clone().unwrap_or_default(),
            email: user.email.clone(),
        },
    })
}
