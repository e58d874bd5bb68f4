//! Deterministic monetary rounding and aggregation.
//!
//! Every monetary field stored by the pipelines passes through [`round2`]
//! before it is written. Order totals are computed by rounding at each
//! aggregation step (line total, subtotal, tax, total) rather than once at
//! the end; summing unrounded line totals and rounding the result is *not*
//! equivalent and is not what the storefront expects.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round to exactly 2 decimal places, half away from zero on the decimal
/// value.
///
/// Decimal half-up rounding avoids the platform-dependent float surprises at
/// the `.005` boundary that banker's rounding (half-to-even) would introduce.
/// The result always carries scale 2, so `30` serializes as `"30.00"`.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Plain summation, applied before rounding.
#[must_use]
pub fn sum<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().sum()
}
