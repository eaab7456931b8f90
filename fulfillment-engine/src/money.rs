//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary math runs on `Decimal` internally and converts back to `f64`
//! at the model boundary, rounded to 2 decimal places half-up.

use rust_decimal::prelude::*;
use shared::models::OrderLineItem;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 model value to Decimal (NaN/Infinity collapse to zero)
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Round a Decimal to money precision
#[inline]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Pre-discount order subtotal: Σ line price × quantity
pub fn subtotal(items: &[OrderLineItem]) -> Decimal {
    items
        .iter()
        .map(|li| round_money(to_decimal(li.price) * Decimal::from(li.quantity)))
        .sum()
}
