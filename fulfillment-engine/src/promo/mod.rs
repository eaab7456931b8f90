//! Promo evaluator — validity checks and discount math
//!
//! Evaluation is pure: it never touches `used_count`. Usage is committed by
//! the order coordinator only after the order is durably persisted, so a
//! failed placement never consumes promo usage.

use crate::money::{round_money, to_decimal, to_f64};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{DiscountType, PromoCode};
use shared::response::PromoQuote;
use thiserror::Error;

/// Promo application failures, one per distinct validation step
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PromoError {
    #[error("invalid promo code")]
    InvalidCode,

    #[error("this promo code is no longer active")]
    Inactive,

    #[error("this promo code has expired or is not yet valid")]
    OutOfWindow,

    #[error("this promo code has reached its usage limit")]
    LimitReached,

    #[error("minimum order amount of ₱{minimum} required")]
    BelowMinimum { minimum: f64 },
}

/// Validate a promo code against an order amount and compute the discount.
///
/// Checks run in a fixed order so callers get the most specific failure:
/// active flag, validity window, usage cap, minimum order amount. The final
/// discount is clamped to `max_discount` (percentage type) and then to the
/// order amount itself — a discount can never push the total negative.
pub fn evaluate(
    promo: &PromoCode,
    order_amount: f64,
    now: DateTime<Utc>,
) -> Result<PromoQuote, PromoError> {
    if !promo.is_active {
        return Err(PromoError::Inactive);
    }
    if now < promo.valid_from || now > promo.valid_until {
        return Err(PromoError::OutOfWindow);
    }
    if let Some(limit) = promo.usage_limit
        && promo.used_count >= limit
    {
        return Err(PromoError::LimitReached);
    }

    let amount = to_decimal(order_amount);
    let minimum = to_decimal(promo.min_order_amount);
    if amount < minimum {
        return Err(PromoError::BelowMinimum {
            minimum: promo.min_order_amount,
        });
    }

    let mut discount = match promo.discount_type {
        DiscountType::Percentage => {
            let raw = round_money(amount * to_decimal(promo.discount_value) / Decimal::ONE_HUNDRED);
            match promo.max_discount.map(to_decimal) {
                Some(cap) if raw > cap => cap,
                _ => raw,
            }
        }
        DiscountType::Fixed => to_decimal(promo.discount_value),
    };

    // Discount can never exceed the order amount
    if discount > amount {
        discount = amount;
    }

    Ok(PromoQuote {
        code: promo.code.clone(),
        discount: to_f64(discount),
        final_amount: to_f64(amount - discount),
    })
}
