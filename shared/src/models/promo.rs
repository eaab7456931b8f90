//! Promo code model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// A discount voucher with validity window, usage cap and minimum-order
/// constraint.
///
/// Invariants: `used_count` never goes negative and, concurrency caveats
/// aside, never exceeds `usage_limit` once a limit is set. Codes are stored
/// upper-cased and matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromoCode {
    /// Unique code string, stored upper-cased
    pub code: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    #[serde(default)]
    pub min_order_amount: f64,
    /// Cap on the computed discount, percentage type only
    pub max_discount: Option<f64>,
    /// Absent means unlimited redemptions
    pub usage_limit: Option<u64>,
    #[serde(default)]
    pub used_count: u64,
    pub valid_from: DateTime<Utc>,
    pub valid_until: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

impl PromoCode {
    /// Canonical form used for storage and lookup
    pub fn normalize(code: &str) -> String {
        code.trim().to_uppercase()
    }
}
