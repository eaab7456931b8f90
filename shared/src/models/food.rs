//! Food item and stock batch models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default low-stock alert threshold for new food items
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

/// A dated quantity of stock for one food item, the unit of FIFO consumption.
///
/// Batches are owned exclusively by their [`FoodItem`]; they are never shared
/// across items. Allocation order is production date ascending, ties broken by
/// creation order (`created_at`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    /// Remaining units in this batch, never negative
    pub quantity: i64,
    pub production_date: DateTime<Utc>,
    /// Absent means non-perishable
    pub expiration_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Batch {
    /// Create a new batch with a fresh id
    pub fn new(
        quantity: i64,
        production_date: DateTime<Utc>,
        expiration_date: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            quantity,
            production_date,
            expiration_date,
            created_at: Utc::now(),
        }
    }
}

/// Food item entity
///
/// Catalog fields are managed elsewhere; this crate mutates only `batches`.
/// Invariant: every batch quantity is `>= 0`, so total stock is too.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price
    pub price: f64,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default = "default_threshold")]
    pub low_stock_threshold: i64,
    #[serde(default = "default_true")]
    pub available: bool,
    #[serde(default)]
    pub batches: Vec<Batch>,
}

fn default_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

fn default_true() -> bool {
    true
}

/// One batch of an item inside the expiry alert window, with enough item
/// context for the alerting UI
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringBatch {
    pub item_id: String,
    pub batch_id: String,
    pub name: String,
    pub image: String,
    pub category: String,
    pub quantity: i64,
    pub production_date: DateTime<Utc>,
    pub expiration_date: DateTime<Utc>,
}
