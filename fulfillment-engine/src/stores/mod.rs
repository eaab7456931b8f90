//! Store boundaries consumed by the fulfillment core
//!
//! Each trait is the minimal contract the coordinators need from the outside
//! world; [`MemoryStore`] implements all of them for tests and single-process
//! deployments. A database-backed implementation slots in behind the same
//! traits.

pub mod memory;

use async_trait::async_trait;
use shared::models::{FoodItem, Order, PromoCode};
use thiserror::Error;

pub use memory::MemoryStore;

/// Storage-layer failures, opaque to business logic
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Catalog access — read and write food items with their batches
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn get_item(&self, id: &str) -> StoreResult<Option<FoodItem>>;
    async fn save_item(&self, item: FoodItem) -> StoreResult<()>;
    async fn list_items(&self) -> StoreResult<Vec<FoodItem>>;
}

/// Order persistence — append-only plus status updates via `save_order`
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order, returning its id
    async fn create_order(&self, order: Order) -> StoreResult<String>;
    async fn get_order(&self, id: &str) -> StoreResult<Option<Order>>;
    async fn save_order(&self, order: Order) -> StoreResult<()>;
    async fn list_orders(&self) -> StoreResult<Vec<Order>>;
    async fn user_orders(&self, user_id: &str) -> StoreResult<Vec<Order>>;
}

/// Promo code access
///
/// Usage counters are adjusted at the store layer as single atomic updates,
/// not read-modify-write in application code, so concurrent redemptions
/// cannot lose increments.
#[async_trait]
pub trait PromoStore: Send + Sync {
    /// Lookup by normalized (upper-cased, trimmed) code
    async fn get_promo(&self, code: &str) -> StoreResult<Option<PromoCode>>;
    async fn increment_usage(&self, code: &str) -> StoreResult<()>;
    /// Decrement floored at zero
    async fn decrement_usage(&self, code: &str) -> StoreResult<()>;
}

/// Cart access, only used for customer-initiated orders
#[async_trait]
pub trait CartStore: Send + Sync {
    async fn clear_cart(&self, user_id: &str) -> StoreResult<()>;
}
