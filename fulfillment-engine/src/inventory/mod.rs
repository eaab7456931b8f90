//! Inventory module — batch ledger and FIFO stock allocator
//!
//! - **ledger**: per-item batch bookkeeping and the low-stock / expiry-window
//!   queries
//! - **allocator**: deterministic oldest-first batch consumption
//!
//! Ledger and allocator operate on `FoodItem` values in memory; persistence
//! goes through [`crate::stores::CatalogStore`], wrapped here by
//! [`InventoryService`] for the store-level operations.

pub mod allocator;
pub mod ledger;

use crate::config::Config;
use crate::locks::KeyedLocks;
use crate::stores::{CatalogStore, StoreError};
use chrono::{DateTime, Utc};
use shared::models::{ExpiringBatch, FoodItem};
use std::sync::Arc;
use thiserror::Error;

pub use allocator::{BatchTake, allocate};

/// Stock bookkeeping errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StockError {
    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("insufficient stock: available {available}, requested {requested}")]
    InsufficientStock { available: i64, requested: i64 },

    #[error("batch not found: {0}")]
    BatchNotFound(String),
}

/// Inventory errors at the store boundary
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("food item not found: {0}")]
    ItemNotFound(String),

    #[error(transparent)]
    Stock(#[from] StockError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Store-backed inventory operations: replenishment, manual corrections and
/// the alerting queries
#[derive(Clone)]
pub struct InventoryService {
    catalog: Arc<dyn CatalogStore>,
    /// Shared with the order coordinator (see
    /// [`crate::orders::OrderCoordinator::item_locks`]): replenishment and
    /// order placement are both read-modify-writes on the same catalog rows
    locks: KeyedLocks,
    config: Config,
}

impl InventoryService {
    pub fn new(catalog: Arc<dyn CatalogStore>, locks: KeyedLocks, config: Config) -> Self {
        Self {
            catalog,
            locks,
            config,
        }
    }

    /// Append a replenishment batch to an item and persist it
    pub async fn add_batch(
        &self,
        item_id: &str,
        quantity: i64,
        production_date: DateTime<Utc>,
        expiration_date: Option<DateTime<Utc>>,
    ) -> Result<FoodItem, InventoryError> {
        let _guard = self.locks.lock(item_id).await;
        let mut item = self
            .catalog
            .get_item(item_id)
            .await?
            .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))?;

        ledger::add_batch(&mut item, quantity, production_date, expiration_date)?;
        self.catalog.save_item(item.clone()).await?;

        tracing::info!(item = %item.name, quantity, "batch added");
        Ok(item)
    }

    /// Remove one batch unconditionally (manual correction path)
    pub async fn remove_batch(
        &self,
        item_id: &str,
        batch_id: &str,
    ) -> Result<FoodItem, InventoryError> {
        let _guard = self.locks.lock(item_id).await;
        let mut item = self
            .catalog
            .get_item(item_id)
            .await?
            .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))?;

        ledger::remove_batch(&mut item, batch_id)?;
        self.catalog.save_item(item.clone()).await?;

        tracing::info!(item = %item.name, batch_id, "batch removed");
        Ok(item)
    }

    /// Items at or below their low-stock threshold
    pub async fn low_stock_items(&self) -> Result<Vec<FoodItem>, InventoryError> {
        let items = self.catalog.list_items().await?;
        Ok(ledger::low_stock_items(items))
    }

    /// Batches expiring within the configured alert window
    pub async fn expiring_items(&self) -> Result<Vec<ExpiringBatch>, InventoryError> {
        let items = self.catalog.list_items().await?;
        Ok(ledger::expiring_within(
            &items,
            self.config.expiry_alert_days,
        ))
    }
}
