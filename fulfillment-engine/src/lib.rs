//! Order Fulfillment & Inventory Ledger engine
//!
//! The transactional core of the food-ordering system: batch-level stock
//! bookkeeping, FIFO allocation, promo evaluation, and the order placement /
//! cancellation coordinators that mutate all of it with all-or-nothing
//! semantics under concurrent requests.
//!
//! # Architecture
//!
//! ```text
//! PlaceOrderRequest → OrderCoordinator
//!       ├─ validate items + address
//!       ├─ lock line items (sorted id order)
//!       ├─ availability check for every line (no mutation yet)
//!       ├─ PromoEvaluator (pure, no usage consumed)
//!       ├─ FIFO allocation + catalog save
//!       ├─ order persisted (Food Processing)
//!       └─ post-commit, best-effort: promo usage, cart clear, notification
//! ```
//!
//! Stores are trait boundaries ([`stores`]); an in-memory implementation
//! backs tests and single-process deployments. Side effects cross the
//! [`notify`] boundary fire-and-forget and never fail the commit.

pub mod config;
pub mod inventory;
pub mod locks;
pub mod logger;
pub mod money;
pub mod notify;
pub mod orders;
pub mod promo;
pub mod stores;

// Re-exports
pub use config::Config;
pub use inventory::{InventoryService, StockError};
pub use locks::KeyedLocks;
pub use notify::NotifierService;
pub use orders::{OrderCoordinator, OrderError};
pub use promo::PromoError;
pub use stores::{CartStore, CatalogStore, MemoryStore, OrderStore, PromoStore, StoreError};
