//! Order coordinators — the transactional heart of the engine
//!
//! - **coordinator**: order placement and status transitions
//! - **cancel**: the compensating reversal path
//!
//! Stock mutation runs under per-item locks; status transitions and
//! cancellation additionally hold the order's own lock so the get→check→save
//! sequence cannot interleave (registries in [`crate::locks`]).
//!
//! # Placement flow
//!
//! 1. Validate the request (non-empty, positive quantities, address fields
//!    required by the order type)
//! 2. Acquire the per-item locks in sorted id order
//! 3. Check availability for every line item — no batch is touched until all
//!    lines are known to fit ("validate all, then mutate all")
//! 4. Evaluate the promo against the pre-discount subtotal
//! 5. Allocate FIFO and persist the catalog items, then the order record
//! 6. Post-commit, best-effort: promo usage increment, cart clear,
//!    confirmation notification — failures are logged, never surfaced

pub mod cancel;
pub mod coordinator;

use crate::inventory::StockError;
use crate::promo::PromoError;
use crate::stores::StoreError;
use shared::models::OrderStatus;
use thiserror::Error;

pub use coordinator::OrderCoordinator;

/// Order placement / transition failures
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("cannot place an empty order")]
    EmptyOrder,

    #[error("quantity must be positive for {item}, got {quantity}")]
    InvalidQuantity { item: String, quantity: i64 },

    #[error("item not found: {item_id}")]
    UnknownItem { item_id: String },

    #[error("missing required address field: {field}")]
    MissingAddress { field: &'static str },

    #[error("insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        available: i64,
        requested: i64,
    },

    #[error(transparent)]
    Promo(#[from] PromoError),

    #[error("order not found: {0}")]
    OrderNotFound(String),

    #[error("invalid status transition from {current:?} to {requested:?}")]
    InvalidState {
        current: OrderStatus,
        requested: OrderStatus,
    },

    #[error("order does not belong to the requesting user")]
    Unauthorized,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl OrderError {
    /// Attach the item name to a stock failure
    fn from_stock(err: StockError, item_name: &str) -> Self {
        match err {
            StockError::InsufficientStock {
                available,
                requested,
            } => Self::InsufficientStock {
                item: item_name.to_string(),
                available,
                requested,
            },
            StockError::InvalidQuantity(quantity) => Self::InvalidQuantity {
                item: item_name.to_string(),
                quantity,
            },
            StockError::BatchNotFound(id) => Self::Internal(format!("batch vanished: {id}")),
        }
    }
}
