//! Stock allocator — deterministic FIFO batch consumption
//!
//! Satisfies a requested quantity by draining the oldest-production-date
//! batches first, mirroring how perishable stock should leave the shelf.

use super::{StockError, ledger};
use shared::models::FoodItem;

/// One batch's contribution to an allocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchTake {
    pub batch_id: String,
    pub taken: i64,
}

/// Allocate `requested` units from the item's batches, oldest first.
///
/// Fails with [`StockError::InsufficientStock`] before touching anything if
/// total stock is short; on success the takes sum to `requested` exactly,
/// exhausted batches are dropped from the item, and partially consumed
/// batches keep their identity (id and dates) for subsequent allocations.
pub fn allocate(item: &mut FoodItem, requested: i64) -> Result<Vec<BatchTake>, StockError> {
    if requested <= 0 {
        return Err(StockError::InvalidQuantity(requested));
    }

    let available = ledger::total_stock(item);
    if available < requested {
        return Err(StockError::InsufficientStock {
            available,
            requested,
        });
    }

    // Oldest production date first; ties keep creation order
    item.batches
        .sort_by(|a, b| (a.production_date, a.created_at).cmp(&(b.production_date, b.created_at)));

    let mut remaining = requested;
    let mut takes = Vec::new();
    for batch in item.batches.iter_mut() {
        if remaining == 0 {
            break;
        }
        let take = batch.quantity.min(remaining);
        if take == 0 {
            continue;
        }
        batch.quantity -= take;
        remaining -= take;
        takes.push(BatchTake {
            batch_id: batch.id.clone(),
            taken: take,
        });
    }
    debug_assert_eq!(remaining, 0);

    item.batches.retain(|b| b.quantity > 0);
    Ok(takes)
}
