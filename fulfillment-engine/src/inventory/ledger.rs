//! Batch ledger — per-item stock bookkeeping and alerting queries

use super::StockError;
use chrono::{DateTime, Duration, Utc};
use shared::models::{Batch, ExpiringBatch, FoodItem};

/// Total stock for an item: sum of all batch quantities. Side-effect free.
pub fn total_stock(item: &FoodItem) -> i64 {
    item.batches.iter().map(|b| b.quantity).sum()
}

/// Whether the item is at or below its low-stock threshold
pub fn is_low_stock(item: &FoodItem) -> bool {
    total_stock(item) <= item.low_stock_threshold
}

/// Items at or below their low-stock threshold
pub fn low_stock_items(items: Vec<FoodItem>) -> Vec<FoodItem> {
    items.into_iter().filter(is_low_stock).collect()
}

/// Every batch whose expiration date falls within `[today, today + days]`
/// inclusive, across all items. Batches without an expiration date are
/// excluded. Used by alerting; not transactional.
pub fn expiring_within(items: &[FoodItem], days: i64) -> Vec<ExpiringBatch> {
    let now = Utc::now();
    let horizon = now + Duration::days(days);

    let mut expiring = Vec::new();
    for item in items {
        for batch in &item.batches {
            let Some(exp) = batch.expiration_date else {
                continue;
            };
            if exp >= now && exp <= horizon {
                expiring.push(ExpiringBatch {
                    item_id: item.id.clone(),
                    batch_id: batch.id.clone(),
                    name: item.name.clone(),
                    image: item.image.clone(),
                    category: item.category.clone(),
                    quantity: batch.quantity,
                    production_date: batch.production_date,
                    expiration_date: exp,
                });
            }
        }
    }
    expiring
}

/// Append a new batch; the quantity must be a positive integer
pub fn add_batch(
    item: &mut FoodItem,
    quantity: i64,
    production_date: DateTime<Utc>,
    expiration_date: Option<DateTime<Utc>>,
) -> Result<(), StockError> {
    if quantity <= 0 {
        return Err(StockError::InvalidQuantity(quantity));
    }
    item.batches
        .push(Batch::new(quantity, production_date, expiration_date));
    Ok(())
}

/// Delete one batch unconditionally — manual correction path, no
/// stock-sufficiency check
pub fn remove_batch(item: &mut FoodItem, batch_id: &str) -> Result<(), StockError> {
    let before = item.batches.len();
    item.batches.retain(|b| b.id != batch_id);
    if item.batches.len() == before {
        return Err(StockError::BatchNotFound(batch_id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_batches(batches: Vec<Batch>) -> FoodItem {
        FoodItem {
            id: "food-1".into(),
            name: "Adobo".into(),
            description: String::new(),
            price: 150.0,
            image: String::new(),
            category: "Mains".into(),
            low_stock_threshold: 10,
            available: true,
            batches,
        }
    }

    fn batch(qty: i64, expires_in_days: Option<i64>) -> Batch {
        Batch::new(
            qty,
            Utc::now() - Duration::days(1),
            expires_in_days.map(|d| Utc::now() + Duration::days(d)),
        )
    }

    #[test]
    fn total_stock_sums_batches() {
        let item = item_with_batches(vec![batch(5, None), batch(7, None)]);
        assert_eq!(total_stock(&item), 12);
    }

    #[test]
    fn total_stock_of_batchless_item_is_zero() {
        let item = item_with_batches(vec![]);
        assert_eq!(total_stock(&item), 0);
    }

    #[test]
    fn low_stock_is_inclusive_of_threshold() {
        let exactly = item_with_batches(vec![batch(10, None)]);
        assert!(is_low_stock(&exactly));

        let above = item_with_batches(vec![batch(11, None)]);
        assert!(!is_low_stock(&above));
    }

    #[test]
    fn expiring_window_is_inclusive_and_skips_dateless() {
        let item = item_with_batches(vec![
            batch(3, Some(2)),  // inside window
            batch(4, Some(30)), // outside window
            batch(5, None),     // non-perishable
        ]);
        let expiring = expiring_within(std::slice::from_ref(&item), 7);
        assert_eq!(expiring.len(), 1);
        assert_eq!(expiring[0].quantity, 3);
        assert_eq!(expiring[0].item_id, "food-1");
    }

    #[test]
    fn already_expired_batches_are_not_reported() {
        let item = item_with_batches(vec![batch(3, Some(-1))]);
        assert!(expiring_within(std::slice::from_ref(&item), 7).is_empty());
    }

    #[test]
    fn add_batch_rejects_non_positive_quantity() {
        let mut item = item_with_batches(vec![]);
        assert_eq!(
            add_batch(&mut item, 0, Utc::now(), None),
            Err(StockError::InvalidQuantity(0))
        );
        assert_eq!(
            add_batch(&mut item, -3, Utc::now(), None),
            Err(StockError::InvalidQuantity(-3))
        );
        assert!(item.batches.is_empty());
    }

    #[test]
    fn add_batch_appends() {
        let mut item = item_with_batches(vec![]);
        add_batch(&mut item, 20, Utc::now(), None).unwrap();
        assert_eq!(total_stock(&item), 20);
    }

    #[test]
    fn remove_batch_deletes_without_sufficiency_check() {
        let mut item = item_with_batches(vec![batch(5, None)]);
        let id = item.batches[0].id.clone();
        remove_batch(&mut item, &id).unwrap();
        assert_eq!(total_stock(&item), 0);
    }

    #[test]
    fn remove_batch_unknown_id_errors() {
        let mut item = item_with_batches(vec![batch(5, None)]);
        assert_eq!(
            remove_batch(&mut item, "nope"),
            Err(StockError::BatchNotFound("nope".into()))
        );
        assert_eq!(item.batches.len(), 1);
    }
}
