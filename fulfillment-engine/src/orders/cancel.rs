//! Order cancellation — the compensating reversal path
//!
//! Cancellation is a refund, not an undo: consumed batches are gone, so each
//! line item's quantity comes back as a fresh batch with a short default
//! shelf life. Promo usage is released and the order flips to `Cancelled`
//! only after the refunds are applied.

use super::coordinator::OrderCoordinator;
use super::OrderError;
use crate::inventory::ledger;
use chrono::{Duration, Utc};
use shared::models::{Notification, NotifyKind, OrderStatus};

impl OrderCoordinator {
    /// Cancel an order that is still in `Food Processing`.
    ///
    /// When `requesting_user` is supplied it must match the order's owner;
    /// staff paths pass `None`.
    pub async fn cancel_order(
        &self,
        order_id: &str,
        requesting_user: Option<&str>,
    ) -> Result<(), OrderError> {
        // Order lock first, item locks second (same order as update_status
        // vs. placement). The status check below is only sound while no
        // concurrent cancellation or transition can slip between it and the
        // final save.
        let _order_guard = self.order_locks.lock(order_id).await;

        let mut order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;

        if let Some(user) = requesting_user
            && user != order.user_id
        {
            return Err(OrderError::Unauthorized);
        }
        if order.status != OrderStatus::FoodProcessing {
            return Err(OrderError::InvalidState {
                current: order.status,
                requested: OrderStatus::Cancelled,
            });
        }

        let ids: Vec<&str> = order.items.iter().map(|li| li.item_id.as_str()).collect();
        let _guards = self.item_locks.lock_many(&ids).await;

        // Refund each line as a new batch dated now. A catalog row deleted
        // since the order was placed has nowhere to receive stock; log and
        // move on rather than blocking the cancellation.
        let now = Utc::now();
        let shelf_life = Duration::days(self.config.refund_shelf_life_days);
        for li in &order.items {
            let Some(mut item) = self.catalog.get_item(&li.item_id).await? else {
                tracing::warn!(item_id = %li.item_id, order_id, "refund skipped, item no longer in catalog");
                continue;
            };
            ledger::add_batch(&mut item, li.quantity, now, Some(now + shelf_life))
                .map_err(|e| OrderError::from_stock(e, &item.name))?;
            self.catalog.save_item(item).await?;
        }

        if let Some(code) = &order.promo_code {
            self.promos.decrement_usage(code).await?;
        }

        order.status = OrderStatus::Cancelled;
        self.orders.save_order(order.clone()).await?;
        tracing::info!(order_id, user = %order.user_id, "order cancelled");

        self.notifier.dispatch(Notification::new(
            &order.user_id,
            NotifyKind::OrderCancelled,
            serde_json::json!({ "order_id": order_id }),
        ));
        Ok(())
    }
}
