//! Order transaction coordinator
//!
//! Owns the store handles and the per-item lock registry; every path that
//! touches batch quantities runs inside the locks so concurrent placements
//! against the same item cannot oversell.

use super::OrderError;
use crate::config::Config;
use crate::inventory::{allocator, ledger};
use crate::locks::KeyedLocks;
use crate::money;
use crate::notify::NotifierService;
use crate::promo;
use crate::stores::{CartStore, CatalogStore, MemoryStore, OrderStore, PromoStore};
use chrono::Utc;
use shared::models::{
    FoodItem, Notification, NotifyKind, Order, OrderAddress, OrderLineItem, OrderStatus,
    OrderType, PromoCode,
};
use shared::request::PlaceOrderRequest;
use shared::response::OrderReceipt;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Coordinates order placement, status transitions and (in
/// [`super::cancel`]) the compensating reversal path.
#[derive(Clone)]
pub struct OrderCoordinator {
    pub(super) catalog: Arc<dyn CatalogStore>,
    pub(super) orders: Arc<dyn OrderStore>,
    pub(super) promos: Arc<dyn PromoStore>,
    pub(super) carts: Arc<dyn CartStore>,
    pub(super) notifier: NotifierService,
    pub(super) item_locks: KeyedLocks,
    pub(super) order_locks: KeyedLocks,
    pub(super) config: Config,
}

impl OrderCoordinator {
    pub fn new(
        catalog: Arc<dyn CatalogStore>,
        orders: Arc<dyn OrderStore>,
        promos: Arc<dyn PromoStore>,
        carts: Arc<dyn CartStore>,
        notifier: NotifierService,
        config: Config,
    ) -> Self {
        Self {
            catalog,
            orders,
            promos,
            carts,
            notifier,
            item_locks: KeyedLocks::new(),
            order_locks: KeyedLocks::new(),
            config,
        }
    }

    /// Item lock registry, shared with [`crate::inventory::InventoryService`]
    /// so replenishment and order placement serialize on the same item
    pub fn item_locks(&self) -> KeyedLocks {
        self.item_locks.clone()
    }

    /// Wire every store role to one [`MemoryStore`]
    pub fn with_memory(store: &MemoryStore, notifier: NotifierService, config: Config) -> Self {
        Self::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            notifier,
            config,
        )
    }

    /// Place an order: all stock deductions, the promo check and the order
    /// record commit together or not at all.
    pub async fn place_order(&self, req: PlaceOrderRequest) -> Result<OrderReceipt, OrderError> {
        if req.items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        for li in &req.items {
            if li.quantity <= 0 {
                return Err(OrderError::InvalidQuantity {
                    item: li.item_id.clone(),
                    quantity: li.quantity,
                });
            }
        }
        validate_address(req.order_type, &req.address)?;

        let ids: Vec<&str> = req.items.iter().map(|li| li.item_id.as_str()).collect();
        let _guards = self.item_locks.lock_many(&ids).await;

        // Load each distinct item once; unknown ids fail the whole request
        let mut items: HashMap<String, FoodItem> = HashMap::new();
        for li in &req.items {
            if !items.contains_key(&li.item_id) {
                let item = self.catalog.get_item(&li.item_id).await?.ok_or_else(|| {
                    OrderError::UnknownItem {
                        item_id: li.item_id.clone(),
                    }
                })?;
                items.insert(li.item_id.clone(), item);
            }
        }

        // Availability pass over every line, in order, before any mutation.
        // `remaining` tracks what earlier lines of this order already claim.
        let mut remaining: HashMap<String, i64> = items
            .iter()
            .map(|(id, item)| (id.clone(), ledger::total_stock(item)))
            .collect();
        let mut line_items = Vec::with_capacity(req.items.len());
        for li in &req.items {
            let item = items
                .get(&li.item_id)
                .ok_or_else(|| OrderError::Internal(format!("item not loaded: {}", li.item_id)))?;
            let left = remaining
                .get_mut(&li.item_id)
                .ok_or_else(|| OrderError::Internal(format!("item not counted: {}", li.item_id)))?;
            if *left < li.quantity {
                return Err(OrderError::InsufficientStock {
                    item: item.name.clone(),
                    available: *left,
                    requested: li.quantity,
                });
            }
            *left -= li.quantity;

            // Snapshot the catalog row; the order must not change when the
            // catalog is edited later
            line_items.push(OrderLineItem {
                item_id: item.id.clone(),
                name: item.name.clone(),
                description: item.description.clone(),
                price: item.price,
                image: item.image.clone(),
                category: item.category.clone(),
                quantity: li.quantity,
            });
        }

        let subtotal = money::to_f64(money::subtotal(&line_items));

        // Promo is evaluated against the pre-discount subtotal and consumes
        // no usage yet; any failure aborts before stock is touched
        let mut discount = 0.0;
        let mut amount = subtotal;
        let mut promo_code = None;
        if let Some(code) = &req.promo_code {
            let normalized = PromoCode::normalize(code);
            let promo = self
                .promos
                .get_promo(&normalized)
                .await?
                .ok_or(OrderError::Promo(promo::PromoError::InvalidCode))?;
            let quote = promo::evaluate(&promo, subtotal, Utc::now())?;
            discount = quote.discount;
            amount = quote.final_amount;
            promo_code = Some(normalized);
        }

        // Mutation pass: every line already fits, so allocation cannot fail
        for li in &req.items {
            let item = items
                .get_mut(&li.item_id)
                .ok_or_else(|| OrderError::Internal(format!("item not loaded: {}", li.item_id)))?;
            allocator::allocate(&mut *item, li.quantity)
                .map_err(|e| OrderError::from_stock(e, &item.name))?;
        }
        for item in items.into_values() {
            if ledger::is_low_stock(&item) {
                tracing::warn!(item = %item.name, stock = ledger::total_stock(&item), "item low on stock");
            }
            self.catalog.save_item(item).await?;
        }

        let order = Order {
            id: Uuid::new_v4().to_string(),
            user_id: req.user_id.clone(),
            items: line_items,
            subtotal,
            discount,
            amount,
            promo_code: promo_code.clone(),
            address: req.address.clone(),
            order_type: req.order_type,
            payment_method: req.payment_method,
            status: OrderStatus::FoodProcessing,
            payment: false,
            notes: req.notes.clone(),
            date: Utc::now(),
        };
        let order_id = self.orders.create_order(order).await?;
        tracing::info!(order_id, user = %req.user_id, amount, "order placed");

        // The order is committed: everything below is best-effort
        if let Some(code) = &promo_code
            && let Err(e) = self.promos.increment_usage(code).await
        {
            tracing::warn!(code, error = %e, "failed to increment promo usage");
        }
        if req.from_cart
            && let Err(e) = self.carts.clear_cart(&req.user_id).await
        {
            tracing::warn!(user = %req.user_id, error = %e, "failed to clear cart");
        }
        self.notifier.dispatch(Notification::new(
            &req.user_id,
            NotifyKind::OrderPlaced,
            serde_json::json!({ "order_id": order_id, "amount": amount }),
        ));

        Ok(OrderReceipt {
            order_id,
            subtotal,
            discount,
            amount,
        })
    }

    /// Move an order forward through its lifecycle.
    ///
    /// Forward skips are allowed; reaching `Delivered` settles payment. Note
    /// that flipping to `Cancelled` through here performs no stock refund —
    /// that is [`cancel_order`](Self::cancel_order)'s job.
    pub async fn update_status(
        &self,
        order_id: &str,
        new_status: OrderStatus,
    ) -> Result<(), OrderError> {
        // The status read and the guarded write must not interleave with a
        // concurrent transition or cancellation of the same order
        let _guard = self.order_locks.lock(order_id).await;

        let mut order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;

        if !order.status.can_transition_to(new_status) {
            return Err(OrderError::InvalidState {
                current: order.status,
                requested: new_status,
            });
        }

        order.status = new_status;
        if new_status == OrderStatus::Delivered {
            order.payment = true;
        }
        self.orders.save_order(order.clone()).await?;
        tracing::info!(order_id, status = ?new_status, "order status updated");

        self.notifier.dispatch(Notification::new(
            &order.user_id,
            NotifyKind::StatusUpdated,
            serde_json::json!({ "order_id": order_id, "status": new_status }),
        ));
        Ok(())
    }

    /// All orders, newest first
    pub async fn list_orders(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.list_orders().await?)
    }

    /// One user's orders, newest first
    pub async fn user_orders(&self, user_id: &str) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.user_orders(user_id).await?)
    }
}

/// Check the address fields the order type requires
fn validate_address(order_type: OrderType, address: &OrderAddress) -> Result<(), OrderError> {
    let missing = |field| Err(OrderError::MissingAddress { field });
    match order_type {
        OrderType::Delivery => {
            if address.address.is_none() && address.street.is_none() {
                return missing("delivery address");
            }
        }
        OrderType::DineIn => {
            if address.table_number.is_none() {
                return missing("table number");
            }
        }
        OrderType::PreOrder => {
            if address.reservation_date.is_none() || address.reservation_time.is_none() {
                return missing("reservation date/time");
            }
        }
        OrderType::PickUp => {
            if address.name.is_none() && address.phone.is_none() {
                return missing("pickup contact");
            }
        }
    }
    Ok(())
}
