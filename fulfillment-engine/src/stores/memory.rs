//! In-memory store backing tests and single-process deployments
//!
//! Keyed `DashMap`s give per-entry locking: every mutation through
//! `get_mut`/`entry` holds the entry's shard lock for the duration of the
//! update, which is what makes the promo usage counters single atomic
//! updates rather than read-modify-write.

use super::{CartStore, CatalogStore, OrderStore, PromoStore, StoreResult};
use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::Value;
use shared::models::{FoodItem, Order, PromoCode};
use std::sync::Arc;

/// One datastore for catalog, orders, promos and carts
#[derive(Clone, Default)]
pub struct MemoryStore {
    items: Arc<DashMap<String, FoodItem>>,
    orders: Arc<DashMap<String, Order>>,
    promos: Arc<DashMap<String, PromoCode>>,
    carts: Arc<DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a food item (catalog CRUD itself is out of scope)
    pub fn insert_item(&self, item: FoodItem) {
        self.items.insert(item.id.clone(), item);
    }

    /// Seed a promo code; the code is normalized on the way in
    pub fn insert_promo(&self, promo: PromoCode) {
        let mut promo = promo;
        promo.code = PromoCode::normalize(&promo.code);
        self.promos.insert(promo.code.clone(), promo);
    }

    /// Seed cart contents for a user
    pub fn set_cart(&self, user_id: &str, cart: Value) {
        self.carts.insert(user_id.to_string(), cart);
    }

    pub fn cart(&self, user_id: &str) -> Option<Value> {
        self.carts.get(user_id).map(|c| c.value().clone())
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn get_item(&self, id: &str) -> StoreResult<Option<FoodItem>> {
        Ok(self.items.get(id).map(|i| i.value().clone()))
    }

    async fn save_item(&self, item: FoodItem) -> StoreResult<()> {
        self.items.insert(item.id.clone(), item);
        Ok(())
    }

    async fn list_items(&self) -> StoreResult<Vec<FoodItem>> {
        Ok(self.items.iter().map(|i| i.value().clone()).collect())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    async fn create_order(&self, order: Order) -> StoreResult<String> {
        let id = order.id.clone();
        self.orders.insert(id.clone(), order);
        Ok(id)
    }

    async fn get_order(&self, id: &str) -> StoreResult<Option<Order>> {
        Ok(self.orders.get(id).map(|o| o.value().clone()))
    }

    async fn save_order(&self, order: Order) -> StoreResult<()> {
        self.orders.insert(order.id.clone(), order);
        Ok(())
    }

    async fn list_orders(&self) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self.orders.iter().map(|o| o.value().clone()).collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }

    async fn user_orders(&self, user_id: &str) -> StoreResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter(|o| o.user_id == user_id)
            .map(|o| o.value().clone())
            .collect();
        orders.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(orders)
    }
}

#[async_trait]
impl PromoStore for MemoryStore {
    async fn get_promo(&self, code: &str) -> StoreResult<Option<PromoCode>> {
        Ok(self
            .promos
            .get(&PromoCode::normalize(code))
            .map(|p| p.value().clone()))
    }

    async fn increment_usage(&self, code: &str) -> StoreResult<()> {
        if let Some(mut promo) = self.promos.get_mut(&PromoCode::normalize(code)) {
            promo.used_count = promo.used_count.saturating_add(1);
        }
        Ok(())
    }

    async fn decrement_usage(&self, code: &str) -> StoreResult<()> {
        if let Some(mut promo) = self.promos.get_mut(&PromoCode::normalize(code)) {
            promo.used_count = promo.used_count.saturating_sub(1);
        }
        Ok(())
    }
}

#[async_trait]
impl CartStore for MemoryStore {
    async fn clear_cart(&self, user_id: &str) -> StoreResult<()> {
        self.carts.remove(user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use shared::models::DiscountType;

    fn promo(code: &str) -> PromoCode {
        PromoCode {
            code: code.into(),
            discount_type: DiscountType::Fixed,
            discount_value: 50.0,
            min_order_amount: 0.0,
            max_discount: None,
            usage_limit: None,
            used_count: 0,
            valid_from: Utc::now() - Duration::days(1),
            valid_until: Utc::now() + Duration::days(1),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn promo_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        store.insert_promo(promo("save10"));

        let found = store.get_promo("  Save10 ").await.unwrap();
        assert_eq!(found.unwrap().code, "SAVE10");
    }

    #[tokio::test]
    async fn usage_decrement_floors_at_zero() {
        let store = MemoryStore::new();
        store.insert_promo(promo("SAVE10"));

        store.decrement_usage("SAVE10").await.unwrap();
        assert_eq!(store.get_promo("SAVE10").await.unwrap().unwrap().used_count, 0);

        store.increment_usage("SAVE10").await.unwrap();
        store.increment_usage("SAVE10").await.unwrap();
        store.decrement_usage("SAVE10").await.unwrap();
        assert_eq!(store.get_promo("SAVE10").await.unwrap().unwrap().used_count, 1);
    }

    #[tokio::test]
    async fn concurrent_increments_do_not_lose_updates() {
        let store = MemoryStore::new();
        store.insert_promo(promo("SAVE10"));

        let mut handles = Vec::new();
        for _ in 0..50 {
            let s = store.clone();
            handles.push(tokio::spawn(async move {
                s.increment_usage("SAVE10").await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        assert_eq!(
            store.get_promo("SAVE10").await.unwrap().unwrap().used_count,
            50
        );
    }

    #[tokio::test]
    async fn user_orders_filters_and_sorts_newest_first() {
        use shared::models::{OrderAddress, OrderStatus, OrderType, PaymentMethod};

        let store = MemoryStore::new();
        for (i, user) in ["alice", "bob", "alice"].iter().enumerate() {
            let order = Order {
                id: format!("order-{i}"),
                user_id: user.to_string(),
                items: vec![],
                subtotal: 0.0,
                discount: 0.0,
                amount: 0.0,
                promo_code: None,
                address: OrderAddress::default(),
                order_type: OrderType::Delivery,
                payment_method: PaymentMethod::Cash,
                status: OrderStatus::FoodProcessing,
                payment: false,
                notes: String::new(),
                date: Utc::now() + Duration::seconds(i as i64),
            };
            store.create_order(order).await.unwrap();
        }

        let alice = store.user_orders("alice").await.unwrap();
        assert_eq!(alice.len(), 2);
        assert_eq!(alice[0].id, "order-2"); // newest first
    }
}
