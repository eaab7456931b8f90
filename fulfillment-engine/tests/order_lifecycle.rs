//! End-to-end lifecycle over the public API: replenish → place → progress →
//! cancel, plus the inventory alerting queries.

use chrono::{Duration, Utc};
use fulfillment_engine::notify::{NotifierService, TracingNotifier};
use fulfillment_engine::stores::{CatalogStore, PromoStore};
use fulfillment_engine::{Config, InventoryService, MemoryStore, OrderCoordinator};
use shared::models::{
    DiscountType, FoodItem, OrderAddress, OrderStatus, OrderType, PaymentMethod, PromoCode,
};
use shared::request::{LineItemInput, PlaceOrderRequest};
use std::sync::Arc;

fn bare_item(id: &str, name: &str, price: f64) -> FoodItem {
    FoodItem {
        id: id.into(),
        name: name.into(),
        description: String::new(),
        price,
        image: String::new(),
        category: "Mains".into(),
        low_stock_threshold: 10,
        available: true,
        batches: vec![],
    }
}

fn setup() -> (OrderCoordinator, InventoryService, MemoryStore) {
    let store = MemoryStore::new();
    let notifier = NotifierService::spawn(Arc::new(TracingNotifier), 64);
    let coordinator = OrderCoordinator::with_memory(&store, notifier, Config::default());
    let inventory = InventoryService::new(
        Arc::new(store.clone()),
        coordinator.item_locks(),
        Config::default(),
    );
    (coordinator, inventory, store)
}

#[tokio::test]
async fn replenish_order_deliver_and_alerts() {
    let (coordinator, inventory, store) = setup();
    store.insert_item(bare_item("lumpia", "Lumpia", 60.0));

    // Replenish: one soon-to-expire batch, one long-dated batch
    inventory
        .add_batch(
            "lumpia",
            8,
            Utc::now() - Duration::days(2),
            Some(Utc::now() + Duration::days(3)),
        )
        .await
        .unwrap();
    inventory
        .add_batch(
            "lumpia",
            12,
            Utc::now() - Duration::days(1),
            Some(Utc::now() + Duration::days(30)),
        )
        .await
        .unwrap();

    let expiring = inventory.expiring_items().await.unwrap();
    assert_eq!(expiring.len(), 1);
    assert_eq!(expiring[0].quantity, 8);

    // 20 in stock, threshold 10: not low yet
    assert!(inventory.low_stock_items().await.unwrap().is_empty());

    let receipt = coordinator
        .place_order(PlaceOrderRequest {
            user_id: "maria".into(),
            items: vec![LineItemInput {
                item_id: "lumpia".into(),
                quantity: 11,
            }],
            address: OrderAddress {
                address: Some("45 Rizal Ave".into()),
                ..Default::default()
            },
            order_type: OrderType::Delivery,
            payment_method: PaymentMethod::GCash,
            promo_code: None,
            notes: "extra sauce".into(),
            from_cart: true,
        })
        .await
        .unwrap();
    assert_eq!(receipt.amount, 660.0);

    // Oldest batch fully drained, 9 left → now low on stock
    let item = store.get_item("lumpia").await.unwrap().unwrap();
    assert_eq!(item.batches.len(), 1);
    assert_eq!(item.batches[0].quantity, 9);
    assert_eq!(inventory.low_stock_items().await.unwrap().len(), 1);

    coordinator
        .update_status(&receipt.order_id, OrderStatus::OutForDelivery)
        .await
        .unwrap();
    coordinator
        .update_status(&receipt.order_id, OrderStatus::Delivered)
        .await
        .unwrap();

    let orders = coordinator.user_orders("maria").await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, OrderStatus::Delivered);
    assert!(orders[0].payment);
    assert_eq!(orders[0].notes, "extra sauce");
}

#[tokio::test]
async fn cancellation_round_trip_restores_the_ledger() {
    let (coordinator, inventory, store) = setup();
    store.insert_item(bare_item("kare", "Kare-Kare", 220.0));
    inventory
        .add_batch("kare", 10, Utc::now(), None)
        .await
        .unwrap();
    store.insert_promo(PromoCode {
        code: "FIESTA".into(),
        discount_type: DiscountType::Fixed,
        discount_value: 100.0,
        min_order_amount: 500.0,
        max_discount: None,
        usage_limit: Some(5),
        used_count: 0,
        valid_from: Utc::now() - Duration::days(1),
        valid_until: Utc::now() + Duration::days(1),
        is_active: true,
    });

    let receipt = coordinator
        .place_order(PlaceOrderRequest {
            user_id: "jose".into(),
            items: vec![LineItemInput {
                item_id: "kare".into(),
                quantity: 4,
            }],
            address: OrderAddress {
                table_number: Some("3".into()),
                ..Default::default()
            },
            order_type: OrderType::DineIn,
            payment_method: PaymentMethod::Cash,
            promo_code: Some("fiesta".into()),
            notes: String::new(),
            from_cart: false,
        })
        .await
        .unwrap();
    assert_eq!(receipt.subtotal, 880.0);
    assert_eq!(receipt.discount, 100.0);
    assert_eq!(receipt.amount, 780.0);

    let item = store.get_item("kare").await.unwrap().unwrap();
    assert_eq!(item.batches.iter().map(|b| b.quantity).sum::<i64>(), 6);

    coordinator
        .cancel_order(&receipt.order_id, Some("jose"))
        .await
        .unwrap();

    let item = store.get_item("kare").await.unwrap().unwrap();
    assert_eq!(item.batches.iter().map(|b| b.quantity).sum::<i64>(), 10);
    assert_eq!(
        store.get_promo("FIESTA").await.unwrap().unwrap().used_count,
        0
    );

    let orders = coordinator.user_orders("jose").await.unwrap();
    assert_eq!(orders[0].status, OrderStatus::Cancelled);
}
