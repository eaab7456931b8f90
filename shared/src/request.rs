//! Request payloads accepted by the fulfillment engine

use crate::models::{OrderAddress, OrderType, PaymentMethod};
use serde::{Deserialize, Serialize};

/// One requested line item as submitted by the caller
///
/// Name/price/image/category are snapshotted into the order; the engine
/// re-reads them from the catalog so a stale client cannot fix prices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemInput {
    pub item_id: String,
    pub quantity: i64,
}

/// Order placement request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    /// Ordering customer; staff-entered dine-in orders carry the operator id
    pub user_id: String,
    pub items: Vec<LineItemInput>,
    #[serde(default)]
    pub address: OrderAddress,
    pub order_type: OrderType,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    pub promo_code: Option<String>,
    #[serde(default)]
    pub notes: String,
    /// Whether the order originated from the user's cart (cleared on success).
    /// Staff-entered dine-in orders have no cart.
    #[serde(default)]
    pub from_cart: bool,
}
