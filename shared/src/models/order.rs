//! Order models and the order status state machine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fulfillment channel, determines which address/context fields are required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Delivery,
    #[serde(rename = "Pick Up")]
    PickUp,
    #[serde(rename = "Pre-Order")]
    PreOrder,
    #[serde(rename = "Dine In")]
    DineIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "GCash")]
    GCash,
}

impl Default for PaymentMethod {
    fn default() -> Self {
        Self::Cash
    }
}

/// Order lifecycle status
///
/// Forward-only progression; `Cancelled` is terminal and reachable only from
/// `FoodProcessing`. Skipping forward (e.g. straight to `Delivered`) is
/// allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Food Processing")]
    FoodProcessing,
    #[serde(rename = "Food Ready")]
    FoodReady,
    #[serde(rename = "Out for Delivery")]
    OutForDelivery,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Position in the forward progression; `Cancelled` has no rank
    fn rank(self) -> Option<u8> {
        match self {
            Self::FoodProcessing => Some(0),
            Self::FoodReady => Some(1),
            Self::OutForDelivery => Some(2),
            Self::Delivered => Some(3),
            Self::Cancelled => None,
        }
    }

    /// Whether a transition from `self` to `next` is permitted
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        match (self.rank(), next.rank()) {
            // Cancellation only out of FoodProcessing
            (_, None) => self == Self::FoodProcessing,
            // Nothing leaves Cancelled
            (None, _) => false,
            (Some(from), Some(to)) => to > from,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// Frozen copy of a catalog row at order time
///
/// Intentionally decoupled from the live [`super::FoodItem`] so later catalog
/// edits do not retroactively change historical orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineItem {
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub category: String,
    pub quantity: i64,
}

/// Address/context payload, shape varies by order type
///
/// A single flattened struct rather than an enum per order type: the original
/// data keeps all fields in one subdocument and the coordinator validates the
/// ones the order type requires.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderAddress {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free-form delivery address
    pub address: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub country: Option<String>,
    /// Dine-in
    pub table_number: Option<String>,
    /// Pre-order reservation
    pub reservation_date: Option<String>,
    pub reservation_time: Option<String>,
    pub party_size: Option<u32>,
}

/// Order record — an append-only ledger of business events, never deleted.
/// Mutated only by status transitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderLineItem>,
    /// Pre-discount total
    pub subtotal: f64,
    #[serde(default)]
    pub discount: f64,
    /// Final amount after discount
    pub amount: f64,
    pub promo_code: Option<String>,
    pub address: OrderAddress,
    pub order_type: OrderType,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    /// Payment settled flag, set when the order reaches `Delivered`
    #[serde(default)]
    pub payment: bool,
    #[serde(default)]
    pub notes: String,
    pub date: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_transitions_allowed() {
        assert!(OrderStatus::FoodProcessing.can_transition_to(OrderStatus::FoodReady));
        assert!(OrderStatus::FoodReady.can_transition_to(OrderStatus::OutForDelivery));
        assert!(OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn forward_skip_allowed() {
        assert!(OrderStatus::FoodProcessing.can_transition_to(OrderStatus::Delivered));
        assert!(OrderStatus::FoodReady.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn backward_transitions_rejected() {
        assert!(!OrderStatus::FoodReady.can_transition_to(OrderStatus::FoodProcessing));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::OutForDelivery));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Delivered));
    }

    #[test]
    fn cancel_only_from_food_processing() {
        assert!(OrderStatus::FoodProcessing.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::FoodReady.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::OutForDelivery.can_transition_to(OrderStatus::Cancelled));
        assert!(!OrderStatus::Delivered.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn cancelled_is_terminal() {
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::FoodProcessing));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Delivered));
        assert!(!OrderStatus::Cancelled.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn status_serializes_with_display_names() {
        let json = serde_json::to_string(&OrderStatus::FoodProcessing).unwrap();
        assert_eq!(json, "\"Food Processing\"");
        let json = serde_json::to_string(&OrderStatus::OutForDelivery).unwrap();
        assert_eq!(json, "\"Out for Delivery\"");
    }
}
