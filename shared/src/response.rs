//! Response payloads produced by the fulfillment engine

use serde::{Deserialize, Serialize};

/// Result of a successful order placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub order_id: String,
    pub subtotal: f64,
    pub discount: f64,
    pub amount: f64,
}

/// Result of a successful promo evaluation (no usage consumed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromoQuote {
    pub code: String,
    pub discount: f64,
    pub final_amount: f64,
}
