//! Data models
//!
//! Shared between the fulfillment engine and frontends (via API).
//! All IDs are opaque `String`s; monetary values are `f64` at the model
//! boundary and computed with `rust_decimal` inside the engine.

pub mod food;
pub mod notification;
pub mod order;
pub mod promo;

// Re-exports
pub use food::*;
pub use notification::*;
pub use order::*;
pub use promo::*;
