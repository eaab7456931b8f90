//! Shared types for the fulfillment engine
//!
//! Data models and request payloads used by the inventory ledger, the order
//! coordinators and any frontend or API layer that embeds them.

pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};
