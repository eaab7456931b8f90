//! Notification payloads emitted by the fulfillment engine
//!
//! These cross the notifier boundary as fire-and-forget messages; delivery
//! (email, in-app) is out of scope for this crate.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifyKind {
    OrderPlaced,
    StatusUpdated,
    OrderCancelled,
}

/// Notification addressed to one user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub user_id: String,
    pub kind: NotifyKind,
    pub payload: serde_json::Value,
}

impl Notification {
    pub fn new(user_id: impl Into<String>, kind: NotifyKind, payload: serde_json::Value) -> Self {
        Self {
            user_id: user_id.into(),
            kind,
            payload,
        }
    }
}
