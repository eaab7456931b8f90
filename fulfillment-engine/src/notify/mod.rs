//! Notifier boundary — fire-and-forget side effects
//!
//! Email and in-app notifications sit strictly after the transactional
//! commit. The coordinators hand payloads to [`NotifierService::dispatch`],
//! which queues them on a bounded channel and returns immediately; a worker
//! task drives the actual [`Notifier`] and logs failures. Nothing here can
//! block or fail an order commit.

use async_trait::async_trait;
use shared::models::Notification;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("notification delivery failed: {0}")]
    Delivery(String),
}

/// Delivery backend: email sender, websocket push, in-app store...
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Default backend that only logs the payload
pub struct TracingNotifier;

#[async_trait]
impl Notifier for TracingNotifier {
    async fn notify(&self, n: Notification) -> Result<(), NotifyError> {
        tracing::info!(user = %n.user_id, kind = ?n.kind, "notification");
        Ok(())
    }
}

/// Queue-backed dispatcher in front of a [`Notifier`]
#[derive(Clone)]
pub struct NotifierService {
    tx: mpsc::Sender<Notification>,
}

impl NotifierService {
    /// Spawn the delivery worker and return a handle for dispatching
    pub fn spawn(notifier: Arc<dyn Notifier>, queue_capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<Notification>(queue_capacity);

        tokio::spawn(async move {
            while let Some(n) = rx.recv().await {
                if let Err(e) = notifier.notify(n.clone()).await {
                    tracing::warn!(user = %n.user_id, kind = ?n.kind, error = %e, "notification delivery failed");
                }
            }
            tracing::debug!("notifier worker stopped");
        });

        Self { tx }
    }

    /// Queue a notification without waiting for delivery.
    ///
    /// A full or closed queue drops the message with a warning; callers must
    /// never see notification backpressure as a failure.
    pub fn dispatch(&self, notification: Notification) {
        if let Err(e) = self.tx.try_send(notification) {
            tracing::warn!(error = %e, "notification dropped");
        }
    }
}
