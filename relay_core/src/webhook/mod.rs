//! Delivery of notifications to the external webhook

pub mod client;

pub use client::WebhookClient;

use async_trait::async_trait;

use crate::{error::DeliveryError, notification::NotificationMessage};

/// What the destination answered to a successful delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    pub body: String,
}

/// A destination for contact notifications. One call is one delivery
/// attempt; implementations do not retry.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    async fn deliver(&self, message: &NotificationMessage) -> Result<DeliveryReceipt, DeliveryError>;
}
