//! HTTP client that posts notifications to the configured webhook URL.
//!
//! `ureq` is blocking, so each delivery runs on tokio's blocking pool via
//! `spawn_blocking` to keep the async workers free.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;

use super::{DeliveryReceipt, WebhookSink};
use crate::{error::DeliveryError, notification::NotificationMessage};

#[derive(Clone)]
pub struct WebhookClient {
    url: String,
    agent: Arc<ureq::Agent>,
}

impl WebhookClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();

        Self {
            url: url.into(),
            agent: Arc::new(agent),
        }
    }

    /// Blocking delivery. Non-2xx responses come back as
    /// [`DeliveryError::Rejected`] with the destination's response body.
    pub fn send(&self, message: &NotificationMessage) -> Result<DeliveryReceipt, DeliveryError> {
        let body = serde_json::to_string(message)?;
        let start = Instant::now();

        let result = self
            .agent
            .post(&self.url)
            .set("Content-Type", mime::APPLICATION_JSON.as_ref())
            .send_string(&body);

        let latency_ms = start.elapsed().as_millis();

        match result {
            Ok(response) => {
                let status = response.status();
                let body = response.into_string().unwrap_or_default();
                // ureq only errors on 4xx/5xx; an unfollowed redirect is not a delivery.
                if !(200..300).contains(&status) {
                    tracing::debug!(status, latency_ms, "webhook answered without accepting");
                    return Err(DeliveryError::Rejected { status, body });
                }
                tracing::debug!(status, latency_ms, "webhook accepted notification");
                Ok(DeliveryReceipt { status, body })
            }
            Err(ureq::Error::Status(status, response)) => {
                let body = response
                    .into_string()
                    .unwrap_or_else(|_| "<unreadable response body>".to_string());
                tracing::debug!(status, latency_ms, "webhook rejected notification");
                Err(DeliveryError::Rejected { status, body })
            }
            Err(ureq::Error::Transport(transport)) => {
                tracing::debug!(latency_ms, "webhook transport failure");
                Err(DeliveryError::Transport(transport.to_string()))
            }
        }
    }
}

#[async_trait]
impl WebhookSink for WebhookClient {
    async fn deliver(&self, message: &NotificationMessage) -> Result<DeliveryReceipt, DeliveryError> {
        let client = self.clone();
        let message = message.clone();

        tokio::task::spawn_blocking(move || client.send(&message))
            .await
            .map_err(|e| DeliveryError::Task(e.to_string()))?
    }
}
