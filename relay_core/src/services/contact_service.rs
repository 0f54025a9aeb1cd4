use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    config::{AppConfig, NotificationConfig, WebhookConfig},
    error::{AppError, DeliveryError, Result},
    models::{ContactForm, Submission},
    notification::NotificationMessage,
    validation::{ContextValidatable, ValidationContext},
    webhook::{DeliveryReceipt, WebhookClient, WebhookSink},
};

/// Validates a contact form, turns it into a notification and hands it to
/// the webhook. Holds no per-request state; clones share the sink.
#[derive(Clone)]
pub struct ContactService {
    sink: Option<Arc<dyn WebhookSink>>,
    notification: NotificationConfig,
    validation: ValidationContext,
}

impl ContactService {
    /// `sink` is `None` when no destination is configured; submissions then
    /// fail with a configuration error after validation.
    pub fn new(
        sink: Option<Arc<dyn WebhookSink>>,
        notification: NotificationConfig,
        validation: ValidationContext,
    ) -> Self {
        Self {
            sink,
            notification,
            validation,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            webhook_sink(&config.webhook),
            config.notification.clone(),
            ValidationContext {
                contact_policy: config.validation.contact_policy,
            },
        )
    }

    pub fn is_configured(&self) -> bool {
        self.sink.is_some()
    }

    pub async fn submit(&self, form: ContactForm) -> Result<DeliveryReceipt> {
        let submission_id = Uuid::new_v4();
        let submission = Submission::from(form);

        let result = submission.validate_with_context(&self.validation);
        if !result.is_valid() {
            return Err(AppError::Validation(result.errors));
        }

        let sink = self.sink.as_ref().ok_or_else(|| {
            AppError::Configuration("webhook URL is not set".to_string())
        })?;

        let message = NotificationMessage::from_submission(&submission, &self.notification, Utc::now());

        match sink.deliver(&message).await {
            Ok(receipt) => {
                info!(
                    %submission_id,
                    status = receipt.status,
                    response = %receipt.body,
                    "Contact submission delivered"
                );
                Ok(receipt)
            }
            Err(err) => {
                match &err {
                    DeliveryError::Rejected { status, body } => error!(
                        %submission_id,
                        status,
                        response = %body,
                        "Webhook rejected contact submission"
                    ),
                    other => error!(
                        %submission_id,
                        error = %other,
                        "Contact submission could not be delivered"
                    ),
                }
                Err(err.into())
            }
        }
    }
}

fn webhook_sink(config: &WebhookConfig) -> Option<Arc<dyn WebhookSink>> {
    let url = config.destination()?;
    let timeout = std::time::Duration::from_secs(config.timeout_seconds);
    Some(Arc::new(WebhookClient::new(url, timeout)))
}
