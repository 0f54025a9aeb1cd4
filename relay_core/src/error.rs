//! Application error types and handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::validation::FieldError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {} field error(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Failure to hand a notification to the webhook. The submission is lost.
#[derive(Error, Debug)]
pub enum DeliveryError {
    #[error("destination responded with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("destination unreachable: {0}")]
    Transport(String),

    #[error("failed to encode notification: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("delivery task failed: {0}")]
    Task(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, errors) = match self {
            AppError::Validation(errors) => {
                tracing::warn!(?errors, "Rejected contact submission");
                (StatusCode::BAD_REQUEST, "Missing or invalid fields".to_string(), Some(errors))
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server misconfigured".to_string(), None)
            }
            // Logged with the submission id where delivery is attempted.
            AppError::Delivery(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to send message".to_string(), None)
            }
            AppError::Other(err) => {
                tracing::error!("Unexpected error: {:?}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string(), None)
            }
        };

        let mut body = json!({
            "error": error_message,
            "status": status.as_u16(),
        });

        if let Some(errors) = errors {
            body["errors"] = json!(errors);
        }

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields() {
        let response = AppError::Validation(vec![FieldError {
            field: "message".to_string(),
            message: "Message is required".to_string(),
        }])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["status"], 400);
        assert_eq!(body["errors"][0]["field"], "message");
        assert_eq!(body["errors"][0]["message"], "Message is required");
    }

    #[tokio::test]
    async fn test_configuration_error_hides_details() {
        let response = AppError::Configuration("webhook URL is not set".to_string()).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["error"], "Server misconfigured");
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_delivery_error_does_not_leak_destination_body() {
        let response = AppError::from(DeliveryError::Rejected {
            status: 400,
            body: r#"{"message": "Invalid Webhook Token"}"#.to_string(),
        })
        .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, json!({"error": "Failed to send message", "status": 500}));
    }
}
