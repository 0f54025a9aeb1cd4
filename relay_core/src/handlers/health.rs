//! Liveness handlers

use axum::{extract::State, response::IntoResponse, Json};

use crate::{models::ApiResponse, notification::iso_timestamp, AppState};

/// Plain-text probe the front-end's deployment checks rely on.
pub async fn handle_test() -> &'static str {
    "✅ Server is running!"
}

pub async fn handle_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(ApiResponse::success(serde_json::json!({
        "status": "healthy",
        "app": state.app_name,
        "version": state.version,
        "webhook_configured": state.contact_service.is_configured(),
        "timestamp": iso_timestamp(chrono::Utc::now()),
    })))
}
