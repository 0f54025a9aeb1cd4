//! Contact form submission handler

use axum::{extract::State, response::IntoResponse, Json};
use tracing::info;

use crate::{
    error::Result,
    extractors::JsonBody,
    models::{ApiResponse, ContactForm},
    AppState,
};

pub async fn handle_contact(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<ContactForm>,
) -> Result<impl IntoResponse> {
    info!("POST /api/contact");

    state.contact_service.submit(form).await?;

    Ok(Json(ApiResponse::ok()))
}
