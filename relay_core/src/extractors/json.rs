//! JSON extractor that answers malformed bodies in the application's error format

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::AppError;

pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!("Rejected request body: {}", rejection.body_text());
                Err(AppError::BadRequest(rejection_message(&rejection).to_string()))
            }
        }
    }
}

fn rejection_message(rejection: &JsonRejection) -> &'static str {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => "Expected request with `Content-Type: application/json`",
        JsonRejection::JsonSyntaxError(_) => "Invalid JSON format",
        JsonRejection::JsonDataError(_) => "Invalid field types in JSON request",
        JsonRejection::BytesRejection(_) => "Failed to read request body",
        _ => "Failed to parse JSON request",
    }
}
