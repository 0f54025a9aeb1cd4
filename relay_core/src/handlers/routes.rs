//! Route table

use axum::{
    routing::{get, post},
    Router,
};

use super::{contact::handle_contact, health};
use crate::AppState;

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", post(handle_contact))
        .route("/test", get(health::handle_test))
        .route("/health", get(health::handle_health))
}
