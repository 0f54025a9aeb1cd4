//! Core library for the contact relay: validates contact-form submissions and
//! forwards them to a webhook.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod notification;
pub mod services;
pub mod validation;
pub mod webhook;

pub use config::{AppConfig, ContactPolicy};
pub use error::{AppError, DeliveryError, Result};
pub use handlers::routes::create_routes;
pub use models::{ContactForm, Submission};
pub use notification::NotificationMessage;
pub use services::ContactService;
pub use webhook::{DeliveryReceipt, WebhookClient, WebhookSink};

use axum::{http::Uri, Router};
use std::net::SocketAddr;
use tokio::signal;
use tower_http::services::ServeDir;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub app_name: String,
    pub version: String,
    pub contact_service: ContactService,
}

impl AppState {
    pub fn new(contact_service: ContactService) -> Self {
        Self {
            app_name: "Contact Relay".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            contact_service,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(ContactService::from_config(config))
    }
}

pub fn create_app(state: AppState) -> Router {
    create_app_with_config(state, &AppConfig::default())
}

pub fn create_app_with_config(state: AppState, config: &AppConfig) -> Router {
    let mut router = Router::new().merge(create_routes());

    router = match config.static_dir() {
        Some(dir) => {
            info!("Serving static files from {}", dir.display());
            router.fallback_service(ServeDir::new(dir))
        }
        None => router.fallback(handle_not_found),
    };

    router = router.layer(middleware::cors::cors_layer_from_config(&config.cors));

    router = router.layer(middleware::logging::logging_layer());

    router.with_state(state)
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub async fn run_server(app: Router, addr: SocketAddr) -> Result<()> {
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Other(anyhow::anyhow!("Failed to bind {}: {}", addr, e)))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::Other(e.into()))?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, starting graceful shutdown");
        },
        _ = terminate => {
            info!("Received SIGTERM, starting graceful shutdown");
        },
    }
}
