//! Application configuration

pub mod settings;

pub use settings::{
    AppConfig, ContactPolicy, CorsConfig, NotificationConfig, ServerConfig, StaticFilesConfig,
    ValidationConfig, WebhookConfig,
};
