use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::validation::rules::URL_REGEX;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub webhook: WebhookConfig,
    pub notification: NotificationConfig,
    pub validation: ValidationConfig,
    pub static_files: StaticFilesConfig,
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Destination of contact notifications. A missing `url` is tolerated at
/// startup and reported per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    pub content: Option<String>,
    pub title: String,
    pub color: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationConfig {
    pub contact_policy: ContactPolicy,
}

/// How the `contact` field of a submission is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPolicy {
    /// Required, any non-blank text.
    #[default]
    FreeText,
    /// Required, must look like an email address or a phone number.
    EmailOrPhone,
    /// May be omitted; when present it must look like an email address.
    OptionalEmail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticFilesConfig {
    pub enabled: bool,
    pub dir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_seconds: 10,
        }
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            content: Some("📩 **New Contact Form Submission**".to_string()),
            title: "Contact Form Details".to_string(),
            color: 0x38bdf8,
        }
    }
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("public"),
        }
    }
}

impl WebhookConfig {
    /// The configured URL, treating a blank value as unset.
    pub fn destination(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new("config.toml"))
    }

    /// Layers defaults, the optional file at `path`, `APP_*` variables and
    /// the legacy `PORT` / `DISCORD_WEBHOOK_URL` variables, in that order.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(Config::try_from(&AppConfig::default())?);

        if path.exists() {
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("cors.allowed_origins"),
        );

        // Variables the deployed front-end has always been configured with.
        builder = builder
            .set_override_option("server.port", std::env::var("PORT").ok())?
            .set_override_option("webhook.url", std::env::var("DISCORD_WEBHOOK_URL").ok())?;

        let config = builder.build()?;
        let app_config: AppConfig = config.try_deserialize()?;

        app_config.validate()?;

        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message("Server port cannot be 0".to_string()));
        }

        if self.webhook.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "Webhook timeout must be greater than 0".to_string(),
            ));
        }

        match self.webhook.destination() {
            Some(url) if !URL_REGEX.is_match(url) => {
                return Err(ConfigError::Message(
                    "Webhook URL must be an http(s) URL".to_string(),
                ));
            }
            Some(_) => {}
            None => {
                tracing::warn!("Webhook URL is not set - contact submissions will be rejected");
            }
        }

        if self.notification.title.trim().is_empty() {
            return Err(ConfigError::Message(
                "Notification title cannot be empty".to_string(),
            ));
        }

        if self.notification.color > 0xFF_FF_FF {
            return Err(ConfigError::Message(
                "Notification color must be a 24-bit RGB value".to_string(),
            ));
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Directory to serve the front-end from, if serving is enabled and it exists.
    pub fn static_dir(&self) -> Option<&Path> {
        let dir = self.static_files.dir.as_path();
        (self.static_files.enabled && dir.is_dir()).then_some(dir)
    }
}
