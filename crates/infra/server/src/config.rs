//! Server configuration.

use razorpay_webhooks::WebhookConfig;
use serde::{Deserialize, Serialize};

/// Server-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Port to listen on.
    pub port: u16,
    /// Host to bind to.
    pub host: String,
    /// Path the webhook endpoint is mounted at.
    pub path: String,
    /// Log level.
    pub log_level: String,
    /// Webhook verification settings.
    pub webhook: WebhookConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
            path: "/webhooks/razorpay".to_string(),
            log_level: "info".to_string(),
            webhook: WebhookConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Address to bind, `host:port`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Log level as a tracing level. Unknown names fall back to `info`.
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }

    /// Checks that the endpoint path can be mounted.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.path.starts_with('/') {
            return Err(ConfigError::InvalidPath(self.path.clone()));
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file.
///
/// An empty `webhook.secret` is filled from `RAZORPAY_WEBHOOK_SECRET`.
pub fn load_config(path: &str) -> Result<ServerConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;
    let mut config = parse_config(&content)?;

    if config.webhook.secret.is_empty() {
        if let Ok(secret) = std::env::var(razorpay_webhooks::SECRET_ENV_VAR) {
            config.webhook.secret = secret;
        }
    }

    Ok(config)
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<ServerConfig, ConfigError> {
    let config: ServerConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    config.validate()?;
    Ok(config)
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Invalid path `{0}`: must start with `/`")]
    InvalidPath(String),
}
