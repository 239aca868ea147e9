//! Webhook configuration.

use serde::{Deserialize, Serialize};

use crate::error::{WebhookError, WebhookResult};
use crate::signature::SIGNATURE_HEADER;

/// Environment variable holding the webhook secret.
pub const SECRET_ENV_VAR: &str = "RAZORPAY_WEBHOOK_SECRET";

/// Webhook receiving configuration.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookConfig {
    /// Secret set on the dashboard for this webhook.
    pub secret: String,
    /// Header the signature arrives in.
    pub signature_header: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            signature_header: SIGNATURE_HEADER.to_string(),
        }
    }
}

impl WebhookConfig {
    /// Creates a configuration with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Self::default()
        }
    }

    /// Reads the secret from `RAZORPAY_WEBHOOK_SECRET`.
    pub fn from_env() -> WebhookResult<Self> {
        let secret = std::env::var(SECRET_ENV_VAR)
            .map_err(|_| WebhookError::Config(format!("{SECRET_ENV_VAR} is not set")))?;
        let config = Self::new(secret);
        config.validate()?;
        Ok(config)
    }

    /// Sets the signature header name.
    pub fn with_signature_header(mut self, header: impl Into<String>) -> Self {
        self.signature_header = header.into();
        self
    }

    /// Checks that the configuration can verify webhooks.
    pub fn validate(&self) -> WebhookResult<()> {
        if self.secret.is_empty() {
            return Err(WebhookError::Config("webhook secret is empty".to_string()));
        }
        if self.signature_header.is_empty() {
            return Err(WebhookError::Config("signature header is empty".to_string()));
        }
        Ok(())
    }
}

impl std::fmt::Debug for WebhookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookConfig")
            .field("secret", &"[REDACTED]")
            .field("signature_header", &self.signature_header)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WebhookConfig::default();
        assert_eq!(config.signature_header, "X-Razorpay-Signature");
        assert!(matches!(config.validate(), Err(WebhookError::Config(_))));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: WebhookConfig = serde_json::from_str(r#"{"secret": "abc"}"#).unwrap();
        assert_eq!(config.secret, "abc");
        assert_eq!(config.signature_header, SIGNATURE_HEADER);
        assert!(config.validate().is_ok());
        assert!(!format!("{config:?}").contains("abc"));
    }
}
