//! Client configuration.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{RazorpayError, RazorpayResult};

/// Base URL of the Razorpay REST API.
pub const DEFAULT_HOST_URL: &str = "https://api.razorpay.com/v1/";

/// Headers a caller may forward to the API. Anything else is dropped.
pub const ALLOWED_HEADERS: &[&str] = &["X-Razorpay-Account"];

/// Environment variables read by [`RazorpayConfig::from_env`].
pub const KEY_ID_ENV_VAR: &str = "RAZORPAY_KEY_ID";
pub const KEY_SECRET_ENV_VAR: &str = "RAZORPAY_KEY_SECRET";

/// API key pair issued on the dashboard.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct AuthKey {
    /// Public key id.
    pub key_id: String,
    /// Secret paired with the key id.
    pub key_secret: String,
}

impl AuthKey {
    /// Creates a key pair.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }
}

impl std::fmt::Debug for AuthKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthKey")
            .field("key_id", &self.key_id)
            .field("key_secret", &"[REDACTED]")
            .finish()
    }
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RazorpayConfig {
    /// API credentials.
    pub auth_key: AuthKey,
    /// Extra headers; only [`ALLOWED_HEADERS`] are sent.
    #[serde(default)]
    pub headers: HashMap<String, String>,
    /// API base URL.
    #[serde(default = "default_host_url")]
    pub host_url: String,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_host_url() -> String {
    DEFAULT_HOST_URL.to_string()
}

fn default_user_agent() -> String {
    format!("razorpay-rs@{}", env!("CARGO_PKG_VERSION"))
}

impl RazorpayConfig {
    /// Creates a configuration for the given key pair.
    pub fn new(auth_key: AuthKey) -> Self {
        Self {
            auth_key,
            headers: HashMap::new(),
            host_url: default_host_url(),
            user_agent: default_user_agent(),
        }
    }

    /// Reads the key pair from `RAZORPAY_KEY_ID` and `RAZORPAY_KEY_SECRET`.
    pub fn from_env() -> RazorpayResult<Self> {
        let key_id = std::env::var(KEY_ID_ENV_VAR).map_err(|_| RazorpayError::MissingKeyId)?;
        let key_secret =
            std::env::var(KEY_SECRET_ENV_VAR).map_err(|_| RazorpayError::MissingKeySecret)?;
        let config = Self::new(AuthKey::new(key_id, key_secret));
        config.validate()?;
        Ok(config)
    }

    /// Adds a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Overrides the API base URL.
    pub fn with_host_url(mut self, host_url: impl Into<String>) -> Self {
        self.host_url = host_url.into();
        self
    }

    /// Checks that both halves of the key pair are present.
    pub fn validate(&self) -> RazorpayResult<()> {
        if self.auth_key.key_id.is_empty() {
            return Err(RazorpayError::MissingKeyId);
        }
        if self.auth_key.key_secret.is_empty() {
            return Err(RazorpayError::MissingKeySecret);
        }
        Ok(())
    }

    /// Returns the headers that will actually be sent.
    pub fn allowed_headers(&self) -> HashMap<&str, &str> {
        self.headers
            .iter()
            .filter(|(name, _)| ALLOWED_HEADERS.contains(&name.as_str()))
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RazorpayConfig::new(AuthKey::new("rzp_test_1", "secret"));
        assert_eq!(config.host_url, "https://api.razorpay.com/v1/");
        assert!(config.user_agent.starts_with("razorpay-rs@"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_keys() {
        let config = RazorpayConfig::new(AuthKey::new("", "secret"));
        assert!(matches!(config.validate(), Err(RazorpayError::MissingKeyId)));

        let config = RazorpayConfig::new(AuthKey::new("rzp_test_1", ""));
        assert!(matches!(config.validate(), Err(RazorpayError::MissingKeySecret)));
    }

    #[test]
    fn test_only_allowed_headers_forwarded() {
        let config = RazorpayConfig::new(AuthKey::new("rzp_test_1", "secret"))
            .with_header("X-Razorpay-Account", "acc_1")
            .with_header("Authorization", "Bearer nope");

        let headers = config.allowed_headers();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers.get("X-Razorpay-Account"), Some(&"acc_1"));
    }

    #[test]
    fn test_deserialize_with_defaults() {
        let config: RazorpayConfig =
            serde_json::from_str(r#"{"auth_key": {"key_id": "k", "key_secret": "s"}}"#).unwrap();
        assert_eq!(config.host_url, DEFAULT_HOST_URL);
        assert!(config.headers.is_empty());
        assert!(!format!("{config:?}").contains("\"s\""));
    }
}
