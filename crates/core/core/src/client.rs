//! Top-level client.

use razorpay_webhooks::{WebhookDispatcher, WebhookPayload};

use crate::api::RazorApi;
use crate::config::RazorpayConfig;
use crate::error::RazorpayResult;

/// Entry point holding the configuration and the API client.
#[derive(Debug, Clone)]
pub struct Razorpay {
    config: RazorpayConfig,
    api: RazorApi,
}

impl Razorpay {
    /// Crate version, also sent in the user agent.
    pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");

    /// Creates a client. Fails if either half of the key pair is missing.
    pub fn new(config: RazorpayConfig) -> RazorpayResult<Self> {
        let api = RazorApi::new(&config)?;
        tracing::debug!(key_id = %config.auth_key.key_id, "Razorpay client created");
        Ok(Self { config, api })
    }

    /// Returns the API client.
    pub fn api(&self) -> &RazorApi {
        &self.api
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RazorpayConfig {
        &self.config
    }

    /// Creates a webhook dispatcher for an already verified payload.
    pub fn webhook(&self, payload: WebhookPayload) -> WebhookDispatcher {
        WebhookDispatcher::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AuthKey;
    use crate::error::RazorpayError;

    #[test]
    fn test_client_requires_keys() {
        let config = RazorpayConfig::new(AuthKey::new("rzp_test_1", ""));
        assert!(matches!(Razorpay::new(config), Err(RazorpayError::MissingKeySecret)));
    }

    #[tokio::test]
    async fn test_webhook_dispatcher() {
        let client = Razorpay::new(RazorpayConfig::new(AuthKey::new("rzp_test_1", "secret"))).unwrap();
        let dispatcher = client.webhook(WebhookPayload::new("acc_1", "invoice.paid", 0));
        assert_eq!(dispatcher.execute().await.unwrap(), serde_json::Value::Bool(true));
        assert!(client.config().user_agent.ends_with(Razorpay::VERSION));
    }
}
