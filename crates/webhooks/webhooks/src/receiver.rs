//! Webhook receiver for verifying incoming webhooks.

use crate::dispatcher::WebhookDispatcher;
use crate::error::{WebhookError, WebhookResult};
use crate::payload::WebhookPayload;
use crate::registry::HandlerRegistry;
use crate::signature::WebhookVerifier;

/// Verifies raw webhook bodies and turns them into dispatchers.
///
/// The signature is always checked against the raw body before any JSON
/// decoding happens.
#[derive(Debug, Clone)]
pub struct WebhookReceiver {
    verifier: WebhookVerifier,
}

impl WebhookReceiver {
    /// Creates a new webhook receiver.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            verifier: WebhookVerifier::new(secret),
        }
    }

    /// Verifies only the signature without parsing.
    pub fn verify_signature(&self, signature: &str, body: &str) -> WebhookResult<()> {
        if self.verifier.verify(body, signature)? {
            Ok(())
        } else {
            Err(WebhookError::InvalidSignature)
        }
    }

    /// Verifies a webhook signature and parses the payload.
    pub fn verify(&self, signature: &str, body: &str) -> WebhookResult<WebhookPayload> {
        self.verify_signature(signature, body)?;
        WebhookPayload::from_slice(body.as_bytes())
    }

    /// Verifies a webhook and builds a dispatcher with handlers set up by `setup`.
    pub fn dispatcher(
        &self,
        signature: &str,
        body: &str,
        setup: impl FnOnce(&mut HandlerRegistry),
    ) -> WebhookResult<WebhookDispatcher> {
        let payload = self.verify(signature, body)?;
        let mut registry = HandlerRegistry::new();
        setup(&mut registry);
        Ok(WebhookDispatcher::with_registry(payload, registry))
    }
}
