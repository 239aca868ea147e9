//! Route mounting for the webhook endpoint.

use std::sync::Arc;

use axum::Router;
use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use razorpay_webhooks::{
    HandlerRegistry, WebhookConfig, WebhookDispatcher, WebhookError, WebhookPayload,
    verify_signature,
};
use serde_json::Value;

use crate::WebhookErrorResponse;
use crate::extractor::RawWebhook;

/// Installs application handlers into a fresh registry.
pub type RegistrySetup = Arc<dyn Fn(&mut HandlerRegistry) + Send + Sync>;

/// Shared state for the webhook route.
///
/// Holds the configuration and the setup closure, never a registry: each
/// request gets its own registry so concurrent webhooks cannot interfere.
#[derive(Clone)]
pub struct WebhookState {
    config: Arc<WebhookConfig>,
    setup: RegistrySetup,
}

impl WebhookState {
    /// Creates state whose handlers are all defaults.
    pub fn new(config: WebhookConfig) -> Self {
        Self {
            config: Arc::new(config),
            setup: Arc::new(|_| {}),
        }
    }

    /// Sets the closure that registers handlers for each request.
    pub fn with_handlers(
        mut self,
        setup: impl Fn(&mut HandlerRegistry) + Send + Sync + 'static,
    ) -> Self {
        self.setup = Arc::new(setup);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &WebhookConfig {
        &self.config
    }

    fn registry(&self) -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        (self.setup)(&mut registry);
        registry
    }
}

/// Creates an Axum router receiving webhooks on `POST /`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/webhooks/razorpay", webhook_routes(state));
/// ```
pub fn webhook_routes<S>(state: WebhookState) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/", post(receive_webhook))
        .with_state(state)
}

/// Verifies, decodes and dispatches one webhook.
///
/// Nothing is decoded unless the signature matches the raw body.
pub async fn process_webhook(state: &WebhookState, webhook: &RawWebhook) -> Result<Value, WebhookError> {
    let config = state.config();
    if config.secret.is_empty() {
        return Err(WebhookError::Config("webhook secret is not configured".to_string()));
    }

    let signature = webhook
        .signature(&config.signature_header)
        .ok_or(WebhookError::InvalidSignature)?;
    if webhook.body.is_empty() {
        return Err(WebhookError::MissingPayload);
    }

    if !verify_signature(&webhook.body, signature, &config.secret)? {
        return Err(WebhookError::InvalidSignature);
    }

    let payload = WebhookPayload::from_slice(webhook.body.as_bytes())?;
    let dispatcher = WebhookDispatcher::with_registry(payload, state.registry());
    let result = dispatcher.execute().await?;
    tracing::info!(
        event = %dispatcher.payload().event,
        account_id = %dispatcher.payload().account_id,
        "Webhook processed"
    );
    Ok(result)
}

async fn receive_webhook(State(state): State<WebhookState>, webhook: RawWebhook) -> Response {
    match process_webhook(&state, &webhook).await {
        Ok(result) => axum::Json(serde_json::json!({
            "status": "ok",
            "result": result,
        }))
        .into_response(),
        Err(err) => {
            match &err {
                WebhookError::UnsupportedEvent(event) => {
                    tracing::warn!(event = %event, "Acknowledging unsupported webhook event");
                }
                WebhookError::InvalidSignature => {
                    tracing::warn!("Rejected webhook with missing or invalid signature");
                }
                WebhookError::Handler(e) => {
                    tracing::error!(error = %e, "Webhook handler failed");
                }
                other => {
                    tracing::error!(error = %other, "Webhook rejected");
                }
            }
            WebhookErrorResponse(err).into_response()
        }
    }
}
