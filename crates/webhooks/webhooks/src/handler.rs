//! Webhook handler trait and types.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::payload::WebhookPayload;

/// Error raised by a handler. Passed through the dispatcher untouched.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result of handling a webhook.
pub type HandlerResult = Result<Value, HandlerError>;

/// Trait for webhook event handlers.
#[async_trait]
pub trait WebhookHandler: Send + Sync {
    /// Handles a webhook payload.
    async fn handle(&self, payload: Arc<WebhookPayload>) -> HandlerResult;
}

/// Handler installed in every slot until the application overrides it.
///
/// Resolves to `true` without side effects, so an application only has to
/// implement the events it cares about.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

#[async_trait]
impl WebhookHandler for NoopHandler {
    async fn handle(&self, _payload: Arc<WebhookPayload>) -> HandlerResult {
        Ok(Value::Bool(true))
    }
}

/// Wrapper for function-based handlers.
pub struct FnHandler<F> {
    handler: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(Arc<WebhookPayload>) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    /// Creates a new function handler.
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<F, Fut> WebhookHandler for FnHandler<F>
where
    F: Fn(Arc<WebhookPayload>) -> Fut + Send + Sync,
    Fut: Future<Output = HandlerResult> + Send,
{
    async fn handle(&self, payload: Arc<WebhookPayload>) -> HandlerResult {
        (self.handler)(payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_noop_handler_resolves_true() {
        let payload = Arc::new(WebhookPayload::new("acc_1", "order.paid", 0));
        let result = NoopHandler.handle(payload).await.unwrap();
        assert_eq!(result, Value::Bool(true));
    }

    #[tokio::test]
    async fn test_fn_handler_receives_payload() {
        let handler = FnHandler::new(|payload: Arc<WebhookPayload>| async move {
            Ok(Value::String(payload.account_id.clone()))
        });

        let payload = Arc::new(WebhookPayload::new("acc_42", "order.paid", 0));
        let result = handler.handle(payload).await.unwrap();
        assert_eq!(result, Value::String("acc_42".into()));
    }
}
