//! Routes one webhook payload to its registered handler.

use std::future::Future;
use std::sync::Arc;

use serde_json::Value;

use crate::error::{WebhookError, WebhookResult};
use crate::event::WebhookEvent;
use crate::handler::{HandlerResult, WebhookHandler};
use crate::payload::WebhookPayload;
use crate::registry::HandlerRegistry;

/// Dispatcher for a single inbound webhook.
///
/// Built per request from a payload whose raw body the caller has already
/// verified. Handlers are configured first, then [`execute`] invokes
/// exactly one of them. Calling [`execute`] again repeats the routing.
///
/// [`execute`]: WebhookDispatcher::execute
#[derive(Debug)]
pub struct WebhookDispatcher {
    payload: Arc<WebhookPayload>,
    handlers: HandlerRegistry,
}

impl WebhookDispatcher {
    /// Creates a dispatcher with default handlers.
    pub fn new(payload: WebhookPayload) -> Self {
        Self::with_registry(payload, HandlerRegistry::new())
    }

    /// Creates a dispatcher with a prepared registry.
    pub fn with_registry(payload: WebhookPayload, handlers: HandlerRegistry) -> Self {
        Self {
            payload: Arc::new(payload),
            handlers,
        }
    }

    /// Creates a dispatcher from an optional payload.
    pub fn try_new(payload: Option<WebhookPayload>) -> WebhookResult<Self> {
        payload.map(Self::new).ok_or(WebhookError::MissingPayload)
    }

    /// Creates a dispatcher from a decoded JSON body.
    pub fn from_value(value: Value) -> WebhookResult<Self> {
        if value.is_null() {
            return Err(WebhookError::MissingPayload);
        }
        Ok(Self::new(WebhookPayload::from_value(value)?))
    }

    /// Returns the payload.
    pub fn payload(&self) -> &WebhookPayload {
        &self.payload
    }

    /// Returns the handler registry.
    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Returns the handler registry for configuration.
    pub fn handlers_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.handlers
    }

    /// Replaces the handler for an event.
    pub fn set_handler(&mut self, event: WebhookEvent, handler: impl WebhookHandler + 'static) -> &mut Self {
        self.handlers.register(event, handler);
        self
    }

    /// Registers a closure as the handler for an event.
    pub fn on<F, Fut>(&mut self, event: WebhookEvent, handler: F) -> &mut Self
    where
        F: Fn(Arc<WebhookPayload>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.handlers.on(event, handler);
        self
    }

    /// Invokes the handler registered for the payload's event.
    ///
    /// Fails with [`WebhookError::UnsupportedEvent`] for events outside the
    /// known enumeration, without calling any handler. A handler error is
    /// returned as [`WebhookError::Handler`] holding the handler's own error.
    pub async fn execute(&self) -> WebhookResult<Value> {
        let event = match self.payload.event_type() {
            Ok(event) => event,
            Err(err) => {
                tracing::warn!(
                    event = %self.payload.event,
                    account_id = %self.payload.account_id,
                    "Unsupported webhook event"
                );
                return Err(err);
            }
        };

        tracing::debug!(
            event = %event,
            account_id = %self.payload.account_id,
            overridden = self.handlers.is_overridden(event),
            "Dispatching webhook"
        );

        let handler = self.handlers.resolve(event);
        handler
            .handle(Arc::clone(&self.payload))
            .await
            .map_err(WebhookError::Handler)
    }
}
