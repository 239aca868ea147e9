//! Handler registry keyed by webhook event.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use crate::error::{WebhookError, WebhookResult};
use crate::event::{EventDomain, WebhookEvent};
use crate::handler::{FnHandler, HandlerResult, NoopHandler, WebhookHandler};
use crate::payload::WebhookPayload;

/// Table of one handler per known event.
///
/// Every slot is populated from construction onwards, so [`resolve`] never
/// fails. A registry belongs to a single dispatcher; build one per request.
///
/// [`resolve`]: HandlerRegistry::resolve
pub struct HandlerRegistry {
    handlers: HashMap<WebhookEvent, Arc<dyn WebhookHandler>>,
    overridden: HashSet<WebhookEvent>,
}

impl HandlerRegistry {
    /// Creates a registry with a no-op handler in every slot.
    pub fn new() -> Self {
        let noop: Arc<dyn WebhookHandler> = Arc::new(NoopHandler);
        let handlers = WebhookEvent::ALL
            .into_iter()
            .map(|event| (event, Arc::clone(&noop)))
            .collect();

        Self {
            handlers,
            overridden: HashSet::new(),
        }
    }

    /// Replaces the handler for an event. Last write wins.
    pub fn register(&mut self, event: WebhookEvent, handler: impl WebhookHandler + 'static) {
        self.register_shared(event, Arc::new(handler));
    }

    /// Replaces the handler for an event with a shared handler.
    pub fn register_shared(&mut self, event: WebhookEvent, handler: Arc<dyn WebhookHandler>) {
        self.handlers.insert(event, handler);
        self.overridden.insert(event);
    }

    /// Registers a closure as the handler for an event.
    pub fn on<F, Fut>(&mut self, event: WebhookEvent, handler: F)
    where
        F: Fn(Arc<WebhookPayload>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = HandlerResult> + Send + 'static,
    {
        self.register(event, FnHandler::new(handler));
    }

    /// Registers a handler by its decomposed `(domain, action)` pair.
    pub fn register_parts(
        &mut self,
        domain: EventDomain,
        action: &str,
        handler: impl WebhookHandler + 'static,
    ) -> WebhookResult<()> {
        let event = WebhookEvent::from_parts(domain, action)
            .ok_or_else(|| WebhookError::UnsupportedEvent(format!("{domain}.{action}")))?;
        self.register(event, handler);
        Ok(())
    }

    /// Returns the handler for an event.
    pub fn resolve(&self, event: WebhookEvent) -> Arc<dyn WebhookHandler> {
        match self.handlers.get(&event) {
            Some(handler) => Arc::clone(handler),
            None => Arc::new(NoopHandler),
        }
    }

    /// Returns the handler for a `(domain, action)` pair.
    pub fn resolve_parts(&self, domain: EventDomain, action: &str) -> Option<Arc<dyn WebhookHandler>> {
        WebhookEvent::from_parts(domain, action).map(|event| self.resolve(event))
    }

    /// Checks whether the application replaced the default for an event.
    pub fn is_overridden(&self, event: WebhookEvent) -> bool {
        self.overridden.contains(&event)
    }

    /// Returns the number of slots.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Checks if the registry has no slots. Never true for a registry built with `new`.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut overridden: Vec<&str> = self.overridden.iter().map(|e| e.as_str()).collect();
        overridden.sort_unstable();
        f.debug_struct("HandlerRegistry")
            .field("slots", &self.handlers.len())
            .field("overridden", &overridden)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn payload(event: WebhookEvent) -> Arc<WebhookPayload> {
        Arc::new(WebhookPayload::new("acc_1", event.as_str(), 0))
    }

    #[test]
    fn test_every_slot_populated() {
        let registry = HandlerRegistry::new();
        assert_eq!(registry.len(), WebhookEvent::ALL.len());
        for event in WebhookEvent::ALL {
            assert!(!registry.is_overridden(event));
        }
    }

    #[tokio::test]
    async fn test_defaults_resolve_true() {
        let registry = HandlerRegistry::new();
        for event in WebhookEvent::ALL {
            let result = registry.resolve(event).handle(payload(event)).await.unwrap();
            assert_eq!(result, Value::Bool(true));
        }
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let mut registry = HandlerRegistry::new();
        registry.on(WebhookEvent::RefundCreated, |_| async { Ok(json!(1)) });
        registry.on(WebhookEvent::RefundCreated, |_| async { Ok(json!(2)) });

        let event = WebhookEvent::RefundCreated;
        assert!(registry.is_overridden(event));
        let result = registry.resolve(event).handle(payload(event)).await.unwrap();
        assert_eq!(result, json!(2));
    }

    #[tokio::test]
    async fn test_register_by_parts() {
        let mut registry = HandlerRegistry::new();
        registry
            .register_parts(
                EventDomain::Dispute,
                "lost",
                FnHandler::new(|_| async { Ok(json!("lost")) }),
            )
            .unwrap();

        assert!(registry.is_overridden(WebhookEvent::DisputeLost));
        let handler = registry.resolve_parts(EventDomain::Dispute, "lost").unwrap();
        let result = handler.handle(payload(WebhookEvent::DisputeLost)).await.unwrap();
        assert_eq!(result, json!("lost"));
    }

    #[test]
    fn test_register_unknown_parts() {
        let mut registry = HandlerRegistry::new();
        let err = registry
            .register_parts(EventDomain::Order, "refunded", NoopHandler)
            .unwrap_err();
        assert!(matches!(err, WebhookError::UnsupportedEvent(ref e) if e == "order.refunded"));
        assert!(registry.resolve_parts(EventDomain::Order, "refunded").is_none());
    }

    #[test]
    fn test_debug_lists_overrides() {
        let mut registry = HandlerRegistry::new();
        registry.register(WebhookEvent::OrderPaid, NoopHandler);
        let debug = format!("{registry:?}");
        assert!(debug.contains("order.paid"));
    }
}
