//! # Razorpay Webhook Server
//!
//! Standalone receiver for Razorpay webhooks. Every known event is logged;
//! applications that need real side effects embed `razorpay_axum` instead.

mod config;

pub use config::{ConfigError, ServerConfig, load_config, parse_config};

use axum::Router;
use razorpay_axum::{WebhookState, webhook_routes};
use razorpay_webhooks::{HandlerRegistry, WebhookEvent};
use serde_json::Value;

/// The webhook server.
pub struct WebhookServer {
    /// Server configuration.
    pub config: ServerConfig,
}

impl WebhookServer {
    /// Creates a new server.
    pub fn new(config: ServerConfig) -> Self {
        Self { config }
    }

    /// Builds the router serving the webhook endpoint.
    ///
    /// A path without a leading `/` is mounted as if it had one.
    pub fn router(&self) -> Router {
        let state = WebhookState::new(self.config.webhook.clone()).with_handlers(log_all_events);
        let routes = webhook_routes(state);
        match self.config.path.trim_matches('/') {
            "" => routes,
            path => Router::new().nest(&format!("/{path}"), routes),
        }
    }

    /// Starts the server.
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.config.validate()?;
        self.config.webhook.validate()?;

        let address = self.config.bind_address();
        let listener = tokio::net::TcpListener::bind(&address).await?;
        tracing::info!("Starting Razorpay webhook server on {}{}", address, self.config.path);

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}

impl Default for WebhookServer {
    fn default() -> Self {
        Self::new(ServerConfig::default())
    }
}

/// Registers a handler that logs each known event.
fn log_all_events(registry: &mut HandlerRegistry) {
    for event in WebhookEvent::ALL {
        registry.on(event, move |payload| async move {
            tracing::info!(
                event = %event,
                account_id = %payload.account_id,
                contains = ?payload.contains,
                created_at = payload.created_at,
                "Received webhook"
            );
            Ok(Value::Bool(true))
        });
    }
}
