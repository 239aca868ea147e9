//! # Razorpay Axum Integration
//!
//! An axum endpoint that receives Razorpay webhooks:
//! - Reads the raw body and the signature header
//! - Verifies the signature before any JSON decoding
//! - Builds a fresh dispatcher per request and runs it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use axum::Router;
//! use razorpay_axum::{WebhookState, webhook_routes};
//! use razorpay_webhooks::{WebhookConfig, WebhookEvent};
//!
//! let state = WebhookState::new(WebhookConfig::from_env()?).with_handlers(|registry| {
//!     registry.on(WebhookEvent::PaymentCaptured, |payload| async move {
//!         println!("captured: {}", payload.account_id);
//!         Ok(serde_json::Value::Null)
//!     });
//! });
//!
//! let app = Router::new().nest("/webhooks/razorpay", webhook_routes(state));
//! ```

mod extractor;
mod routes;

pub use extractor::RawWebhook;
pub use routes::{RegistrySetup, WebhookState, process_webhook, webhook_routes};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use razorpay_webhooks::WebhookError;

/// Wrapper for `WebhookError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct WebhookErrorResponse(pub WebhookError);

impl WebhookErrorResponse {
    /// Status code sent back to Razorpay for this error.
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            WebhookError::InvalidSignature => StatusCode::UNAUTHORIZED,
            WebhookError::InvalidParameters
            | WebhookError::InvalidPayload(_)
            | WebhookError::MissingPayload => StatusCode::BAD_REQUEST,
            // Unknown events are acknowledged so Razorpay stops redelivering them.
            WebhookError::UnsupportedEvent(_) => StatusCode::OK,
            WebhookError::Config(_) | WebhookError::Handler(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebhookErrorResponse {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self.0 {
            WebhookError::UnsupportedEvent(event) => serde_json::json!({
                "status": "ignored",
                "event": event,
            }),
            err => serde_json::json!({
                "error": err.to_string(),
                "code": status.as_u16(),
            }),
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<WebhookError> for WebhookErrorResponse {
    fn from(err: WebhookError) -> Self {
        WebhookErrorResponse(err)
    }
}
