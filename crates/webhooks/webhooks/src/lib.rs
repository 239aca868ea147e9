//! # Razorpay Webhooks
//!
//! Receiving side of Razorpay webhooks:
//! - HMAC-SHA256 signature verification over the raw request body
//! - The closed set of webhook event types
//! - A per-request dispatcher routing each payload to one handler
//!
//! ## Example
//!
//! ```rust,ignore
//! use razorpay_webhooks::{verify_signature, WebhookDispatcher, WebhookEvent, WebhookPayload};
//!
//! if !verify_signature(&raw_body, &signature, &secret)? {
//!     return unauthorized();
//! }
//!
//! let mut dispatcher = WebhookDispatcher::new(WebhookPayload::from_slice(raw_body.as_bytes())?);
//! dispatcher.on(WebhookEvent::PaymentCaptured, |payload| async move {
//!     println!("captured for {}", payload.account_id);
//!     Ok(serde_json::Value::Null)
//! });
//! dispatcher.execute().await?;
//! ```

mod config;
mod dispatcher;
mod error;
mod event;
mod handler;
mod payload;
mod receiver;
mod registry;
mod signature;

pub use config::{SECRET_ENV_VAR, WebhookConfig};
pub use dispatcher::WebhookDispatcher;
pub use error::{WebhookError, WebhookResult};
pub use event::{EventDomain, WebhookEvent};
pub use handler::{FnHandler, HandlerError, HandlerResult, NoopHandler, WebhookHandler};
pub use payload::{EVENT_ENTITY, EntityWrapper, WebhookPayload};
pub use receiver::WebhookReceiver;
pub use registry::HandlerRegistry;
pub use signature::{SIGNATURE_HEADER, WebhookVerifier, compute_signature, verify_signature};
