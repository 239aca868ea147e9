//! # Razorpay Core
//!
//! Client configuration and the authenticated HTTP primitive every Razorpay
//! resource call goes through. Webhook verification and dispatch live in
//! `razorpay_webhooks` and are re-exported here.

pub mod api;
pub mod client;
pub mod config;
pub mod error;

pub use api::RazorApi;
pub use client::Razorpay;
pub use config::{ALLOWED_HEADERS, AuthKey, DEFAULT_HOST_URL, RazorpayConfig};
pub use error::{RazorpayError, RazorpayResult};

// Re-export webhook types from the webhooks crate
pub use razorpay_webhooks as webhooks;
pub use razorpay_webhooks::{
    HandlerRegistry, WebhookDispatcher, WebhookError, WebhookEvent, WebhookPayload,
    verify_signature,
};
