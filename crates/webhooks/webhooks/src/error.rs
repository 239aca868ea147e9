//! Webhook error types.

use thiserror::Error;

use crate::handler::HandlerError;

/// Result type for webhook operations.
pub type WebhookResult<T> = Result<T, WebhookError>;

/// Error type for webhook verification and dispatch.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Body, signature or secret was not supplied to the verifier.
    #[error(
        "Invalid parameters: please give the request body, the signature sent in the \
         X-Razorpay-Signature header and the webhook secret from the dashboard"
    )]
    InvalidParameters,

    /// A dispatcher was built without a payload.
    #[error("`payload` is mandatory")]
    MissingPayload,

    /// The payload names an event outside the known enumeration.
    #[error("Unsupported webhook event: {0}")]
    UnsupportedEvent(String),

    /// The signature did not match the body.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The payload could not be decoded.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A registered handler failed. Displays exactly as the handler's error.
    #[error(transparent)]
    Handler(HandlerError),
}

impl WebhookError {
    /// Returns the handler's own error if this is a handler failure.
    pub fn into_handler_error(self) -> Option<HandlerError> {
        match self {
            WebhookError::Handler(err) => Some(err),
            _ => None,
        }
    }

    /// Returns true if the event was outside the known enumeration.
    pub fn is_unsupported_event(&self) -> bool {
        matches!(self, WebhookError::UnsupportedEvent(_))
    }
}

impl From<serde_json::Error> for WebhookError {
    fn from(err: serde_json::Error) -> Self {
        WebhookError::InvalidPayload(err.to_string())
    }
}
