//! Error types for the Razorpay client.

use serde_json::Value;
use thiserror::Error;

/// Result type for client operations.
pub type RazorpayResult<T> = Result<T, RazorpayError>;

/// The main error type for client operations.
#[derive(Debug, Error)]
pub enum RazorpayError {
    // ==================== Configuration Errors ====================
    /// `key_id` was empty.
    #[error("`key_id` is mandatory")]
    MissingKeyId,

    /// `key_secret` was empty.
    #[error("`key_secret` is mandatory")]
    MissingKeySecret,

    /// A header name or value could not be used.
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    // ==================== Transport Errors ====================
    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Request timeout.
    #[error("Request timeout")]
    Timeout,

    /// The response body was not valid JSON.
    #[error("Invalid response body: {0}")]
    Decode(String),

    // ==================== API Errors ====================
    /// Razorpay answered with a non-success status.
    #[error("API error ({status_code}): {error}")]
    Api { status_code: u16, error: Value },
}

impl RazorpayError {
    /// Returns the HTTP status code associated with this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RazorpayError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Builds an API error from a response body, keeping only its `error` object.
    pub fn from_response(status_code: u16, body: Value) -> Self {
        let error = match body {
            Value::Object(mut map) => map
                .remove("error")
                .unwrap_or(Value::Object(map)),
            other => other,
        };
        RazorpayError::Api { status_code, error }
    }
}

impl From<reqwest::Error> for RazorpayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RazorpayError::Timeout
        } else {
            RazorpayError::Http(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RazorpayError {
    fn from(err: serde_json::Error) -> Self {
        RazorpayError::Decode(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_unwraps_error_object() {
        let err = RazorpayError::from_response(
            400,
            json!({"error": {"code": "BAD_REQUEST_ERROR", "description": "The amount must be atleast INR 1.00"}}),
        );
        assert_eq!(err.status_code(), Some(400));
        match err {
            RazorpayError::Api { error, .. } => assert_eq!(error["code"], "BAD_REQUEST_ERROR"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_response_without_error_field() {
        let err = RazorpayError::from_response(502, json!("Bad Gateway"));
        assert!(matches!(err, RazorpayError::Api { status_code: 502, ref error } if error == "Bad Gateway"));
        assert_eq!(RazorpayError::MissingKeyId.status_code(), None);
    }
}
