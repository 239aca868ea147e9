//! HMAC signature generation and verification.
//!
//! Razorpay signs the exact request body with HMAC-SHA256 keyed by the
//! webhook secret and sends the lowercase hex digest in the
//! `X-Razorpay-Signature` header. Verify against the raw body text, never a
//! re-serialized JSON value.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::{WebhookError, WebhookResult};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the provider's signature.
pub const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

/// Computes the lowercase hex HMAC-SHA256 digest of `body` keyed by `secret`.
pub fn compute_signature(body: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Verifies a webhook signature.
///
/// Returns `Ok(false)` on a mismatch; a mismatch is a normal outcome the
/// caller must branch on. Fails with [`WebhookError::InvalidParameters`] if
/// any argument is empty, without computing anything.
pub fn verify_signature(body: &str, signature: &str, secret: &str) -> WebhookResult<bool> {
    if body.is_empty() || signature.is_empty() || secret.is_empty() {
        return Err(WebhookError::InvalidParameters);
    }

    let expected = compute_signature(body.as_bytes(), secret);
    Ok(constant_time_compare(&expected, signature))
}

/// Verifier bound to a single webhook secret.
#[derive(Clone)]
pub struct WebhookVerifier {
    secret: String,
}

impl WebhookVerifier {
    /// Creates a new verifier with the given secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Signs a body the way Razorpay does.
    pub fn sign(&self, body: &[u8]) -> String {
        compute_signature(body, &self.secret)
    }

    /// Verifies a signature against the raw body.
    pub fn verify(&self, body: &str, signature: &str) -> WebhookResult<bool> {
        verify_signature(body, signature, &self.secret)
    }
}

impl std::fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Only the lengths can leak through timing. Digests are always 64 hex characters.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
