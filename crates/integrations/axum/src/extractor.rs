//! Raw webhook extractor.

use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};

/// The unparsed webhook request: headers plus the body as text.
///
/// The body is kept byte-for-byte so the signature can be checked against
/// exactly what Razorpay signed. Non UTF-8 bodies are rejected with 400.
#[derive(Debug, Clone)]
pub struct RawWebhook {
    /// Request headers.
    pub headers: HeaderMap,
    /// Raw request body.
    pub body: String,
}

impl RawWebhook {
    /// Returns the value of the signature header, if present and non-empty.
    pub fn signature(&self, header: &str) -> Option<&str> {
        self.headers
            .get(header)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
    }
}

impl<S> FromRequest<S> for RawWebhook
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let headers = req.headers().clone();
        let body = String::from_request(req, state)
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(RawWebhook { headers, body })
    }
}
