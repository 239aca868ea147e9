//! Authenticated HTTP access to the Razorpay API.
//!
//! Every resource call goes through one of the verb methods here. Request
//! data travels as the query string, and responses come back as JSON.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde_json::Value;

use crate::config::{AuthKey, RazorpayConfig};
use crate::error::{RazorpayError, RazorpayResult};

/// Low-level API client shared by all resources.
#[derive(Debug, Clone)]
pub struct RazorApi {
    client: Client,
    base_url: String,
    auth_key: AuthKey,
}

impl RazorApi {
    /// Builds a client from a validated configuration.
    pub fn new(config: &RazorpayConfig) -> RazorpayResult<Self> {
        config.validate()?;

        let mut headers = HeaderMap::new();
        for (name, value) in config.allowed_headers() {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| RazorpayError::InvalidHeader {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            let header_value =
                HeaderValue::from_str(value).map_err(|e| RazorpayError::InvalidHeader {
                    name: name.to_string(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.host_url.clone(),
            auth_key: config.auth_key.clone(),
        })
    }

    /// Resolves a resource path against the base URL.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Sends a `GET` request.
    pub async fn get<Q: Serialize + ?Sized>(&self, path: &str, data: Option<&Q>) -> RazorpayResult<Value> {
        self.request(Method::GET, path, data).await
    }

    /// Sends a `POST` request.
    pub async fn post<Q: Serialize + ?Sized>(&self, path: &str, data: Option<&Q>) -> RazorpayResult<Value> {
        self.request(Method::POST, path, data).await
    }

    /// Sends a `PUT` request.
    pub async fn put<Q: Serialize + ?Sized>(&self, path: &str, data: Option<&Q>) -> RazorpayResult<Value> {
        self.request(Method::PUT, path, data).await
    }

    /// Sends a `PATCH` request.
    pub async fn patch<Q: Serialize + ?Sized>(&self, path: &str, data: Option<&Q>) -> RazorpayResult<Value> {
        self.request(Method::PATCH, path, data).await
    }

    /// Sends a `DELETE` request. Deletes carry no data.
    pub async fn delete(&self, path: &str) -> RazorpayResult<Value> {
        self.request::<()>(Method::DELETE, path, None).await
    }

    async fn request<Q: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        data: Option<&Q>,
    ) -> RazorpayResult<Value> {
        let url = self.url(path);
        tracing::debug!(method = %method, url = %url, "Razorpay API request");

        let mut request = self
            .client
            .request(method, &url)
            .basic_auth(&self.auth_key.key_id, Some(&self.auth_key.key_secret));
        if let Some(data) = data {
            request = request.query(data);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body = parse_body(&text)?;

        if status.is_success() {
            Ok(body)
        } else {
            tracing::warn!(status = status.as_u16(), url = %url, "Razorpay API error");
            Err(RazorpayError::from_response(status.as_u16(), body))
        }
    }
}

/// Empty bodies decode to `null`.
fn parse_body(text: &str) -> RazorpayResult<Value> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(text)?)
}
