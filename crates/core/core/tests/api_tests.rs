//! HTTP tests for `RazorApi` against a local Razorpay stand-in.
//!
//! This test suite covers:
//! - Basic auth and allowed headers on every request
//! - Request data sent as the query string
//! - Error bodies normalized into `RazorpayError::Api`

use std::net::SocketAddr;

use axum::Router;
use axum::extract::RawQuery;
use axum::http::{HeaderMap, Method, StatusCode};
use axum::routing::any;
use razorpay_core::{AuthKey, RazorApi, RazorpayConfig, RazorpayError};
use serde_json::{Value, json};

const BASIC_AUTH: &str = "Basic cnpwX3Rlc3RfMTpzZWNyZXQ=";

async fn echo(method: Method, headers: HeaderMap, RawQuery(query): RawQuery) -> axum::Json<Value> {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    axum::Json(json!({
        "method": method.as_str(),
        "query": query,
        "authorization": header("authorization"),
        "account": header("x-razorpay-account"),
    }))
}

async fn fail() -> (StatusCode, axum::Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        axum::Json(json!({
            "error": {
                "code": "BAD_REQUEST_ERROR",
                "description": "The amount must be at least INR 1.00",
            }
        })),
    )
}

async fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn spawn_server() -> SocketAddr {
    let app = Router::new()
        .route("/v1/payments", any(echo))
        .route("/v1/payments/{id}", any(echo))
        .route("/v1/orders", any(fail))
        .route("/v1/empty", any(no_content));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn build_api(addr: SocketAddr) -> RazorApi {
    let config = RazorpayConfig::new(AuthKey::new("rzp_test_1", "secret"))
        .with_host_url(format!("http://{addr}/v1/"))
        .with_header("X-Razorpay-Account", "acc_1");
    RazorApi::new(&config).unwrap()
}

mod request_tests {
    use super::*;

    #[tokio::test]
    async fn test_post_sends_data_as_query_with_basic_auth() {
        let api = build_api(spawn_server().await);

        let body = api
            .post("payments", Some(&[("amount", "50000"), ("currency", "INR")]))
            .await
            .unwrap();

        assert_eq!(body["method"], "POST");
        assert_eq!(body["query"], "amount=50000&currency=INR");
        assert_eq!(body["authorization"], BASIC_AUTH);
        assert_eq!(body["account"], "acc_1");
    }

    #[tokio::test]
    async fn test_get_sends_data_as_query() {
        let api = build_api(spawn_server().await);

        let body = api.get("payments", Some(&[("count", "10")])).await.unwrap();

        assert_eq!(body["method"], "GET");
        assert_eq!(body["query"], "count=10");
        assert_eq!(body["authorization"], BASIC_AUTH);
    }

    #[tokio::test]
    async fn test_get_without_data_sends_no_query() {
        let api = build_api(spawn_server().await);

        let body = api.get::<()>("payments/pay_1", None).await.unwrap();

        assert_eq!(body["method"], "GET");
        assert_eq!(body["query"], Value::Null);
    }

    #[tokio::test]
    async fn test_delete_sends_no_query() {
        let api = build_api(spawn_server().await);

        let body = api.delete("payments/pay_1").await.unwrap();

        assert_eq!(body["method"], "DELETE");
        assert_eq!(body["query"], Value::Null);
        assert_eq!(body["authorization"], BASIC_AUTH);
    }

    #[tokio::test]
    async fn test_empty_response_is_null() {
        let api = build_api(spawn_server().await);

        let body = api.patch::<()>("empty", None).await.unwrap();
        assert_eq!(body, Value::Null);
    }
}

mod error_tests {
    use super::*;

    #[tokio::test]
    async fn test_error_body_becomes_api_error() {
        let api = build_api(spawn_server().await);

        let err = api
            .post("orders", Some(&[("amount", "0")]))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(400));
        match err {
            RazorpayError::Api { status_code, error } => {
                assert_eq!(status_code, 400);
                assert_eq!(
                    error,
                    json!({
                        "code": "BAD_REQUEST_ERROR",
                        "description": "The amount must be at least INR 1.00",
                    })
                );
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_http_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let api = build_api(addr);
        let err = api.delete("payments/pay_1").await.unwrap_err();
        assert_eq!(err.status_code(), None);
    }
}
