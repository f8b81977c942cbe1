//! Integration tests for rate limiting middleware.
//!
//! These tests verify the HTTP-level behavior of rate limiting,
//! including 429 responses and proper integration with the middleware stack.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use tutorpay_hex::{PaymentService, inbound::HttpServer};
use tutorpay_types::{
    FiatCurrency, RateEntry, RateError, RateProvider, RateSnapshot, RateSource, TokenRegistry,
};

/// Fixed-rate provider so tests never touch the network.
struct StaticRates;

#[async_trait]
impl RateProvider for StaticRates {
    async fn get_rates(
        &self,
        fiat: FiatCurrency,
        symbols: &[&str],
    ) -> Result<RateSnapshot, RateError> {
        let mut rates = HashMap::new();
        for symbol in symbols {
            rates.insert(
                symbol.to_string(),
                RateEntry {
                    rate: 100.0,
                    source: RateSource::Fallback,
                },
            );
        }
        Ok(RateSnapshot::new(fiat, rates))
    }
}

/// Helper to create a test server with a very low rate limit.
fn create_test_server(requests_per_minute: u32) -> HttpServer<StaticRates> {
    let service = PaymentService::new(Arc::new(TokenRegistry::with_defaults()), StaticRates);
    HttpServer::with_rate_limit(service, requests_per_minute)
}

/// Helper to make a health check request.
fn health_request() -> Request<Body> {
    Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap()
}

/// Helper to make an API request for the given client.
fn api_request(client_token: &str) -> Request<Body> {
    Request::builder()
        .uri("/api/tokens")
        .header("Authorization", format!("Bearer {}", client_token))
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_rate_limiting_returns_429_when_exceeded() {
    // Create server with only 3 requests allowed per minute
    let server = create_test_server(3);
    let app = server.router();

    // Make 3 requests (uses up the quota for this client)
    for i in 1..=3 {
        let response = app.clone().oneshot(api_request("tutor-admin")).await.unwrap();
        assert_ne!(
            response.status(),
            StatusCode::TOO_MANY_REQUESTS,
            "Request {} should not be rate limited (quota not yet exceeded)",
            i
        );
    }

    // 4th request should be rate limited
    let response = app.clone().oneshot(api_request("tutor-admin")).await.unwrap();

    assert_eq!(
        response.status(),
        StatusCode::TOO_MANY_REQUESTS,
        "Request should be rate limited after exceeding quota"
    );

    // Verify the response body contains the expected error
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("Rate limit exceeded")
    );
    assert_eq!(json["retry_after_seconds"], 60);
}

#[tokio::test]
async fn test_rate_limiting_health_endpoint_bypassed() {
    // Create server with only 1 request allowed per minute
    let server = create_test_server(1);
    let app = server.router();

    // Make many health requests - all should succeed (not rate limited)
    for _ in 0..10 {
        let response = app.clone().oneshot(health_request()).await.unwrap();

        assert_eq!(
            response.status(),
            StatusCode::OK,
            "Health endpoint should not be rate limited"
        );
    }
}

#[tokio::test]
async fn test_rate_limiting_per_client_isolation() {
    let server = create_test_server(1);
    let app = server.router();

    // Client A uses its quota
    let response = app.clone().oneshot(api_request("client-a")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(api_request("client-a")).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Client B still has its own quota
    let response = app.clone().oneshot(api_request("client-b")).await.unwrap();
    assert_ne!(
        response.status(),
        StatusCode::TOO_MANY_REQUESTS,
        "Client B should have its own quota"
    );
}

#[tokio::test]
async fn test_rate_limiting_response_format() {
    let server = create_test_server(1);
    let app = server.router();

    // Use up the 1-request quota
    let _ = app.clone().oneshot(api_request("client")).await;

    // Get rate limited response
    let response = app.clone().oneshot(api_request("client")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    // Verify headers
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().contains("application/json"));

    // Verify body structure
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert!(
        json.get("error").is_some(),
        "Response should have 'error' field"
    );
    assert!(
        json.get("retry_after_seconds").is_some(),
        "Response should have 'retry_after_seconds' field"
    );
}
