//! HTTP-level tests for the exchange rate routes.
//!
//! Runs the full stack: router, service, in-memory SQLite and the Alpha
//! Vantage adapter pointed at a mock upstream.
//!
//! This test requires the `sqlite` feature flag.

#![cfg(feature = "sqlite")]

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    routing::get,
};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use rates_hex::{RateService, inbound::HttpServer};
use rates_repo::SqliteRepo;
use rates_source::{AlphaVantageSource, RetryPolicy, SourceConfig};
use serde_json::{Value, json};
use tower::ServiceExt;

/// Helper to create a test server whose source talks to `upstream`.
async fn create_test_server(upstream: &MockServer) -> HttpServer<SqliteRepo, AlphaVantageSource> {
    // Use in-memory SQLite for tests
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let source = AlphaVantageSource::new(
        SourceConfig::new("test-key")
            .with_base_url(upstream.base_url())
            .with_retry(RetryPolicy::new(3, Duration::from_millis(5))),
    )
    .unwrap();
    HttpServer::new(RateService::new(repo, source))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_request(body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/exchangerate")
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn quote_body(bid: &str, ask: &str) -> Value {
    json!({
        "Realtime Currency Exchange Rate": {
            "8. Bid Price": bid,
            "9. Ask Price": ask
        }
    })
}

/// Upstream that answers 503 for the first `failures` calls, then a quote.
async fn flaky_upstream(failures: u32) -> (String, Arc<AtomicU32>) {
    let hits = Arc::new(AtomicU32::new(0));
    let counter = hits.clone();

    let app = Router::new().route(
        "/query",
        get(move || {
            let counter = counter.clone();
            async move {
                let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if n <= failures {
                    (StatusCode::SERVICE_UNAVAILABLE, String::from("busy"))
                } else {
                    (StatusCode::OK, quote_body("1.10", "1.12").to_string())
                }
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), hits)
}

#[tokio::test]
async fn test_health() {
    let upstream = MockServer::start_async().await;
    let app = create_test_server(&upstream).await.router();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_get_unknown_pair_fetches_once_then_serves_stored() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET)
                .path("/query")
                .query_param("from_currency", "USD")
                .query_param("to_currency", "EUR");
            then.status(200).json_body(quote_body("1.10", "1.12"));
        })
        .await;
    let app = create_test_server(&upstream).await.router();

    let first = app
        .clone()
        .oneshot(get_request("/api/exchangerate/USD/EUR"))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let first = body_json(first).await;
    assert_eq!(first["pair"]["base_currency"], "USD");
    assert_eq!(first["pair"]["quote_currency"], "EUR");
    assert_eq!(first["bid"], 1.10);
    assert_eq!(first["ask"], 1.12);

    let second = app
        .oneshot(get_request("/api/exchangerate/USD/EUR"))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await, first);

    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_get_unavailable_pair_is_404() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(503);
        })
        .await;
    let app = create_test_server(&upstream).await.router();

    let response = app
        .oneshot(get_request("/api/exchangerate/USD/XYZ"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], 404);
    assert_eq!(json["error"], "Exchange rate not available for USD/XYZ");
    mock.assert_hits_async(3).await;
}

#[tokio::test]
async fn test_get_invalid_code_is_400() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(200).json_body(quote_body("1.10", "1.12"));
        })
        .await;
    let app = create_test_server(&upstream).await.router();

    let response = app
        .oneshot(get_request("/api/exchangerate/U%24D/EUR"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], 400);
    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_post_creates_rate_without_upstream() {
    let upstream = MockServer::start_async().await;
    let mock = upstream
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(200).json_body(quote_body("9.9", "9.9"));
        })
        .await;
    let app = create_test_server(&upstream).await.router();

    let response = app
        .clone()
        .oneshot(post_request(json!({
            "base_currency": "USD",
            "quote_currency": "EUR",
            "bid": 1.15,
            "ask": 1.17
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        "/api/exchangerate/USD/EUR"
    );
    let created = body_json(response).await;
    assert_eq!(created["bid"], 1.15);

    let fetched = app
        .oneshot(get_request("/api/exchangerate/USD/EUR"))
        .await
        .unwrap();
    assert_eq!(body_json(fetched).await, created);

    mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_post_existing_pair_keeps_identity() {
    let upstream = MockServer::start_async().await;
    upstream
        .mock_async(|when, then| {
            when.method(GET).path("/query");
            then.status(200).json_body(quote_body("1.10", "1.12"));
        })
        .await;
    let app = create_test_server(&upstream).await.router();

    let fetched = app
        .clone()
        .oneshot(get_request("/api/exchangerate/USD/EUR"))
        .await
        .unwrap();
    let fetched = body_json(fetched).await;

    let updated = app
        .oneshot(post_request(json!({
            "base_currency": "USD",
            "quote_currency": "EUR",
            "bid": 1.15,
            "ask": 1.17
        })))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::CREATED);
    let updated = body_json(updated).await;

    assert_eq!(updated["id"], fetched["id"]);
    assert_eq!(updated["bid"], 1.15);
    assert_eq!(updated["ask"], 1.17);
}

#[tokio::test]
async fn test_post_negative_price_is_stored_as_given() {
    let upstream = MockServer::start_async().await;
    let app = create_test_server(&upstream).await.router();

    let response = app
        .clone()
        .oneshot(post_request(json!({
            "base_currency": "USD",
            "quote_currency": "EUR",
            "bid": -1.0,
            "ask": 1.17
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["bid"], -1.0);

    let fetched = app
        .oneshot(get_request("/api/exchangerate/USD/EUR"))
        .await
        .unwrap();
    assert_eq!(body_json(fetched).await, created);
}

#[tokio::test]
async fn test_post_malformed_body_uses_error_shape() {
    let upstream = MockServer::start_async().await;
    let app = create_test_server(&upstream).await.router();

    let response = app
        .oneshot(post_request(json!({
            "base_currency": "USD",
            "bid": "lots"
        })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], 400);
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn test_get_retries_transient_failures_and_stores_once() {
    let (upstream_url, hits) = flaky_upstream(2).await;
    let repo = SqliteRepo::new("sqlite::memory:").await.unwrap();
    let pool = repo.pool().clone();
    let source = AlphaVantageSource::new(
        SourceConfig::new("test-key")
            .with_base_url(upstream_url)
            .with_retry(RetryPolicy::new(3, Duration::from_millis(5))),
    )
    .unwrap();
    let app = HttpServer::new(RateService::new(repo, source)).router();

    let response = app
        .oneshot(get_request("/api/exchangerate/USD/EUR"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["bid"], 1.10);
    assert_eq!(json["ask"], 1.12);
    assert_eq!(hits.load(Ordering::SeqCst), 3);

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM exchange_rates")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let upstream = MockServer::start_async().await;
    let app = create_test_server(&upstream).await.router();

    let response = app
        .oneshot(get_request("/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"].get("/api/exchangerate/{base}/{quote}").is_some());
}
