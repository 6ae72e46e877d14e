//! Shared fixtures for the in-crate tests

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::app::{build_router, cors_layer};
use crate::common::{migrations::run_migrations, AppState, SharedState};

pub const TEST_SECRET: &str = "test_secret_key";

/// Nothing listens here; tests that never reach the provider use it
const UNREACHABLE_PROVIDER: &str = "http://127.0.0.1:9";

/// Migrated in-memory database on a single connection
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    run_migrations(&pool, false).await.unwrap();
    pool
}

/// Serves `app` on an ephemeral port and returns its base URL
pub async fn spawn_provider(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn test_app(provider_url: Option<String>) -> (Router, SharedState) {
    let state = AppState::new(
        memory_pool().await,
        reqwest::Client::new(),
        TEST_SECRET.to_string(),
        60,
        provider_url.unwrap_or_else(|| UNREACHABLE_PROVIDER.to_string()),
    )
    .into_shared();
    let router = build_router(state.clone(), cors_layer(&[]));
    (router, state)
}

/// Sends one request through the router; empty bodies come back as `Null`
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// Registers `email` with a fixed password and returns a bearer token
pub async fn register_and_login(app: &Router, email: &str) -> String {
    let creds = serde_json::json!({ "email": email, "password": "secret123" });
    let (status, _) = send(app, Method::POST, "/auth/register", Some(creds.clone()), None).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(app, Method::POST, "/auth/login", Some(creds), None).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}
