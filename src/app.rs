// src/app.rs
//! Router composition shared by the server binary and the HTTP tests

use axum::{
    extract::Extension,
    http::{header, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::warn;

use crate::common::{ApiError, SharedState};
use crate::{auth, logging_middleware, users, words};

/// GET /health - Liveness plus a database round trip
async fn health(Extension(state_lock): Extension<SharedState>) -> Result<Json<Value>, ApiError> {
    let db = state_lock.read().await.db.clone();
    sqlx::query("SELECT 1")
        .execute(&db)
        .await
        .map_err(ApiError::DatabaseError)?;
    Ok(Json(json!({ "status": "ok" })))
}

/// CORS policy for the dashboard origins
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

pub fn build_router(state: SharedState, cors: CorsLayer) -> Router {
    Router::new()
        .merge(auth::auth_routes())
        .merge(words::words_routes())
        .merge(users::users_routes())
        .route("/health", get(health))
        .layer(middleware::from_fn(logging_middleware::log_request_response))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
