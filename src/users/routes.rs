// src/users/routes.rs

use axum::{routing::get, Router};

use super::handlers;

/// Create the signed-in user router
pub fn users_routes() -> Router {
    Router::new()
        .route("/user/me", get(handlers::me))
        .route("/user/me/favorites", get(handlers::favorites))
        .route("/user/me/history", get(handlers::history))
}
