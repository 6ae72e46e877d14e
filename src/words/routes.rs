// src/words/routes.rs

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers;

/// Create the words router
pub fn words_routes() -> Router {
    Router::new()
        // Public routes
        .route("/entries/en", get(handlers::list_words))
        .route("/entries/en/:word", get(handlers::get_word))
        // Authenticated per-user actions
        .route("/entries/en/:word/favorite", post(handlers::add_favorite))
        .route("/entries/en/:word/unfavorite", delete(handlers::remove_favorite))
        .route("/entries/en/:word/viewed", post(handlers::mark_viewed))
}
