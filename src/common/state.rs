// Application state shared across handlers

use reqwest::Client;
use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::{DictionaryService, UserStore, WordStore};

/// Shared handle injected into the router as an `Extension`
pub type SharedState = Arc<RwLock<AppState>>;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub http: Client,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub word_store: Arc<WordStore>,
    pub user_store: Arc<UserStore>,
    pub dictionary_service: Arc<DictionaryService>,
}

impl AppState {
    /// Wires the stores and the definition gateway around one pool and client
    pub fn new(
        db: SqlitePool,
        http: Client,
        jwt_secret: String,
        token_ttl_minutes: i64,
        dictionary_api_url: String,
    ) -> Self {
        Self {
            word_store: Arc::new(WordStore::new(db.clone())),
            user_store: Arc::new(UserStore::new(db.clone())),
            dictionary_service: Arc::new(DictionaryService::new(http.clone(), dictionary_api_url)),
            db,
            http,
            jwt_secret,
            token_ttl_minutes,
        }
    }

    pub fn into_shared(self) -> SharedState {
        Arc::new(RwLock::new(self))
    }
}
