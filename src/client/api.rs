//! Typed HTTP client for the dictionary API

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::state::{WordsRequest, PAGE_SIZE};
use crate::auth::models::TokenResponse;
use crate::common::Page;
use crate::services::dictionary::PhoneticsView;
use crate::services::user_store::ListEntry;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[error("not signed in")]
    NotAuthenticated,
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    /// Turns a non-2xx response into `ClientError::Status`
    async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.message,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string(),
        };
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ClientError> {
        let response = Self::check(builder.send().await?).await?;
        Ok(response.json::<T>().await?)
    }

    async fn no_content(builder: RequestBuilder) -> Result<(), ClientError> {
        Self::check(builder.send().await?).await?;
        Ok(())
    }

    fn word_path(word: &str, action: &str) -> String {
        format!("/entries/en/{}/{}", urlencoding::encode(word), action)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let builder = self
            .request(Method::POST, "/auth/register")
            .json(&json!({ "email": email, "password": password }));
        Self::no_content(builder).await
    }

    /// Logs in and keeps the token for later calls
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let builder = self
            .request(Method::POST, "/auth/login")
            .json(&json!({ "email": email, "password": password }));
        let TokenResponse { token } = Self::json(builder).await?;
        self.token = Some(token);
        Ok(())
    }

    /// Tokens are stateless; dropping ours is the whole logout
    pub fn logout(&mut self) {
        self.token = None;
    }

    pub async fn fetch_words(&self, request: &WordsRequest) -> Result<Page<String>, ClientError> {
        let builder = self.request(Method::GET, "/entries/en").query(&[
            ("page", request.page.to_string()),
            ("limit", PAGE_SIZE.to_string()),
            ("search", request.search.clone()),
            ("startLetter", request.start_letter.clone()),
        ]);
        Self::json(builder).await
    }

    /// Word details; a server-side 500 shows as an empty entry
    pub async fn fetch_phonetics(&self, word: &str) -> Result<PhoneticsView, ClientError> {
        let path = format!("/entries/en/{}", urlencoding::encode(word));
        match Self::json(self.request(Method::GET, &path)).await {
            Err(ClientError::Status { status, message })
                if status == StatusCode::INTERNAL_SERVER_ERROR.as_u16() =>
            {
                warn!(word = %word, message = %message, "Phonetics fetch failed, showing empty entry");
                Ok(PhoneticsView::empty(word))
            }
            other => other,
        }
    }

    async fn fetch_list(&self, path: &str) -> Result<Vec<String>, ClientError> {
        let page: Page<ListEntry> = Self::json(self.authed(Method::GET, path)?).await?;
        debug!(path = %path, count = page.results.len(), "Fetched user list");
        Ok(page.results.into_iter().map(|entry| entry.word).collect())
    }

    pub async fn fetch_favorites(&self) -> Result<Vec<String>, ClientError> {
        self.fetch_list("/user/me/favorites").await
    }

    pub async fn fetch_viewed(&self) -> Result<Vec<String>, ClientError> {
        self.fetch_list("/user/me/history").await
    }

    pub async fn add_favorite(&self, word: &str) -> Result<(), ClientError> {
        Self::no_content(self.authed(Method::POST, &Self::word_path(word, "favorite"))?).await
    }

    pub async fn remove_favorite(&self, word: &str) -> Result<(), ClientError> {
        Self::no_content(self.authed(Method::DELETE, &Self::word_path(word, "unfavorite"))?).await
    }

    pub async fn mark_viewed(&self, word: &str) -> Result<(), ClientError> {
        Self::no_content(self.authed(Method::POST, &Self::word_path(word, "viewed"))?).await
    }
}
