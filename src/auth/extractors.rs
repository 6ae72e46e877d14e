//! Authentication extractors for Axum

use async_trait::async_trait;
use axum::{
    extract::{Extension, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::{debug, warn};

use super::tokens::{verify_token, TokenError};
use crate::common::{safe_email_log, ApiError, SharedState};

/// Authenticated user extractor
///
/// Validates the bearer token's signature and expiry. A missing token is
/// rejected with 401, a bad or expired one with 403.
#[derive(Debug, Clone)]
pub struct AuthedUser {
    pub id: String,
    pub email: String,
}

/// Token part of an `Authorization` value, accepting a bare token too
fn bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ").unwrap_or(header).trim();
    (!token.is_empty()).then_some(token)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(state_lock): Extension<SharedState> =
            Extension::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::InternalServer("missing app state".to_string()))?;

        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(bearer_token)
            .map(str::to_string);

        let token = match token {
            Some(t) => t,
            None => {
                warn!("Authentication failed: missing Authorization header");
                return Err(ApiError::Unauthorized("missing auth".into()));
            }
        };

        let secret = state_lock.read().await.jwt_secret.clone();

        match verify_token(&token, &secret) {
            Ok(claims) => {
                debug!(
                    user_id = %claims.sub,
                    email = %safe_email_log(&claims.email),
                    "User authentication successful via extractor"
                );
                Ok(AuthedUser {
                    id: claims.sub,
                    email: claims.email,
                })
            }
            Err(TokenError::Expired) => {
                warn!("Authentication failed: token expired");
                Err(ApiError::Forbidden("token expired".into()))
            }
            Err(_) => Err(ApiError::Forbidden("invalid token".into())),
        }
    }
}
