//! Authentication handlers

use axum::{
    extract::{Extension, Json},
    http::StatusCode,
};
use tracing::{error, info, warn};

use super::extractors::AuthedUser;
use super::models::{normalize_email, LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use super::tokens::issue_token;
use super::validators::RegisterValidator;
use crate::common::{safe_email_log, ApiError, SharedState, Validator};

/// bcrypt work factor for stored passwords
pub const BCRYPT_COST: u32 = 10;

async fn hash_password(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
        .await
        .map_err(|e| ApiError::InternalServer(format!("hashing task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, "Password hashing failed");
            ApiError::InternalServer("Error registering user".to_string())
        })
}

async fn verify_password(password: String, hash: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| ApiError::InternalServer(format!("hashing task failed: {}", e)))?
        .map_err(|e| {
            error!(error = %e, "Stored password hash could not be checked");
            ApiError::InternalServer("Error logging in".to_string())
        })
}

/// POST /auth/register
/// Creates an account
///
/// # Request Body
/// ```json
/// { "email": "user@example.com", "password": "secret123" }
/// ```
///
/// # Responses
/// - 201 `{ "message": "User registered successfully" }`
/// - 400 when the email is taken or the payload is invalid
pub async fn register(
    Extension(state_lock): Extension<SharedState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    RegisterValidator.validate(&payload).into_result().map_err(|result| {
        warn!(errors = %result.summary(), "Registration validation failed");
        ApiError::from(result)
    })?;

    let email = normalize_email(&payload.email);
    let user_store = state_lock.read().await.user_store.clone();

    if user_store.find_by_email(&email).await?.is_some() {
        info!(email = %safe_email_log(&email), "Registration rejected: email already in use");
        return Err(ApiError::BadRequest("User already exists".to_string()));
    }

    let password_hash = hash_password(payload.password).await?;
    user_store.create_user(&email, &password_hash).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User registered successfully")),
    ))
}

/// POST /auth/login
/// Exchanges credentials for a bearer token
///
/// # Responses
/// - 200 `{ "token": "<jwt>" }`
/// - 404 when no account has the email
/// - 400 when the password does not match
pub async fn login(
    Extension(state_lock): Extension<SharedState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let state = state_lock.read().await.clone();
    let email = normalize_email(&payload.email);

    let user = state
        .user_store
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

    if !verify_password(payload.password, user.password_hash.clone()).await? {
        warn!(user_id = %user.id, "Login rejected: invalid credentials");
        return Err(ApiError::BadRequest("Invalid credentials".to_string()));
    }

    let token = issue_token(&user.id, &user.email, &state.jwt_secret, state.token_ttl_minutes)
        .map_err(|e| {
            error!(error = %e, user_id = %user.id, "JWT encoding error during login");
            ApiError::InternalServer("Error logging in".to_string())
        })?;

    info!(user_id = %user.id, email = %safe_email_log(&user.email), "User logged in");

    Ok(Json(TokenResponse { token }))
}

/// POST /auth/logout
/// Tokens are stateless, so the client discards its copy; this only confirms
pub async fn logout(authed: AuthedUser) -> Json<MessageResponse> {
    info!(user_id = %authed.id, "User logout");
    Json(MessageResponse::new("Logout successful"))
}
