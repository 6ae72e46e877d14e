// src/users/handlers.rs

use axum::{extract::Extension, Json};
use serde::Serialize;
use tracing::debug;

use crate::auth::AuthedUser;
use crate::common::{ApiError, Page, SharedState};
use crate::services::user_store::ListEntry;

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
}

/// GET /user/me - Placeholder profile; accounts carry no profile data yet
pub async fn me(_authed: AuthedUser) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        name: "User 1".to_string(),
        email: "example@email.com".to_string(),
    })
}

/// GET /user/me/favorites
///
/// The full list as a single page. Word listing paginates server-side, these
/// lists do not; the dashboard slices them itself.
pub async fn favorites(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<Page<ListEntry>>, ApiError> {
    let user_store = state_lock.read().await.user_store.clone();
    let entries = user_store.favorites(&authed.id).await?;

    debug!(user_id = %authed.id, count = entries.len(), "Loaded favorites");
    Ok(Json(Page::single(entries)))
}

/// GET /user/me/history - The full list as a single page
pub async fn history(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
) -> Result<Json<Page<ListEntry>>, ApiError> {
    let user_store = state_lock.read().await.user_store.clone();
    let entries = user_store.history(&authed.id).await?;

    debug!(user_id = %authed.id, count = entries.len(), "Loaded history");
    Ok(Json(Page::single(entries)))
}
