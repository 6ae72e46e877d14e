// src/words/handlers.rs

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use tracing::{debug, error, info};

use super::models::WordListParams;
use crate::auth::AuthedUser;
use crate::common::{ApiError, Page, SharedState};
use crate::services::dictionary::PhoneticsView;

/// GET /entries/en - One page of headwords, filtered by prefix or start letter
pub async fn list_words(
    Extension(state_lock): Extension<SharedState>,
    Query(params): Query<WordListParams>,
) -> Result<Json<Page<String>>, ApiError> {
    let query = params.into_query().map_err(ApiError::from)?;
    let word_store = state_lock.read().await.word_store.clone();

    let page = word_store.list(&query).await.map_err(|e| {
        error!(error = %e, prefix = %query.prefix(), "Database error listing words");
        ApiError::InternalServer("Error fetching words".to_string())
    })?;

    Ok(Json(page))
}

/// GET /entries/en/:word - Phonetics and definitions for a stored word
pub async fn get_word(
    Extension(state_lock): Extension<SharedState>,
    Path(word): Path<String>,
) -> Result<Json<PhoneticsView>, ApiError> {
    let state = state_lock.read().await.clone();

    let found = state
        .word_store
        .find_by_text(&word)
        .await
        .map_err(|e| {
            error!(error = %e, word = %word, "Database error looking up word");
            ApiError::InternalServer("Error fetching word".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Word not found".to_string()))?;

    let view = state.dictionary_service.describe(&found.word).await?;

    debug!(
        word = %view.word,
        phonetics = view.phonetics.len(),
        definitions = view.definitions.len(),
        "Loaded word details"
    );

    Ok(Json(view))
}

/// POST /entries/en/:word/favorite - 400 if the word is already a favorite
pub async fn add_favorite(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(word): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_store = state_lock.read().await.user_store.clone();
    user_store.add_favorite(&authed.id, &word).await?;

    info!(user_id = %authed.id, word = %word, "Word added to favorites");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /entries/en/:word/unfavorite - succeeds whether or not it was a favorite
pub async fn remove_favorite(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(word): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_store = state_lock.read().await.user_store.clone();
    user_store.remove_favorite(&authed.id, &word).await?;

    info!(user_id = %authed.id, word = %word, "Word removed from favorites");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /entries/en/:word/viewed - Append to history once
pub async fn mark_viewed(
    Extension(state_lock): Extension<SharedState>,
    authed: AuthedUser,
    Path(word): Path<String>,
) -> Result<StatusCode, ApiError> {
    let user_store = state_lock.read().await.user_store.clone();
    user_store.mark_viewed(&authed.id, &word).await?;

    Ok(StatusCode::NO_CONTENT)
}
