// src/services/user_store.rs
//! Account persistence plus the per-user favorites and history sets

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, info};

use crate::common::{generate_user_id, safe_email_log};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("user already exists")]
    UserExists,

    #[error("user not found")]
    UserNotFound,

    #[error("word already in favorites")]
    AlreadyFavorite,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Account row; the hash is never serialized
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: Option<String>,
}

/// One favorites/history item with the time it was recorded
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ListEntry {
    pub word: String,
    pub added: String,
}

#[derive(Debug, Clone, Copy)]
enum WordList {
    Favorites,
    History,
}

impl WordList {
    fn table(self) -> &'static str {
        match self {
            WordList::Favorites => "user_favorites",
            WordList::History => "user_history",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UserStore {
    db: SqlitePool,
}

impl UserStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Inserts a new account; `email` is expected to be normalized already
    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        if self.find_by_email(email).await?.is_some() {
            return Err(StoreError::UserExists);
        }

        let id = generate_user_id();
        let inserted = sqlx::query("INSERT INTO users (id, email, password_hash) VALUES (?, ?, ?)")
            .bind(&id)
            .bind(email)
            .bind(password_hash)
            .execute(&self.db)
            .await;

        // A concurrent registration can win between the check and the insert
        if let Err(sqlx::Error::Database(db_err)) = &inserted {
            if db_err.is_unique_violation() {
                return Err(StoreError::UserExists);
            }
        }
        inserted?;

        info!(user_id = %id, email = %safe_email_log(email), "User account created");

        self.find_by_id(&id).await?.ok_or(StoreError::UserNotFound)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE email = ?",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, user_id: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, email, password_hash, created_at FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn require_user(&self, user_id: &str) -> Result<(), StoreError> {
        let exists: Option<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.db)
            .await?;
        exists.map(|_| ()).ok_or(StoreError::UserNotFound)
    }

    /// Appends `word` unless present; returns whether a row was written
    async fn insert_entry(&self, list: WordList, user_id: &str, word: &str) -> Result<bool, StoreError> {
        self.require_user(user_id).await?;

        let sql = format!("INSERT OR IGNORE INTO {} (user_id, word) VALUES (?, ?)", list.table());
        let result = sqlx::query(&sql)
            .bind(user_id)
            .bind(word)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn entries(&self, list: WordList, user_id: &str) -> Result<Vec<ListEntry>, StoreError> {
        self.require_user(user_id).await?;

        let sql = format!(
            "SELECT word, added_at AS added FROM {} WHERE user_id = ? ORDER BY id",
            list.table()
        );
        let entries = sqlx::query_as::<_, ListEntry>(&sql)
            .bind(user_id)
            .fetch_all(&self.db)
            .await?;
        Ok(entries)
    }

    /// Rejects a word that is already a favorite
    pub async fn add_favorite(&self, user_id: &str, word: &str) -> Result<(), StoreError> {
        if !self.insert_entry(WordList::Favorites, user_id, word).await? {
            return Err(StoreError::AlreadyFavorite);
        }
        debug!(user_id = %user_id, word = %word, "Favorite added");
        Ok(())
    }

    /// Removing a word that is not a favorite is a no-op
    pub async fn remove_favorite(&self, user_id: &str, word: &str) -> Result<(), StoreError> {
        self.require_user(user_id).await?;

        let result = sqlx::query("DELETE FROM user_favorites WHERE user_id = ? AND word = ?")
            .bind(user_id)
            .bind(word)
            .execute(&self.db)
            .await?;

        debug!(
            user_id = %user_id,
            word = %word,
            removed = result.rows_affected(),
            "Favorite removed"
        );
        Ok(())
    }

    pub async fn mark_viewed(&self, user_id: &str, word: &str) -> Result<(), StoreError> {
        let appended = self.insert_entry(WordList::History, user_id, word).await?;
        debug!(user_id = %user_id, word = %word, appended, "Word marked as viewed");
        Ok(())
    }

    pub async fn favorites(&self, user_id: &str) -> Result<Vec<ListEntry>, StoreError> {
        self.entries(WordList::Favorites, user_id).await
    }

    pub async fn history(&self, user_id: &str) -> Result<Vec<ListEntry>, StoreError> {
        self.entries(WordList::History, user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_pool;

    async fn store_with_user() -> (UserStore, User) {
        let store = UserStore::new(memory_pool().await);
        let user = store.create_user("reader@example.com", "hash").await.unwrap();
        (store, user)
    }

    fn words(entries: &[ListEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.word.as_str()).collect()
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (store, user) = store_with_user().await;
        assert!(user.id.starts_with("U_"));

        let second = store.create_user("reader@example.com", "other").await;
        assert!(matches!(second, Err(StoreError::UserExists)));
    }

    #[tokio::test]
    async fn test_add_then_remove_favorite_restores_list() {
        let (store, user) = store_with_user().await;
        store.add_favorite(&user.id, "apple").await.unwrap();
        let before = store.favorites(&user.id).await.unwrap();

        store.add_favorite(&user.id, "banana").await.unwrap();
        store.remove_favorite(&user.id, "banana").await.unwrap();

        assert_eq!(store.favorites(&user.id).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_add_favorite_twice_is_rejected() {
        let (store, user) = store_with_user().await;
        store.add_favorite(&user.id, "apple").await.unwrap();

        let again = store.add_favorite(&user.id, "apple").await;
        assert!(matches!(again, Err(StoreError::AlreadyFavorite)));
        assert_eq!(words(&store.favorites(&user.id).await.unwrap()), vec!["apple"]);
    }

    #[tokio::test]
    async fn test_remove_missing_favorite_is_noop() {
        let (store, user) = store_with_user().await;
        store.remove_favorite(&user.id, "ghost").await.unwrap();
        assert!(store.favorites(&user.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_viewed_is_idempotent_and_ordered() {
        let (store, user) = store_with_user().await;
        store.mark_viewed(&user.id, "banana").await.unwrap();
        store.mark_viewed(&user.id, "apple").await.unwrap();
        store.mark_viewed(&user.id, "banana").await.unwrap();

        let history = store.history(&user.id).await.unwrap();
        assert_eq!(words(&history), vec!["banana", "apple"]);
        assert!(history.iter().all(|e| !e.added.is_empty()));
    }

    #[tokio::test]
    async fn test_lists_are_per_user() {
        let (store, alice) = store_with_user().await;
        let bob = store.create_user("bob@example.com", "hash").await.unwrap();

        store.add_favorite(&alice.id, "apple").await.unwrap();
        store.add_favorite(&bob.id, "apple").await.unwrap();
        store.remove_favorite(&bob.id, "apple").await.unwrap();

        assert_eq!(words(&store.favorites(&alice.id).await.unwrap()), vec!["apple"]);
        assert!(store.favorites(&bob.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_user_is_reported() {
        let store = UserStore::new(memory_pool().await);
        assert!(matches!(
            store.add_favorite("U_MISSING", "apple").await,
            Err(StoreError::UserNotFound)
        ));
        assert!(matches!(
            store.history("U_MISSING").await,
            Err(StoreError::UserNotFound)
        ));
    }
}
