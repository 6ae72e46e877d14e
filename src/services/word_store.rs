// src/services/word_store.rs
//! Headword corpus persistence: prefix search, offset pagination, bulk load

use serde::Serialize;
use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::common::{Page, PageParams};

/// Rows per INSERT statement during bulk loads
const INSERT_CHUNK_SIZE: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Word {
    pub id: i64,
    pub word: String,
}

/// Listing filter; `start_letter` wins over `search` when both are set
#[derive(Debug, Clone)]
pub struct WordQuery {
    pub params: PageParams,
    pub search: String,
    pub start_letter: String,
}

impl WordQuery {
    pub fn prefix(&self) -> &str {
        let letter = self.start_letter.trim();
        if letter.is_empty() {
            self.search.trim()
        } else {
            letter
        }
    }
}

/// Builds a `LIKE` pattern matching `prefix` literally at the start of a word
fn like_prefix_pattern(prefix: &str) -> String {
    let mut pattern = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[derive(Debug, Clone)]
pub struct WordStore {
    db: SqlitePool,
}

impl WordStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// One page of headwords whose text starts with the query prefix
    ///
    /// SQLite `LIKE` folds ASCII case only, so the match is case-insensitive
    /// for ASCII letters. Results keep load order.
    pub async fn list(&self, query: &WordQuery) -> Result<Page<String>, sqlx::Error> {
        let pattern = like_prefix_pattern(query.prefix());

        let total_docs: i64 =
            sqlx::query_scalar(r"SELECT COUNT(*) FROM words WHERE word LIKE ? ESCAPE '\'")
                .bind(&pattern)
                .fetch_one(&self.db)
                .await?;

        let results: Vec<String> = sqlx::query_scalar(
            r"SELECT word FROM words WHERE word LIKE ? ESCAPE '\' ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(&pattern)
        .bind(query.params.limit)
        .bind(query.params.offset())
        .fetch_all(&self.db)
        .await?;

        debug!(
            prefix = %query.prefix(),
            page = query.params.page,
            limit = query.params.limit,
            total_docs,
            returned = results.len(),
            "Listed words"
        );

        Ok(Page::new(results, total_docs, query.params))
    }

    /// Exact, case-sensitive lookup; the first loaded copy wins
    pub async fn find_by_text(&self, word: &str) -> Result<Option<Word>, sqlx::Error> {
        sqlx::query_as::<_, Word>("SELECT id, word FROM words WHERE word = ? ORDER BY id LIMIT 1")
            .bind(word)
            .fetch_optional(&self.db)
            .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM words")
            .fetch_one(&self.db)
            .await
    }

    /// Appends every word; existing rows are not checked for duplicates
    ///
    /// Each chunk commits on its own, so a failure leaves earlier chunks in
    /// place.
    pub async fn insert_many(&self, words: &[String]) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;

        for chunk in words.chunks(INSERT_CHUNK_SIZE) {
            let mut tx = self.db.begin().await?;
            let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("INSERT INTO words (word) ");
            builder.push_values(chunk, |mut row, word| {
                row.push_bind(word);
            });
            inserted += builder.build().execute(&mut *tx).await?.rows_affected();
            tx.commit().await?;

            debug!(inserted, total = words.len(), "Inserted word chunk");
        }

        Ok(inserted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::memory_pool;

    async fn store_with(words: &[&str]) -> WordStore {
        let store = WordStore::new(memory_pool().await);
        let owned: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        store.insert_many(&owned).await.unwrap();
        store
    }

    fn query(page: i64, limit: i64, search: &str, start_letter: &str) -> WordQuery {
        WordQuery {
            params: PageParams { page, limit },
            search: search.to_string(),
            start_letter: start_letter.to_string(),
        }
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_prefix_pattern("ab"), "ab%");
        assert_eq!(like_prefix_pattern("50%_"), "50\\%\\_%");
        assert_eq!(like_prefix_pattern(""), "%");
    }

    #[test]
    fn test_start_letter_takes_precedence() {
        assert_eq!(query(1, 1, "ban", "a").prefix(), "a");
        assert_eq!(query(1, 1, "ban", "").prefix(), "ban");
        assert_eq!(query(1, 1, " ban ", " ").prefix(), "ban");
    }

    #[tokio::test]
    async fn test_start_letter_page_matches_scenario() {
        let store = store_with(&["apple", "ant", "banana"]).await;

        let page = store.list(&query(1, 1, "", "a")).await.unwrap();
        assert_eq!(page.results, vec!["apple"]);
        assert_eq!(page.total_docs, 2);
        assert_eq!(page.total_pages, 2);
        assert!(page.has_next);
        assert!(!page.has_prev);

        let second = store.list(&query(2, 1, "", "a")).await.unwrap();
        assert_eq!(second.results, vec!["ant"]);
        assert!(!second.has_next);
        assert!(second.has_prev);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_prefix() {
        let store = store_with(&["Apple", "pineapple", "applesauce", "Banana"]).await;

        let page = store.list(&query(1, 20, "APP", "")).await.unwrap();
        assert_eq!(page.results, vec!["Apple", "applesauce"]);

        let all = store.list(&query(1, 20, "", "")).await.unwrap();
        assert_eq!(all.total_docs, 4);
    }

    #[tokio::test]
    async fn test_wildcards_in_search_match_literally() {
        let store = store_with(&["a_b", "axb", "100%", "1000"]).await;

        let underscore = store.list(&query(1, 20, "a_", "")).await.unwrap();
        assert_eq!(underscore.results, vec!["a_b"]);

        let percent = store.list(&query(1, 20, "100%", "")).await.unwrap();
        assert_eq!(percent.results, vec!["100%"]);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let store = store_with(&["apple", "ant"]).await;
        let page = store.list(&query(5, 10, "", "")).await.unwrap();
        assert!(page.results.is_empty());
        assert_eq!(page.total_docs, 2);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next);
    }

    #[tokio::test]
    async fn test_find_by_text_is_exact() {
        let store = store_with(&["apple", "Apple"]).await;

        let found = store.find_by_text("Apple").await.unwrap().unwrap();
        assert_eq!(found.word, "Apple");
        assert!(store.find_by_text("appl").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_many_keeps_duplicates_and_spans_chunks() {
        let store = store_with(&[]).await;
        let words: Vec<String> = (0..1_203).map(|i| format!("w{i}")).collect();

        assert_eq!(store.insert_many(&words).await.unwrap(), 1_203);
        assert_eq!(store.insert_many(&words[..3]).await.unwrap(), 3);
        assert_eq!(store.count().await.unwrap(), 1_206);
    }
}
