// src/services/corpus.rs
//! One-shot corpus load: download a newline-delimited word list, insert it

use reqwest::Client;
use std::path::{Path, PathBuf};
use tempfile::TempPath;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{info, warn};

use super::word_store::WordStore;

const DOWNLOAD_PREFIX: &str = "words-";

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("download failed: {0}")]
    Download(#[from] reqwest::Error),

    #[error("word list server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub downloaded_bytes: u64,
    pub inserted: u64,
}

/// Splits on `\n`, strips a trailing `\r` and drops empty lines
pub fn parse_word_list(content: &str) -> Vec<String> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Decodes the downloaded list, replacing invalid UTF-8 instead of failing
pub fn decode_word_list(bytes: &[u8]) -> String {
    let text = String::from_utf8_lossy(bytes);
    if let std::borrow::Cow::Owned(_) = text {
        warn!("Word list is not valid UTF-8, invalid bytes replaced");
    }
    text.into_owned()
}

/// Streams `url` into `file`, returning the number of bytes written
pub async fn download_to(http: &Client, url: &str, file: &mut fs::File) -> Result<u64, CorpusError> {
    let mut response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CorpusError::Status(status));
    }

    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;

    Ok(written)
}

pub struct CorpusLoader {
    http: Client,
    store: WordStore,
    work_dir: PathBuf,
}

impl CorpusLoader {
    pub fn new(http: Client, store: WordStore, work_dir: PathBuf) -> Self {
        Self {
            http,
            store,
            work_dir,
        }
    }

    /// Downloads, parses and inserts the list at `url`
    ///
    /// Words already in the store are not checked, and a failed insert keeps
    /// whatever was committed before it. The download goes to a fresh,
    /// uniquely named file in the work directory and is removed either way.
    pub async fn load(&self, url: &str) -> Result<LoadReport, CorpusError> {
        let (file, temp_path) = tempfile::Builder::new()
            .prefix(DOWNLOAD_PREFIX)
            .suffix(".txt")
            .tempfile_in(&self.work_dir)?
            .into_parts();

        let result = self.load_via(url, fs::File::from_std(file), &temp_path).await;

        let shown = temp_path.display().to_string();
        match TempPath::close(temp_path) {
            Ok(()) => info!(path = %shown, "Temporary file removed"),
            Err(e) => warn!(path = %shown, error = %e, "Failed to remove temporary file"),
        }

        result
    }

    async fn load_via(
        &self,
        url: &str,
        mut file: fs::File,
        temp_path: &Path,
    ) -> Result<LoadReport, CorpusError> {
        info!(url = %url, path = %temp_path.display(), "Starting download");
        let downloaded_bytes = download_to(&self.http, url, &mut file).await?;
        drop(file);
        info!(bytes = downloaded_bytes, "Download complete");

        let content = decode_word_list(&fs::read(temp_path).await?);
        let words = parse_word_list(&content);
        info!(words = words.len(), "Saving words to the database");

        let inserted = self.store.insert_many(&words).await?;
        info!(inserted, "Words saved");

        Ok(LoadReport {
            downloaded_bytes,
            inserted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_pool, spawn_provider};
    use axum::{http::StatusCode, routing::get, Router};

    fn is_empty(dir: &Path) -> bool {
        std::fs::read_dir(dir).unwrap().next().is_none()
    }

    #[test]
    fn test_parse_word_list_drops_blank_lines() {
        let words = parse_word_list("apple\r\nant\n\nbanana\n");
        assert_eq!(words, vec!["apple", "ant", "banana"]);
        assert!(parse_word_list("").is_empty());
    }

    #[tokio::test]
    async fn test_load_inserts_and_removes_download() {
        let app = Router::new().route("/words.txt", get(|| async { "apple\nant\n\nbanana\n" }));
        let base = spawn_provider(app).await;
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::new(memory_pool().await);
        let loader = CorpusLoader::new(reqwest::Client::new(), store.clone(), dir.path().to_path_buf());

        let report = loader.load(&format!("{base}/words.txt")).await.unwrap();

        assert_eq!(report.inserted, 3);
        assert_eq!(report.downloaded_bytes, 18);
        assert_eq!(store.count().await.unwrap(), 3);
        assert!(is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_repeated_load_duplicates_words() {
        let app = Router::new().route("/words.txt", get(|| async { "apple\nant" }));
        let base = spawn_provider(app).await;
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::new(memory_pool().await);
        let loader = CorpusLoader::new(reqwest::Client::new(), store.clone(), dir.path().to_path_buf());

        loader.load(&format!("{base}/words.txt")).await.unwrap();
        loader.load(&format!("{base}/words.txt")).await.unwrap();

        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_failed_download_reports_status() {
        let app = Router::new().route("/words.txt", get(|| async { StatusCode::NOT_FOUND }));
        let base = spawn_provider(app).await;
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::new(memory_pool().await);
        let loader = CorpusLoader::new(reqwest::Client::new(), store.clone(), dir.path().to_path_buf());

        let err = loader.load(&format!("{base}/words.txt")).await.unwrap_err();
        assert!(matches!(err, CorpusError::Status(s) if s.as_u16() == 404));
        assert_eq!(store.count().await.unwrap(), 0);
        assert!(is_empty(dir.path()));
    }

    #[tokio::test]
    async fn test_invalid_utf8_line_does_not_abort_load() {
        let app = Router::new().route(
            "/words.txt",
            get(|| async { b"apple\ncaf\xe9\nbanana\n".to_vec() }),
        );
        let base = spawn_provider(app).await;
        let dir = tempfile::tempdir().unwrap();
        let store = WordStore::new(memory_pool().await);
        let loader = CorpusLoader::new(reqwest::Client::new(), store.clone(), dir.path().to_path_buf());

        let report = loader.load(&format!("{base}/words.txt")).await.unwrap();

        assert_eq!(report.inserted, 3);
        assert!(store.find_by_text("caf\u{FFFD}").await.unwrap().is_some());
        assert!(store.find_by_text("banana").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_existing_file_in_work_dir_is_left_alone() {
        let app = Router::new().route("/words.txt", get(|| async { "apple\n" }));
        let base = spawn_provider(app).await;
        let dir = tempfile::tempdir().unwrap();
        let planted = dir.path().join("downloaded_words.txt");
        std::fs::write(&planted, "keep me").unwrap();
        let store = WordStore::new(memory_pool().await);
        let loader = CorpusLoader::new(reqwest::Client::new(), store.clone(), dir.path().to_path_buf());

        loader.load(&format!("{base}/words.txt")).await.unwrap();

        assert_eq!(std::fs::read_to_string(&planted).unwrap(), "keep me");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_decode_word_list_replaces_invalid_bytes() {
        assert_eq!(decode_word_list(b"ant\n"), "ant\n");
        assert_eq!(decode_word_list(b"caf\xe9"), "caf\u{FFFD}");
    }
}
