// src/load_words.rs
//! Corpus loader: downloads WORDS_FILE_URL and appends every line to the
//! words table.

use anyhow::Context;
use dotenv::dotenv;
use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dictionary_api::common::{db, migrations, AppConfig};
use dictionary_api::services::{CorpusLoader, WordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();
    let url = config
        .words_file_url
        .clone()
        .context("WORDS_FILE_URL must point at a newline-delimited word list")?;

    let pool = db::open_pool(&config.database_url)
        .await
        .with_context(|| format!("opening {}", config.database_url))?;

    // Never reset here: the loader only appends
    migrations::run_migrations(&pool, false).await?;

    let store = WordStore::new(pool.clone());
    let loader = CorpusLoader::new(Client::new(), store.clone(), std::env::temp_dir());

    let report = loader.load(&url).await?;
    let total = store.count().await?;

    info!(
        inserted = report.inserted,
        bytes = report.downloaded_bytes,
        total_words = total,
        "Corpus load finished"
    );

    pool.close().await;
    Ok(())
}
