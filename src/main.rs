// src/main.rs
use dotenv::dotenv;
use reqwest::Client;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dictionary_api::app::{build_router, cors_layer};
use dictionary_api::common::{db, migrations, AppConfig, AppState};

/// Outbound timeout for dictionary provider calls
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// MAIN APPLICATION ENTRY POINT
// ============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // ========================================================================
    // ENVIRONMENT CONFIGURATION
    // ========================================================================

    let config = AppConfig::from_env();

    // ========================================================================
    // DATABASE SETUP
    // ========================================================================

    let pool = db::open_pool(&config.database_url).await?;

    migrations::run_migrations(&pool, config.reset_db).await?;

    // ========================================================================
    // APPLICATION STATE
    // ========================================================================

    let http_client = Client::builder().timeout(HTTP_TIMEOUT).build()?;

    let shared = AppState::new(
        pool,
        http_client,
        config.jwt_secret.clone(),
        config.token_ttl_minutes,
        config.dictionary_api_url.clone(),
    )
    .into_shared();
    info!(provider = %config.dictionary_api_url, "Application state initialized");

    // ========================================================================
    // SERVER STARTUP
    // ========================================================================

    let app = build_router(shared, cors_layer(&config.cors_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("Listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}
