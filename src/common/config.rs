//! Environment configuration for the API server and the corpus loader

use std::env;
use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://dictionary.db";
pub const DEFAULT_DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
const DEFAULT_JWT_SECRET: &str = "replace_with_strong_secret";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_TOKEN_TTL_MINUTES: i64 = 60;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub port: u16,
    pub dictionary_api_url: String,
    pub words_file_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub reset_db: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret = env::var("JWT_SECRET").unwrap_or_else(|_| {
            warn!("JWT_SECRET not set, falling back to the development secret");
            DEFAULT_JWT_SECRET.to_string()
        });

        let token_ttl_minutes = env::var("TOKEN_TTL_MINUTES")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_MINUTES);

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let cors_origins = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            jwt_secret,
            token_ttl_minutes,
            port,
            dictionary_api_url: env::var("DICTIONARY_API_URL")
                .unwrap_or_else(|_| DEFAULT_DICTIONARY_API_URL.to_string()),
            words_file_url: env::var("WORDS_FILE_URL").ok().filter(|v| !v.is_empty()),
            cors_origins,
            reset_db: env::var("RESET_DB")
                .map(|v| v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        // Save current env vars
        let keys = ["PORT", "TOKEN_TTL_MINUTES", "DICTIONARY_API_URL", "WORDS_FILE_URL"];
        let saved: Vec<_> = keys.iter().map(|k| (*k, env::var(k).ok())).collect();
        for key in keys {
            env::remove_var(key);
        }

        let config = AppConfig::from_env();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.token_ttl_minutes, 60);
        assert_eq!(config.dictionary_api_url, DEFAULT_DICTIONARY_API_URL);
        assert!(config.words_file_url.is_none());

        // Restore
        for (key, value) in saved {
            if let Some(v) = value {
                env::set_var(key, v);
            }
        }
    }
}
