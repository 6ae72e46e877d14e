// src/services/dictionary.rs
//! Definition gateway over the external phonetics/definitions provider

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("no dictionary entry for '{0}'")]
    NoEntry(String),

    #[error("dictionary provider request failed: {0}")]
    Upstream(String),
}

/// Phonetic transcription with a playable recording
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phonetic {
    pub text: Option<String>,
    pub audio: String,
}

/// Detail payload returned by `GET /entries/en/:word`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneticsView {
    pub word: String,
    pub phonetics: Vec<Phonetic>,
    pub definitions: Vec<String>,
}

impl PhoneticsView {
    pub fn empty(word: &str) -> Self {
        Self {
            word: word.to_string(),
            phonetics: Vec::new(),
            definitions: Vec::new(),
        }
    }
}

// Provider schema: everything optional, defaulted when reshaping

#[derive(Debug, Deserialize)]
struct ProviderEntry {
    phonetics: Option<Vec<ProviderPhonetic>>,
    meanings: Option<Vec<ProviderMeaning>>,
}

#[derive(Debug, Deserialize)]
struct ProviderPhonetic {
    text: Option<String>,
    audio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderMeaning {
    definitions: Option<Vec<ProviderDefinition>>,
}

#[derive(Debug, Deserialize)]
struct ProviderDefinition {
    definition: Option<String>,
}

/// Keeps audio-bearing phonetics and flattens definitions in provider order
fn reshape(word: &str, entries: Vec<ProviderEntry>) -> PhoneticsView {
    let mut view = PhoneticsView::empty(word);

    for entry in entries {
        view.phonetics.extend(
            entry
                .phonetics
                .unwrap_or_default()
                .into_iter()
                .filter_map(|p| match p.audio {
                    Some(audio) if !audio.trim().is_empty() => Some(Phonetic { text: p.text, audio }),
                    _ => None,
                }),
        );

        view.definitions.extend(
            entry
                .meanings
                .unwrap_or_default()
                .into_iter()
                .flat_map(|m| m.definitions.unwrap_or_default())
                .filter_map(|d| d.definition),
        );
    }

    view
}

#[derive(Debug, Clone)]
pub struct DictionaryService {
    http: Client,
    base_url: String,
}

impl DictionaryService {
    pub fn new(http: Client, base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn entry_url(&self, word: &str) -> String {
        format!("{}/{}", self.base_url, urlencoding::encode(word))
    }

    /// Fetches and reshapes the provider entry for `word`
    ///
    /// Transient provider failures (5xx, timeouts, unparseable bodies) yield
    /// an empty view. A provider 404 is `NoEntry`; anything else is
    /// `Upstream`.
    pub async fn describe(&self, word: &str) -> Result<PhoneticsView, DictionaryError> {
        let url = self.entry_url(word);
        debug!(word = %word, url = %url, "Requesting dictionary entry");

        let response = match self.http.get(&url).send().await {
            Ok(r) => r,
            Err(e) if e.is_timeout() => {
                warn!(word = %word, error = %e, "Dictionary provider timed out, returning empty entry");
                return Ok(PhoneticsView::empty(word));
            }
            Err(e) => return Err(DictionaryError::Upstream(e.to_string())),
        };

        let status = response.status();
        if status.is_server_error() {
            warn!(word = %word, http_status = %status, "Dictionary provider error, returning empty entry");
            return Ok(PhoneticsView::empty(word));
        }
        if status == StatusCode::NOT_FOUND {
            debug!(word = %word, "Dictionary provider has no entry");
            return Err(DictionaryError::NoEntry(word.to_string()));
        }
        if !status.is_success() {
            return Err(DictionaryError::Upstream(format!("unexpected status {}", status)));
        }

        let body = match response.bytes().await {
            Ok(b) => b,
            Err(e) => {
                warn!(word = %word, error = %e, "Failed to read dictionary response body");
                return Ok(PhoneticsView::empty(word));
            }
        };

        match serde_json::from_slice::<Vec<ProviderEntry>>(&body) {
            Ok(entries) => Ok(reshape(word, entries)),
            Err(e) => {
                warn!(word = %word, error = %e, "Malformed dictionary response, returning empty entry");
                Ok(PhoneticsView::empty(word))
            }
        }
    }
}
