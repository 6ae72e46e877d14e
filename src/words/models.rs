// src/words/models.rs

use serde::Deserialize;

use crate::common::{PageParams, ValidationResult};
use crate::services::word_store::WordQuery;

/// Query string of `GET /entries/en`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordListParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub start_letter: String,
}

impl WordListParams {
    pub fn into_query(self) -> Result<WordQuery, ValidationResult> {
        Ok(WordQuery {
            params: PageParams::parse(self.page, self.limit)?,
            search: self.search,
            start_letter: self.start_letter,
        })
    }
}
