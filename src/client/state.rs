//! Dashboard view state
//!
//! Everything the dashboard renders lives in [`DashboardState`]. Inputs are
//! [`Action`]s fed through [`DashboardState::update`], which mutates the state
//! and returns the fetch (if any) the caller has to start. Responses come back
//! through the `apply_*` methods, which drop anything that no longer matches
//! the current request.

use crate::common::Page;
use crate::services::dictionary::PhoneticsView;

/// Words per page, for server pages and the client-side list slices alike
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    All,
    Favorites,
    Viewed,
}

/// Key of one word-page fetch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WordsRequest {
    pub page: i64,
    pub search: String,
    pub start_letter: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetViewMode(ViewMode),
    /// Edits the search box without applying it
    SetSearchTerm(String),
    Search,
    Back,
    FilterByLetter(String),
    NextPage,
    PrevPage,
    SelectWord(String),
    CloseDetail,
    /// Flips the cached favorite flag for this word
    FavoriteToggled(String),
    MarkedViewed(String),
    ListsLoaded {
        favorites: Vec<String>,
        viewed: Vec<String>,
    },
}

/// Fetch the caller must start after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FetchWords(WordsRequest),
    FetchPhonetics(String),
    FetchLists,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub mode: ViewMode,
    pub page: i64,
    pub favorites_page: i64,
    pub viewed_page: i64,
    pub search_term: String,
    pub search_query: String,
    pub start_letter: String,
    pub previous_page: Option<i64>,
    pub selected_word: Option<String>,
    pub phonetics: Option<PhoneticsView>,
    pub phonetics_error: Option<String>,
    pub favorites: Vec<String>,
    pub viewed: Vec<String>,
    pub words: Option<Page<String>>,
    pub words_error: Option<String>,
}

impl DashboardState {
    /// Fresh state plus the fetches needed to fill it
    pub fn init() -> (Self, Vec<Command>) {
        let state = Self {
            page: 1,
            favorites_page: 1,
            viewed_page: 1,
            ..Self::default()
        };
        let commands = vec![
            Command::FetchWords(state.words_request()),
            Command::FetchLists,
        ];
        (state, commands)
    }

    /// Key for the word page the current filters point at
    pub fn words_request(&self) -> WordsRequest {
        WordsRequest {
            page: self.page,
            search: self.search_query.clone(),
            start_letter: self.start_letter.clone(),
        }
    }

    fn fetch_words(&self) -> Option<Command> {
        (self.mode == ViewMode::All).then(|| Command::FetchWords(self.words_request()))
    }

    pub fn update(&mut self, action: Action) -> Option<Command> {
        match action {
            Action::SetViewMode(mode) => {
                self.mode = mode;
                match mode {
                    ViewMode::All => {
                        self.page = 1;
                        self.fetch_words()
                    }
                    ViewMode::Favorites => {
                        self.favorites_page = 1;
                        None
                    }
                    ViewMode::Viewed => {
                        self.viewed_page = 1;
                        None
                    }
                }
            }
            Action::SetSearchTerm(term) => {
                self.search_term = term;
                None
            }
            Action::Search => {
                self.search_query = self.search_term.trim().to_string();
                self.start_letter.clear();
                if self.previous_page.is_none() {
                    self.previous_page = Some(self.page);
                }
                self.page = 1;
                self.fetch_words()
            }
            Action::Back => {
                let page = self.previous_page.take()?;
                self.search_term.clear();
                self.search_query.clear();
                self.start_letter.clear();
                self.page = page;
                self.fetch_words()
            }
            Action::FilterByLetter(letter) => {
                self.start_letter = letter;
                self.search_term.clear();
                self.search_query.clear();
                self.previous_page = None;
                self.page = 1;
                self.fetch_words()
            }
            Action::NextPage => {
                if !self.can_go_next() {
                    return None;
                }
                *self.page_mut() += 1;
                self.fetch_words()
            }
            Action::PrevPage => {
                if !self.can_go_prev() {
                    return None;
                }
                *self.page_mut() -= 1;
                self.fetch_words()
            }
            Action::SelectWord(word) => {
                self.selected_word = Some(word.clone());
                self.phonetics = None;
                self.phonetics_error = None;
                Some(Command::FetchPhonetics(word))
            }
            Action::CloseDetail => {
                self.selected_word = None;
                self.phonetics = None;
                self.phonetics_error = None;
                None
            }
            Action::FavoriteToggled(word) => {
                if let Some(index) = self.favorites.iter().position(|w| *w == word) {
                    self.favorites.remove(index);
                    let last = last_page(self.favorites.len());
                    self.favorites_page = self.favorites_page.min(last);
                } else {
                    self.favorites.push(word);
                }
                None
            }
            Action::MarkedViewed(word) => {
                if !self.viewed.contains(&word) {
                    self.viewed.push(word);
                }
                None
            }
            Action::ListsLoaded { favorites, viewed } => {
                self.favorites = favorites;
                self.viewed = viewed;
                self.favorites_page = self.favorites_page.min(last_page(self.favorites.len()));
                self.viewed_page = self.viewed_page.min(last_page(self.viewed.len()));
                None
            }
        }
    }

    fn page_mut(&mut self) -> &mut i64 {
        match self.mode {
            ViewMode::All => &mut self.page,
            ViewMode::Favorites => &mut self.favorites_page,
            ViewMode::Viewed => &mut self.viewed_page,
        }
    }

    pub fn current_page(&self) -> i64 {
        match self.mode {
            ViewMode::All => self.page,
            ViewMode::Favorites => self.favorites_page,
            ViewMode::Viewed => self.viewed_page,
        }
    }

    pub fn can_go_next(&self) -> bool {
        match self.mode {
            ViewMode::All => self.words.as_ref().map_or(false, |page| page.has_next),
            ViewMode::Favorites => slice_has_next(self.favorites.len(), self.favorites_page),
            ViewMode::Viewed => slice_has_next(self.viewed.len(), self.viewed_page),
        }
    }

    pub fn can_go_prev(&self) -> bool {
        self.current_page() > 1
    }

    /// Words for the current mode and page
    pub fn visible_words(&self) -> &[String] {
        match self.mode {
            ViewMode::All => self
                .words
                .as_ref()
                .map_or(&[][..], |page| page.results.as_slice()),
            ViewMode::Favorites => page_slice(&self.favorites, self.favorites_page),
            ViewMode::Viewed => page_slice(&self.viewed, self.viewed_page),
        }
    }

    pub fn is_favorite(&self, word: &str) -> bool {
        self.favorites.iter().any(|w| w == word)
    }

    pub fn is_viewed(&self, word: &str) -> bool {
        self.viewed.iter().any(|w| w == word)
    }

    /// Stores a word page unless the filters moved on since it was requested.
    /// Returns whether the response was used.
    pub fn apply_words(&mut self, request: &WordsRequest, result: Result<Page<String>, String>) -> bool {
        if *request != self.words_request() {
            return false;
        }
        match result {
            Ok(page) => {
                self.words = Some(page);
                self.words_error = None;
            }
            Err(message) => {
                self.words = None;
                self.words_error = Some(message);
            }
        }
        true
    }

    /// Same guard for the detail panel, keyed on the selected word
    pub fn apply_phonetics(&mut self, word: &str, result: Result<PhoneticsView, String>) -> bool {
        if self.selected_word.as_deref() != Some(word) {
            return false;
        }
        match result {
            Ok(view) => {
                self.phonetics = Some(view);
                self.phonetics_error = None;
            }
            Err(message) => {
                self.phonetics = None;
                self.phonetics_error = Some(message);
            }
        }
        true
    }
}

fn last_page(len: usize) -> i64 {
    (len.max(1) as i64 + PAGE_SIZE as i64 - 1) / PAGE_SIZE as i64
}

fn slice_has_next(len: usize, page: i64) -> bool {
    (page.max(0) as usize) * PAGE_SIZE < len
}

fn page_slice(list: &[String], page: i64) -> &[String] {
    let start = ((page.max(1) - 1) as usize).saturating_mul(PAGE_SIZE).min(list.len());
    let end = (start + PAGE_SIZE).min(list.len());
    &list[start..end]
}
