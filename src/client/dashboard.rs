//! Drives `DashboardState` against a live API on the tokio runtime

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::{debug, warn};

use super::api::{ApiClient, ClientError};
use super::requests::RequestSlot;
use super::state::{Action, Command, DashboardState, WordsRequest};
use crate::common::Page;
use crate::services::dictionary::PhoneticsView;

const SETTLE_POLL: Duration = Duration::from_millis(10);

/// Completed fetch, tagged with the key it was started for
#[derive(Debug)]
pub enum Event {
    Words(WordsRequest, Result<Page<String>, ClientError>),
    Phonetics(String, Result<PhoneticsView, ClientError>),
    Lists(Result<(Vec<String>, Vec<String>), ClientError>),
}

/// Runs `DashboardState` against a live API: commands become tokio tasks,
/// finished tasks come back as events.
pub struct Dashboard {
    client: Arc<ApiClient>,
    state: DashboardState,
    words: RequestSlot<WordsRequest>,
    phonetics: RequestSlot<String>,
    lists: RequestSlot<()>,
    tx: UnboundedSender<Event>,
    rx: UnboundedReceiver<Event>,
}

impl Dashboard {
    /// Must be called inside a tokio runtime; the initial fetches start here
    pub fn start(client: ApiClient) -> Self {
        let (state, commands) = DashboardState::init();
        let (tx, rx) = unbounded_channel();
        let mut dashboard = Self {
            client: Arc::new(client),
            state,
            words: RequestSlot::new(),
            phonetics: RequestSlot::new(),
            lists: RequestSlot::new(),
            tx,
            rx,
        };
        for command in commands {
            dashboard.run(command);
        }
        dashboard
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        if let Some(command) = self.state.update(action) {
            self.run(command);
        }
    }

    fn run(&mut self, command: Command) {
        let client = self.client.clone();
        let tx = self.tx.clone();
        match command {
            Command::FetchWords(request) => {
                let key = request.clone();
                self.words.start(key, async move {
                    let result = client.fetch_words(&request).await;
                    let _ = tx.send(Event::Words(request, result));
                });
            }
            Command::FetchPhonetics(word) => {
                let key = word.clone();
                self.phonetics.start(key, async move {
                    let result = client.fetch_phonetics(&word).await;
                    let _ = tx.send(Event::Phonetics(word, result));
                });
            }
            Command::FetchLists => {
                if client.token().is_none() {
                    debug!("Not signed in, skipping favorites/history fetch");
                    return;
                }
                self.lists.start((), async move {
                    let result = match client.fetch_favorites().await {
                        Ok(favorites) => client.fetch_viewed().await.map(|viewed| (favorites, viewed)),
                        Err(e) => Err(e),
                    };
                    let _ = tx.send(Event::Lists(result));
                });
            }
        }
    }

    /// Feeds a finished fetch into the state. Returns false for stale events.
    pub fn apply(&mut self, event: Event) -> bool {
        match event {
            Event::Words(request, result) => {
                let applied = self
                    .state
                    .apply_words(&request, result.map_err(|e| e.to_string()));
                if !applied {
                    debug!(request = ?request, "Dropped stale word page");
                }
                applied
            }
            Event::Phonetics(word, result) => self
                .state
                .apply_phonetics(&word, result.map_err(|e| e.to_string())),
            Event::Lists(Ok((favorites, viewed))) => {
                self.state.update(Action::ListsLoaded { favorites, viewed });
                true
            }
            Event::Lists(Err(e)) => {
                warn!(error = %e, "Failed to load favorites/history");
                false
            }
        }
    }

    fn idle(&self) -> bool {
        !self.words.is_running() && !self.phonetics.is_running() && !self.lists.is_running()
    }

    /// Applies events until no fetch is left in flight
    pub async fn settle(&mut self) {
        loop {
            while let Ok(event) = self.rx.try_recv() {
                self.apply(event);
            }
            if self.idle() {
                while let Ok(event) = self.rx.try_recv() {
                    self.apply(event);
                }
                return;
            }
            tokio::select! {
                Some(event) = self.rx.recv() => {
                    self.apply(event);
                }
                _ = tokio::time::sleep(SETTLE_POLL) => {}
            }
        }
    }

    /// Flips the favorite flag locally, then on the server; reverts on failure
    pub async fn toggle_favorite(&mut self, word: &str) -> Result<(), ClientError> {
        let was_favorite = self.state.is_favorite(word);
        self.state.update(Action::FavoriteToggled(word.to_string()));

        let result = if was_favorite {
            self.client.remove_favorite(word).await
        } else {
            self.client.add_favorite(word).await
        };
        if result.is_err() {
            self.state.update(Action::FavoriteToggled(word.to_string()));
        }
        result
    }

    pub async fn mark_viewed(&mut self, word: &str) -> Result<(), ClientError> {
        if self.state.is_viewed(word) {
            return Ok(());
        }
        self.client.mark_viewed(word).await?;
        self.state.update(Action::MarkedViewed(word.to_string()));
        Ok(())
    }
}
