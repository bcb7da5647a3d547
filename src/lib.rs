// Declare modules
pub mod error;
pub mod lookup;
pub mod models;
pub mod recent;
pub mod render;
pub mod state;
pub mod storage;
pub mod word_of_day;

// Re-export key types for easier use
pub use error::{LookupError, Result, WordwiseError};
pub use lookup::DictionaryClient;
pub use models::{Definition, LookupResult, Meaning};
pub use recent::RecentSearches;
pub use state::{AppState, View, WordOfDayState, WordOfDayStatus};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore};
pub use word_of_day::{PickPolicy, WordOfDay};

use log::info;
use std::path::PathBuf;
use std::time::Duration;

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Options {
    /// Optional path to the SQLite file holding local state.
    /// If None, the default location based on ProjectDirs will be used.
    pub db_path: Option<PathBuf>,
    /// Base URL of the dictionary API; the term is appended as a path segment.
    pub api_base: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub policy: PickPolicy,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            db_path: None,
            api_base: lookup::DEFAULT_API_BASE.to_string(),
            timeout: lookup::DEFAULT_TIMEOUT,
            policy: PickPolicy::default(),
        }
    }
}

/// Everything a session needs, wired from `Options`.
pub struct Wordwise {
    pub client: DictionaryClient,
    pub word_of_day: WordOfDay,
    pub state: AppState<SqliteStore>,
}

impl Wordwise {
    /// Opens local storage, loads the recent list and builds the HTTP client.
    pub fn open(options: &Options) -> Result<Self> {
        let store = match &options.db_path {
            Some(path) => {
                info!("Using provided database path: {:?}", path);
                SqliteStore::open(path)?
            }
            None => SqliteStore::open_default()?,
        };
        let client = DictionaryClient::new(&options.api_base, options.timeout)?;

        Ok(Wordwise {
            client,
            word_of_day: WordOfDay::new(options.policy),
            state: AppState::new(RecentSearches::new(store)),
        })
    }

    /// Runs one user search through the state: validate, look up, apply.
    pub async fn search(&mut self, term: &str) -> std::result::Result<LookupResult, LookupError> {
        let ticket = self.state.begin_search(term)?;
        let outcome = self.client.lookup(term).await;
        self.state.finish_search(ticket, outcome.clone());
        outcome
    }

    /// Picks and resolves a word of the day into the state.
    pub async fn refresh_word_of_day(&mut self) -> &WordOfDayState {
        let candidate = self.word_of_day.pick();
        let ticket = self.state.begin_word_of_day(&candidate);
        let outcome = self.client.lookup(&candidate).await;
        self.state.finish_word_of_day(ticket, outcome);
        self.state.word_of_day()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::tests::{HELLO_BODY, serve};
    use tempfile::tempdir;

    fn options(base: &str, dir: &std::path::Path) -> Options {
        Options {
            db_path: Some(dir.join("wordwise.db")),
            api_base: base.to_string(),
            timeout: Duration::from_secs(5),
            policy: PickPolicy::Daily,
        }
    }

    #[tokio::test]
    async fn test_search_records_and_persists() {
        let server = serve(200, HELLO_BODY).await;
        let temp_dir = tempdir().unwrap();
        let opts = options(&server.base, temp_dir.path());

        {
            let mut ww = Wordwise::open(&opts).unwrap();
            let outcome = ww.search(" hello ").await;
            assert_eq!(outcome.unwrap().term(), "hello");
            assert_eq!(ww.search("").await, Err(LookupError::EmptyQuery));
        }

        let ww = Wordwise::open(&opts).unwrap();
        assert_eq!(ww.state.recent(), ["hello"]);
    }

    #[tokio::test]
    async fn test_failed_search_is_not_recorded() {
        let server = serve(404, r#"{"title":"No Definitions Found"}"#).await;
        let temp_dir = tempdir().unwrap();
        let mut ww = Wordwise::open(&options(&server.base, temp_dir.path())).unwrap();

        let outcome = ww.search("qwxz").await;
        assert!(matches!(outcome, Err(LookupError::NotFound { .. })));
        assert!(ww.state.recent().is_empty());
        assert!(ww.state.current().is_none());
    }

    #[tokio::test]
    async fn test_refresh_word_of_day() {
        let server = serve(200, HELLO_BODY).await;
        let temp_dir = tempdir().unwrap();
        let mut ww = Wordwise::open(&options(&server.base, temp_dir.path())).unwrap();

        let wotd = ww.refresh_word_of_day().await;
        assert_eq!(wotd.status, WordOfDayStatus::Ready);
        assert!(word_of_day::CANDIDATES.contains(&wotd.candidate.as_str()));
        assert_eq!(ww.word_of_day.policy(), PickPolicy::Daily);
        assert!(ww.state.recent().is_empty());
    }
}
