//! Application state owned by the presentation layer.
//!
//! Everything the views show lives here: the current view, the current
//! lookup result or error, the recent-searches list and the word of the day.
//! Lookups are split into `begin_*`/`finish_*` so the caller can await the
//! network in between; a result whose ticket is no longer the latest is
//! dropped.

use crate::error::{LookupError, Result};
use crate::lookup::normalize_term;
use crate::models::LookupResult;
use crate::recent::RecentSearches;
use crate::storage::KeyValueStore;
use log::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Landing,
    Search,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordOfDayStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordOfDayState {
    pub candidate: String,
    pub result: Option<LookupResult>,
    pub status: WordOfDayStatus,
}

/// Identifies one started lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What `finish_*` did with a lookup outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Yes,
    /// A newer lookup was started in the meantime.
    Stale,
}

pub struct AppState<S: KeyValueStore> {
    view: View,
    recent: RecentSearches<S>,
    current: Option<LookupResult>,
    last_error: Option<LookupError>,
    latest_search: u64,
    search_in_flight: bool,
    latest_wotd: u64,
    word_of_day: WordOfDayState,
}

impl<S: KeyValueStore> AppState<S> {
    /// Starts on the landing view with the recent list loaded from storage.
    pub fn new(recent: RecentSearches<S>) -> Self {
        AppState {
            view: View::Landing,
            recent,
            current: None,
            last_error: None,
            latest_search: 0,
            search_in_flight: false,
            latest_wotd: 0,
            word_of_day: WordOfDayState {
                candidate: String::new(),
                result: None,
                status: WordOfDayStatus::Idle,
            },
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    /// Landing → search.
    pub fn start(&mut self) {
        debug!("Navigating to search view");
        self.view = View::Search;
    }

    /// Search → landing.
    pub fn back(&mut self) {
        debug!("Navigating to landing view");
        self.view = View::Landing;
    }

    /// Validates `term` and opens a new search.
    ///
    /// Blank input records `EmptyQuery` as the current error and leaves the
    /// previous result alone.
    pub fn begin_search(&mut self, term: &str) -> std::result::Result<Ticket, LookupError> {
        if let Err(e) = normalize_term(term) {
            self.last_error = Some(e.clone());
            return Err(e);
        }
        self.latest_search += 1;
        self.search_in_flight = true;
        Ok(Ticket(self.latest_search))
    }

    /// Applies the outcome of the search identified by `ticket`.
    ///
    /// Success replaces the current result and records the term; failure
    /// clears the current result. A storage failure while recording is
    /// logged and leaves the recent list as it was; the result still shows.
    pub fn finish_search(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<LookupResult, LookupError>,
    ) -> Applied {
        if ticket.0 != self.latest_search {
            debug!("Discarding stale search result (ticket {:?})", ticket);
            return Applied::Stale;
        }
        self.search_in_flight = false;

        match outcome {
            Ok(result) => {
                info!("Showing definition for '{}'", result.term());
                if let Err(e) = self.recent.record(result.term()) {
                    warn!("Could not save '{}' to recent searches: {}", result.term(), e);
                }
                self.current = Some(result);
                self.last_error = None;
            }
            Err(e) => {
                self.current = None;
                self.last_error = Some(e);
            }
        }
        Applied::Yes
    }

    /// True while the latest search has not completed.
    pub fn is_loading(&self) -> bool {
        self.search_in_flight
    }

    /// Drops the current result and error.
    pub fn clear(&mut self) {
        self.current = None;
        self.last_error = None;
    }

    pub fn begin_word_of_day(&mut self, candidate: &str) -> Ticket {
        self.latest_wotd += 1;
        self.word_of_day = WordOfDayState {
            candidate: candidate.to_string(),
            result: None,
            status: WordOfDayStatus::Loading,
        };
        Ticket(self.latest_wotd)
    }

    /// Applies a word-of-the-day lookup. Never touches the recent list.
    pub fn finish_word_of_day(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<LookupResult, LookupError>,
    ) -> Applied {
        if ticket.0 != self.latest_wotd {
            return Applied::Stale;
        }
        match outcome {
            Ok(result) => {
                self.word_of_day.result = Some(result);
                self.word_of_day.status = WordOfDayStatus::Ready;
            }
            Err(e) => {
                debug!("Word of the day '{}' failed: {}", self.word_of_day.candidate, e);
                self.word_of_day.result = None;
                self.word_of_day.status = WordOfDayStatus::Failed;
            }
        }
        Applied::Yes
    }

    pub fn current(&self) -> Option<&LookupResult> {
        self.current.as_ref()
    }

    pub fn last_error(&self) -> Option<&LookupError> {
        self.last_error.as_ref()
    }

    pub fn word_of_day(&self) -> &WordOfDayState {
        &self.word_of_day
    }

    pub fn recent(&self) -> &[String] {
        self.recent.terms()
    }

    pub fn clear_recent(&mut self) -> Result<()> {
        self.recent.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::parse_entries;
    use crate::lookup::tests::HELLO_BODY;
    use crate::recent::tests::ReadOnlyStore;
    use crate::storage::MemoryStore;

    fn state() -> AppState<MemoryStore> {
        AppState::new(RecentSearches::new(MemoryStore::new()))
    }

    fn hello(term: &str) -> LookupResult {
        parse_entries(term, HELLO_BODY).unwrap()
    }

    fn not_found(term: &str) -> LookupError {
        LookupError::NotFound {
            term: term.to_string(),
        }
    }

    #[test]
    fn test_navigation() {
        let mut app = state();
        assert_eq!(app.view(), View::Landing);
        app.start();
        assert_eq!(app.view(), View::Search);
        app.back();
        assert_eq!(app.view(), View::Landing);
    }

    #[test]
    fn test_successful_search_is_shown_and_recorded() {
        let mut app = state();
        let ticket = app.begin_search("hello").unwrap();
        assert!(app.is_loading());

        let applied = app.finish_search(ticket, Ok(hello("hello")));
        assert_eq!(applied, Applied::Yes);
        assert!(!app.is_loading());
        assert_eq!(app.current().map(|r| r.term()), Some("hello"));
        assert_eq!(app.recent(), ["hello"]);
    }

    #[test]
    fn test_blank_search_keeps_previous_result() {
        let mut app = state();
        let ticket = app.begin_search("hello").unwrap();
        app.finish_search(ticket, Ok(hello("hello")));

        assert_eq!(app.begin_search("   "), Err(LookupError::EmptyQuery));
        assert!(!app.is_loading());
        assert_eq!(app.last_error(), Some(&LookupError::EmptyQuery));
        assert!(app.current().is_some());
    }

    #[test]
    fn test_failed_search_clears_result_but_not_recent() {
        let mut app = state();
        let ticket = app.begin_search("hello").unwrap();
        app.finish_search(ticket, Ok(hello("hello")));

        let ticket = app.begin_search("qwxz").unwrap();
        app.finish_search(ticket, Err(not_found("qwxz")));
        assert!(app.current().is_none());
        assert_eq!(app.last_error(), Some(&not_found("qwxz")));
        assert_eq!(app.recent(), ["hello"]);
    }

    #[test]
    fn test_superseded_search_is_discarded() {
        let mut app = state();
        let first = app.begin_search("hello").unwrap();
        let second = app.begin_search("world").unwrap();

        app.finish_search(second, Ok(hello("world")));
        let applied = app.finish_search(first, Ok(hello("hello")));

        assert_eq!(applied, Applied::Stale);
        assert_eq!(app.current().map(|r| r.term()), Some("world"));
        assert_eq!(app.recent(), ["world"]);
    }

    #[test]
    fn test_stale_result_does_not_end_loading() {
        let mut app = state();
        let first = app.begin_search("hello").unwrap();
        let _second = app.begin_search("world").unwrap();

        app.finish_search(first, Ok(hello("hello")));
        assert!(app.is_loading());
        assert!(app.current().is_none());
    }

    #[test]
    fn test_result_still_shows_when_recording_fails() {
        let mut app = AppState::new(RecentSearches::new(ReadOnlyStore));
        let ticket = app.begin_search("hello").unwrap();

        assert_eq!(app.finish_search(ticket, Ok(hello("hello"))), Applied::Yes);
        assert!(!app.is_loading());
        assert_eq!(app.current().map(|r| r.term()), Some("hello"));
        assert!(app.last_error().is_none());
        assert!(app.recent().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut app = state();
        let ticket = app.begin_search("hello").unwrap();
        app.finish_search(ticket, Ok(hello("hello")));
        app.clear();
        assert!(app.current().is_none());
        assert!(app.last_error().is_none());
        assert_eq!(app.recent(), ["hello"]);
    }

    #[test]
    fn test_word_of_day_lifecycle() {
        let mut app = state();
        assert_eq!(app.word_of_day().status, WordOfDayStatus::Idle);

        let ticket = app.begin_word_of_day("serendipity");
        assert_eq!(app.word_of_day().status, WordOfDayStatus::Loading);
        assert_eq!(app.word_of_day().candidate, "serendipity");

        app.finish_word_of_day(ticket, Ok(hello("serendipity")));
        assert_eq!(app.word_of_day().status, WordOfDayStatus::Ready);
        assert!(app.word_of_day().result.is_some());
        assert!(app.recent().is_empty());

        let ticket = app.begin_word_of_day("sonder");
        app.finish_word_of_day(ticket, Err(not_found("sonder")));
        assert_eq!(app.word_of_day().status, WordOfDayStatus::Failed);
        assert!(app.word_of_day().result.is_none());
    }

    #[test]
    fn test_superseded_word_of_day_is_discarded() {
        let mut app = state();
        let first = app.begin_word_of_day("halcyon");
        let second = app.begin_word_of_day("zenith");
        app.finish_word_of_day(second, Err(not_found("zenith")));
        assert_eq!(
            app.finish_word_of_day(first, Ok(hello("halcyon"))),
            Applied::Stale
        );
        assert_eq!(app.word_of_day().status, WordOfDayStatus::Failed);
    }
}
