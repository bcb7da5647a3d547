//! The bounded recent-searches list.

use crate::error::Result;
use crate::storage::KeyValueStore;
use log::{debug, warn};

/// Maximum number of remembered terms.
pub const MAX_RECENT: usize = 5;
/// Storage key holding the JSON-encoded list.
pub const RECENT_KEY: &str = "recent_searches";

/// Most-recent-first list of searched terms, persisted after every change.
///
/// Never longer than [`MAX_RECENT`]; terms are unique (exact, case-sensitive).
pub struct RecentSearches<S: KeyValueStore> {
    store: S,
    terms: Vec<String>,
}

impl<S: KeyValueStore> RecentSearches<S> {
    /// Wraps `store` and loads whatever list it holds.
    pub fn new(store: S) -> Self {
        let mut recent = RecentSearches {
            store,
            terms: Vec::new(),
        };
        recent.terms = recent.load();
        recent
    }

    /// Reads the persisted list.
    ///
    /// Missing, unreadable or unparseable state yields an empty list. A list
    /// that breaks the invariants is cut back into shape.
    pub fn load(&self) -> Vec<String> {
        let raw = match self.store.get(RECENT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read recent searches, starting empty: {}", e);
                return Vec::new();
            }
        };

        let stored: Vec<String> = match serde_json::from_str(&raw) {
            Ok(stored) => stored,
            Err(e) => {
                warn!("Discarding corrupt recent searches: {}", e);
                return Vec::new();
            }
        };

        let mut terms: Vec<String> = Vec::with_capacity(MAX_RECENT);
        for term in stored {
            if term.trim().is_empty() || terms.contains(&term) {
                continue;
            }
            terms.push(term);
            if terms.len() == MAX_RECENT {
                break;
            }
        }
        debug!("Loaded {} recent searches", terms.len());
        terms
    }

    /// Puts `term` at the front, dropping any earlier occurrence and the
    /// oldest entries beyond the limit, then persists the list.
    ///
    /// The in-memory list only changes once the write succeeded.
    pub fn record(&mut self, term: &str) -> Result<&[String]> {
        let mut next = Vec::with_capacity(MAX_RECENT);
        next.push(term.to_string());
        next.extend(self.terms.iter().filter(|t| *t != term).cloned());
        next.truncate(MAX_RECENT);

        let encoded = serde_json::to_string(&next)?;
        self.store.set(RECENT_KEY, &encoded)?;
        self.terms = next;
        Ok(&self.terms)
    }

    /// Forgets every recorded term.
    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(RECENT_KEY)?;
        self.terms.clear();
        Ok(())
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}
