//! Definition lookups against the public dictionary API.
//!
//! A lookup is a single `GET {base}/{term}`. Whatever goes wrong on the way
//! (transport, status, payload) is reported to the caller as
//! [`LookupError::NotFound`]; the cause is only logged.

use crate::error::{LookupError, Result, WordwiseError};
use crate::models::{LookupResult, ProviderEntry};
use log::{debug, info, warn};
use reqwest::Url;
use std::time::Duration;

/// Base URL of the English endpoint of the public dictionary API.
pub const DEFAULT_API_BASE: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
const USER_AGENT: &str = concat!("wordwise/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the definition provider. Holds no per-lookup state.
#[derive(Debug, Clone)]
pub struct DictionaryClient {
    base_url: Url,
    client: reqwest::Client,
}

impl DictionaryClient {
    /// Creates a client for `base`, which must be an absolute http(s) URL.
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base)
            .map_err(|e| WordwiseError::InvalidConfig(format!("API base '{}': {}", base, e)))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(WordwiseError::InvalidConfig(format!(
                "API base '{}' is not an http(s) URL",
                base
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        debug!("Dictionary client using base {} (timeout {:?})", base_url, timeout);
        Ok(DictionaryClient { base_url, client })
    }

    /// Looks up `term`.
    ///
    /// A term that is blank after trimming fails with `EmptyQuery` before any
    /// request is made. Only the first entry of the provider's answer is kept.
    ///
    /// ```
    /// use wordwise::{DictionaryClient, LookupError, lookup};
    ///
    /// # tokio_test::block_on(async {
    /// let client = DictionaryClient::new(lookup::DEFAULT_API_BASE, lookup::DEFAULT_TIMEOUT).unwrap();
    /// assert_eq!(client.lookup("   ").await, Err(LookupError::EmptyQuery));
    /// # });
    /// ```
    pub async fn lookup(&self, term: &str) -> std::result::Result<LookupResult, LookupError> {
        let term = normalize_term(term)?;
        let Some(url) = self.entry_url(term) else {
            debug!("'{}' cannot be sent as a path segment", term);
            return Err(not_found(term));
        };
        info!("Looking up '{}' at {}", term, url);

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Request for '{}' failed: {}", term, e);
                return Err(not_found(term));
            }
        };

        let status = response.status();
        if !status.is_success() {
            debug!("Provider answered {} for '{}'", status, term);
            return Err(not_found(term));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Could not read response body for '{}': {}", term, e);
                return Err(not_found(term));
            }
        };

        parse_entries(term, &body)
    }

    /// `{base}/{term}`, with `term` percent-encoded as a single path segment.
    ///
    /// `None` for `.` and `..`: URL parsing resolves dot segments, `%2E` forms
    /// included, so no request path can carry them as a term.
    fn entry_url(&self, term: &str) -> Option<Url> {
        if matches!(term, "." | "..") {
            return None;
        }
        let mut url = self.base_url.clone();
        // Checked in `new`: the base can always carry path segments.
        url.path_segments_mut().ok()?.pop_if_empty().push(term);
        Some(url)
    }
}

/// Trims `term`, rejecting blank input.
pub fn normalize_term(term: &str) -> std::result::Result<&str, LookupError> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        Err(LookupError::EmptyQuery)
    } else {
        Ok(trimmed)
    }
}

/// Normalizes a provider response body into a `LookupResult` for `term`.
pub fn parse_entries(term: &str, body: &str) -> std::result::Result<LookupResult, LookupError> {
    let entries: Vec<ProviderEntry> = match serde_json::from_str(body) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Malformed provider payload for '{}': {}", term, e);
            return Err(not_found(term));
        }
    };

    if entries.len() > 1 {
        debug!("Provider returned {} entries for '{}', keeping the first", entries.len(), term);
    }

    entries
        .into_iter()
        .next()
        .map(|entry| LookupResult::from_entry(term, entry))
        .ok_or_else(|| {
            debug!("Provider returned no entries for '{}'", term);
            not_found(term)
        })
}

fn not_found(term: &str) -> LookupError {
    LookupError::NotFound {
        term: term.to_string(),
    }
}
