use thiserror::Error;

/// Custom Result type for this crate.
pub type Result<T> = std::result::Result<T, WordwiseError>;

/// Errors from the ambient parts of the crate: storage, configuration, client setup.
#[derive(Error, Debug)]
pub enum WordwiseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Data directory not found or could not be determined")]
    DataDirNotFound,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// The two externally visible ways a lookup can fail.
///
/// Transport failures, non-2xx statuses and malformed payloads all collapse
/// into `NotFound`; the cause only shows up in the logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("Please enter a word to search")]
    EmptyQuery,

    #[error("Word not found or error fetching definition: '{term}'")]
    NotFound { term: String },
}
