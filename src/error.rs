//! Error types for the brief crate

use thiserror::Error;

/// Result type for brief operations
pub type Result<T> = std::result::Result<T, Error>;

/// Message returned when candidates existed but none produced a summary
pub const UNSUMMARIZABLE_MESSAGE: &str = "Found sources, but none could be summarized. \
    Likely paywalls, video links, or blocked scrapers.";

/// Error type for brief operations
#[derive(Debug, Error)]
pub enum Error {
    /// A required credential is missing
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The caller supplied unusable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Search returned candidates but every one failed extraction or summarization
    #[error("{}", UNSUMMARIZABLE_MESSAGE)]
    AllSourcesUnsummarizable,

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Filesystem or terminal I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Web search error
    #[error("Search error: {0}")]
    Search(String),

    /// Content extraction error
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// PDF rendering error
    #[error("Report error: {0}")]
    Report(String),
}

impl Error {
    /// Whether the error was caused by the caller rather than the service
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }
}
