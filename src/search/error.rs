//! # Search Error Types Module
//!
//! Errors raised while asking the web search provider for candidates. The
//! orchestrator never surfaces these to callers: a failed search is treated as
//! "no candidates".

use thiserror::Error;

use crate::error::Error as CrateError;

/// Errors that can occur during web search
#[derive(Debug, Error)]
pub enum SearchError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("API error: {status_code} - {message}")]
    Api {
        /// HTTP status code
        status_code: u16,
        /// Response body
        message: String,
    },

    /// The provider's response could not be understood
    #[error("Result processing error: {0}")]
    ResultProcessing(String),

    /// Invalid search parameters
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(String),
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::ResultProcessing(err.to_string())
    }
}

impl From<SearchError> for CrateError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::Http(e) => CrateError::Http(e),
            _ => CrateError::Search(err.to_string()),
        }
    }
}
