//! Error types for the extractor module

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for extraction operations
#[derive(Debug, Error)]
pub enum ExtractError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The page could not be fetched
    #[error("Fetch failed for {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// HTML parsing error
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// Content extraction error
    #[error("Content extraction error: {0}")]
    ContentExtraction(String),

    /// URL parsing error
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Every strategy failed to recover usable text
    #[error("No usable article text could be extracted from {0}")]
    Unavailable(String),
}

impl From<ExtractError> for CrateError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Http(e) => CrateError::Http(e),
            _ => CrateError::Extraction(err.to_string()),
        }
    }
}
