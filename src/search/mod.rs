//! Web search module
//!
//! This module turns a free-text query into a ranked list of candidate pages.

mod error;
mod google;

pub use error::SearchError;
pub use google::{GOOGLE_SEARCH_URL, GoogleSearch};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A ranked search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Title of the page as reported by the provider
    pub title: Option<String>,

    /// URL of the page; results without one are skipped downstream
    pub url: Option<String>,
}

impl SearchResult {
    /// Convenience constructor for a result with both fields present
    pub fn new(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            url: Some(url.into()),
        }
    }
}

/// A source of ranked search results
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Return up to `max_results` results for `query`, best first
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError>;
}
