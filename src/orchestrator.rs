//! # Search-and-Summarize Orchestrator
//!
//! Drives one query from search through extraction and summarization to an
//! ordered list of summaries.
//!
//! ## Policy
//!
//! - Search failures count as "no candidates".
//! - A candidate that cannot be extracted or summarized is skipped; it never
//!   affects the others.
//! - Processing stops once [`SUMMARY_QUOTA`] summaries exist. With concurrency
//!   above one, outstanding candidate work is dropped at that point.
//! - If search found candidates but none produced a summary, the run fails with
//!   [`Error::AllSourcesUnsummarizable`] so callers can tell "nothing exists"
//!   apart from "everything we found was unreadable".

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::{Config, MAX_CANDIDATES, SUMMARY_QUOTA};
use crate::error::{Error, Result};
use crate::extractor::{ContentExtractor, Extractor, ExtractorConfig};
use crate::model::gemini_completion_model;
use crate::search::{GoogleSearch, SearchProvider, SearchResult};
use crate::summarizer::{ArticleSummarizer, Summarizer, SummaryContext};

/// Title used when neither the page nor the search result has one
pub const UNTITLED: &str = "Untitled";

/// One summarized article
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryItem {
    pub title: String,
    pub url: String,
    /// Markdown bullet summary
    #[serde(rename = "summary")]
    pub summary_markdown: String,
}

/// Turns queries into summaries
pub struct Orchestrator {
    search: Arc<dyn SearchProvider>,
    extractor: Arc<dyn ContentExtractor>,
    summarizer: Arc<dyn Summarizer>,
    max_candidates: usize,
    quota: usize,
    concurrency: usize,
}

impl Orchestrator {
    /// Assemble an orchestrator from its collaborators
    pub fn new(
        search: Arc<dyn SearchProvider>,
        extractor: Arc<dyn ContentExtractor>,
        summarizer: Arc<dyn Summarizer>,
    ) -> Self {
        Self {
            search,
            extractor,
            summarizer,
            max_candidates: MAX_CANDIDATES,
            quota: SUMMARY_QUOTA,
            concurrency: 1,
        }
    }

    /// Build the production pipeline: Google search, default extraction chain, Gemini
    ///
    /// Fails with [`Error::Configuration`] if a credential is missing.
    pub fn from_config(config: &Config) -> Result<Self> {
        let credentials = config.credentials()?;

        let search = GoogleSearch::new(credentials.google_api_key, credentials.google_cse_id)?;
        let extractor = Extractor::new(&ExtractorConfig::default())?;
        let model = gemini_completion_model(&credentials.gemini_api_key, &config.model);
        let summarizer = ArticleSummarizer::new(model, config.summarize_timeout);

        Ok(Self::new(Arc::new(search), Arc::new(extractor), Arc::new(summarizer))
            .with_concurrency(config.concurrency))
    }

    /// Process up to `concurrency` candidates at a time (minimum 1)
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    /// Override the number of summaries to collect
    pub fn with_quota(mut self, quota: usize) -> Self {
        self.quota = quota;
        self
    }

    /// Run a query end to end
    #[instrument(skip(self))]
    pub async fn run(&self, query: &str) -> Result<Vec<SummaryItem>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(Error::InvalidInput("Search query cannot be empty.".to_string()));
        }

        let candidates = match self.search.search(query, self.max_candidates).await {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Search failed; continuing with no candidates");
                Vec::new()
            }
        };
        info!("Search returned {} candidates", candidates.len());

        let mut items: Vec<SummaryItem> = Vec::new();
        if self.quota > 0 {
            let mut outcomes = stream::iter(candidates.iter().cloned())
                .map(|candidate| self.process(candidate))
                .buffered(self.concurrency);

            while let Some(outcome) = outcomes.next().await {
                if let Some(item) = outcome {
                    items.push(item);
                    if items.len() >= self.quota {
                        debug!("Quota of {} reached", self.quota);
                        break;
                    }
                }
            }
        }

        if !candidates.is_empty() && items.is_empty() {
            warn!(
                candidates = candidates.len(),
                "No candidate could be summarized"
            );
            return Err(Error::AllSourcesUnsummarizable);
        }

        info!("Produced {} summaries", items.len());
        Ok(items)
    }

    /// Extract and summarize one candidate; `None` means skip it
    async fn process(&self, candidate: SearchResult) -> Option<SummaryItem> {
        let url = candidate.url.as_deref().filter(|u| !u.trim().is_empty())?;

        let content = match self.extractor.extract(url).await {
            Ok(content) => content,
            Err(e) => {
                debug!(url, error = %e, "Skipping candidate");
                return None;
            }
        };

        let context = SummaryContext {
            title: content.title.clone(),
            url: url.to_string(),
            date_iso: content.published_at.map(|d| d.to_rfc3339()),
        };

        let summary = match self.summarizer.summarize(&content.body, &context).await {
            Ok(Some(summary)) if !summary.trim().is_empty() => summary,
            Ok(_) => {
                warn!(url, "Summarizer returned nothing");
                return None;
            }
            Err(e) => {
                warn!(url, error = %e, "Summarization failed");
                return None;
            }
        };

        let title = content
            .title
            .or(candidate.title)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        Some(SummaryItem {
            title,
            url: url.to_string(),
            summary_markdown: summary,
        })
    }
}
