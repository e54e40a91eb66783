//! # Article Extraction Module
//!
//! Turns a URL into usable article text despite paywalls, script-rendered pages
//! and malformed markup. Four strategies are tried in a fixed order; the first
//! whose body clears the quality gate wins.
//!
//! ## Key Components
//!
//! - `Extractor`: runs the fallback chain and applies the quality gate
//! - `ExtractionStrategy`: the interface each strategy implements
//! - `HtmlFetcher`: downloads markup with a browser-like identity
//! - `ExtractorConfig`: fetch identity, timeout and gate threshold
//!
//! ## Merge rule
//!
//! The first non-empty title any strategy reports is kept, even when that
//! strategy's body was rejected. Only the article strategy reports a publish
//! date, and it is carried forward the same way.

mod config;
mod error;
mod fetcher;
pub mod html;
pub mod strategies;
mod strategy;

pub use config::{ExtractorConfig, ExtractorConfigBuilder};
pub use error::ExtractError;
pub use fetcher::{HtmlFetcher, PageFetcher};
pub use strategy::{ExtractionStrategy, PartialExtraction};

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Article text that passed the quality gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedContent {
    /// Title, possibly recovered by an earlier strategy than the body
    pub title: Option<String>,

    /// Plain-text body
    pub body: String,

    /// Publish date, if the page declared one
    pub published_at: Option<DateTime<Utc>>,
}

/// Anything that can turn a URL into article text
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Extract the article at `url`, or [`ExtractError::Unavailable`]
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError>;
}

/// The ordered fallback chain of extraction strategies
pub struct Extractor {
    fetcher: Arc<dyn PageFetcher>,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    min_body_chars: usize,
}

impl Extractor {
    /// Build the default chain with an HTTP fetcher
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        let fetcher = HtmlFetcher::new(config)?;
        Ok(Self::with_parts(
            Arc::new(fetcher),
            strategies::default_chain(),
            config.min_body_chars,
        ))
    }

    /// Build a chain from explicit parts
    pub fn with_parts(
        fetcher: Arc<dyn PageFetcher>,
        strategies: Vec<Box<dyn ExtractionStrategy>>,
        min_body_chars: usize,
    ) -> Self {
        Self {
            fetcher,
            strategies,
            min_body_chars,
        }
    }

    /// Names of the strategies, in the order they run
    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    async fn run_strategy(
        &self,
        strategy: &dyn ExtractionStrategy,
        url: &str,
    ) -> Result<PartialExtraction, ExtractError> {
        let markup = self
            .fetcher
            .fetch(url)
            .await
            .ok_or_else(|| ExtractError::Fetch {
                url: url.to_string(),
                reason: "no markup returned".to_string(),
            })?;

        catch_unwind(AssertUnwindSafe(|| strategy.attempt(url, &markup))).unwrap_or_else(|_| {
            Err(ExtractError::ContentExtraction(format!(
                "{} strategy panicked",
                strategy.name()
            )))
        })
    }
}

#[async_trait]
impl ContentExtractor for Extractor {
    #[instrument(skip(self))]
    async fn extract(&self, url: &str) -> Result<ExtractedContent, ExtractError> {
        let mut title: Option<String> = None;
        let mut published_at: Option<DateTime<Utc>> = None;

        for strategy in &self.strategies {
            let partial = match self.run_strategy(strategy.as_ref(), url).await {
                Ok(partial) => partial,
                Err(e) => {
                    warn!(url, strategy = strategy.name(), error = %e, "Strategy failed");
                    continue;
                }
            };

            if title.is_none() {
                title = partial.title.clone().filter(|t| !t.trim().is_empty());
            }
            if published_at.is_none() {
                published_at = partial.published_at;
            }

            let chars = partial.body_chars();
            if chars >= self.min_body_chars {
                if let Some(body) = partial.body {
                    info!(url, strategy = strategy.name(), chars, "Extracted article text");
                    return Ok(ExtractedContent {
                        title,
                        body,
                        published_at,
                    });
                }
            }

            debug!(
                url,
                strategy = strategy.name(),
                chars,
                min = self.min_body_chars,
                "Body below quality gate"
            );
        }

        Err(ExtractError::Unavailable(url.to_string()))
    }
}
