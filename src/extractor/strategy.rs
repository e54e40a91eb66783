//! The interface every extraction strategy implements

use chrono::{DateTime, Utc};

use crate::extractor::error::ExtractError;

/// What a single strategy managed to recover from a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialExtraction {
    pub title: Option<String>,
    pub body: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

impl PartialExtraction {
    /// Length of the body in characters, zero if there is none
    pub fn body_chars(&self) -> usize {
        self.body.as_deref().map_or(0, |body| body.chars().count())
    }
}

/// One technique for turning a page's markup into article text
///
/// Implementations must be deterministic: the same url and markup always yield
/// the same result.
pub trait ExtractionStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Recover whatever the strategy can from `markup`
    fn attempt(&self, url: &str, markup: &str) -> Result<PartialExtraction, ExtractError>;
}
