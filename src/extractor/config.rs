//! # Extractor Configuration
//!
//! Controls how pages are fetched and how much text an extraction strategy has to
//! recover before its result is accepted.

use std::time::Duration;

/// Browser-like identity sent with every page request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";

/// Configuration for the extraction pipeline
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// User agent to use for requests
    pub user_agent: String,

    /// Accept-Language header to use for requests
    pub accept_language: String,

    /// Timeout for a single page fetch in seconds
    pub fetch_timeout_secs: u64,

    /// Minimum body length, in characters, for a strategy's text to be accepted
    pub min_body_chars: usize,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
            fetch_timeout_secs: 15,
            min_body_chars: 300,
        }
    }
}

/// Builder for ExtractorConfig
#[derive(Debug, Default)]
pub struct ExtractorConfigBuilder {
    config: ExtractorConfig,
}

impl ExtractorConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
        }
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the Accept-Language header
    pub fn accept_language(mut self, accept_language: impl Into<String>) -> Self {
        self.config.accept_language = accept_language.into();
        self
    }

    /// Set the page fetch timeout in seconds
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    /// Set the quality gate threshold
    pub fn min_body_chars(mut self, min_body_chars: usize) -> Self {
        self.config.min_body_chars = min_body_chars;
        self
    }

    /// Build the configuration
    pub fn build(self) -> ExtractorConfig {
        self.config
    }
}

impl ExtractorConfig {
    /// Create a new builder
    pub fn builder() -> ExtractorConfigBuilder {
        ExtractorConfigBuilder::new()
    }

    /// Get the fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}
