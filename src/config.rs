//! # Service Configuration
//!
//! Process-wide settings loaded once at startup. Credentials are optional at load
//! time so the service can still boot and report what is missing; anything that
//! needs them goes through [`Config::credentials`], which fails with
//! [`Error::Configuration`] when one is absent.
//!
//! ## Environment
//!
//! - `GOOGLE_API_KEY`, `GOOGLE_CSE_ID`: Custom Search credentials
//! - `GEMINI_API_KEY`: summarization model credential
//! - `BRIEF_HOST`, `BRIEF_PORT`: HTTP bind address
//! - `BRIEF_MODEL`: completion model name
//! - `BRIEF_CONCURRENCY`: candidates processed at once

use std::time::Duration;

use tracing::warn;

use crate::error::{Error, Result};

/// Number of candidates requested from the search provider
pub const MAX_CANDIDATES: usize = 10;

/// Number of successful summaries after which processing stops
pub const SUMMARY_QUOTA: usize = 6;

/// Characters of article text handed to the summarizer
pub const SUMMARY_INPUT_CHARS: usize = 8000;

/// Default completion model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Message surfaced when credentials are missing
pub const MISSING_KEYS_MESSAGE: &str = "One or more API keys are missing. Check your .env.";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Custom Search API key
    pub google_api_key: Option<String>,

    /// Google Custom Search engine id
    pub google_cse_id: Option<String>,

    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Host to bind the HTTP service to
    pub host: String,

    /// Port to bind the HTTP service to
    pub port: u16,

    /// Completion model used for summaries
    pub model: String,

    /// Number of candidates processed concurrently
    pub concurrency: usize,

    /// Upper bound for a single summarization call
    pub summarize_timeout: Duration,
}

/// The three credentials the orchestrator cannot run without
#[derive(Debug, Clone)]
pub struct Credentials {
    pub google_api_key: String,
    pub google_cse_id: String,
    pub gemini_api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            google_api_key: None,
            google_cse_id: None,
            gemini_api_key: None,
            host: "127.0.0.1".to_string(),
            port: 8000,
            model: DEFAULT_MODEL.to_string(),
            concurrency: 1,
            summarize_timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    /// Create a new builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Load configuration from the process environment, reading `.env` first if present
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let port = match non_empty("BRIEF_PORT") {
            Some(port) => port.trim().parse().map_err(|_| {
                Error::Configuration(format!("BRIEF_PORT must be a valid port, got {port:?}"))
            })?,
            None => defaults.port,
        };

        let concurrency = match non_empty("BRIEF_CONCURRENCY") {
            Some(n) => n.trim().parse::<usize>().ok().filter(|n| *n > 0).ok_or_else(|| {
                Error::Configuration(format!(
                    "BRIEF_CONCURRENCY must be a positive integer, got {n:?}"
                ))
            })?,
            None => defaults.concurrency,
        };

        let config = Self {
            google_api_key: non_empty("GOOGLE_API_KEY"),
            google_cse_id: non_empty("GOOGLE_CSE_ID"),
            gemini_api_key: non_empty("GEMINI_API_KEY"),
            host: non_empty("BRIEF_HOST").unwrap_or(defaults.host),
            port,
            model: non_empty("BRIEF_MODEL").unwrap_or(defaults.model),
            concurrency,
            summarize_timeout: defaults.summarize_timeout,
        };

        for missing in config.missing_credentials() {
            warn!("{} is not set; searches will fail until it is", missing);
        }

        Ok(config)
    }

    /// Names of the credentials that are not configured
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        [
            ("GOOGLE_API_KEY", &self.google_api_key),
            ("GOOGLE_CSE_ID", &self.google_cse_id),
            ("GEMINI_API_KEY", &self.gemini_api_key),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    /// All three credentials, or a configuration error naming the missing ones
    pub fn credentials(&self) -> Result<Credentials> {
        match (&self.google_api_key, &self.google_cse_id, &self.gemini_api_key) {
            (Some(api_key), Some(cse_id), Some(gemini)) => Ok(Credentials {
                google_api_key: api_key.clone(),
                google_cse_id: cse_id.clone(),
                gemini_api_key: gemini.clone(),
            }),
            _ => Err(Error::Configuration(format!(
                "{} (missing: {})",
                MISSING_KEYS_MESSAGE,
                self.missing_credentials().join(", ")
            ))),
        }
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Set the Google Custom Search API key
    pub fn google_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.google_api_key = Some(key.into());
        self
    }

    /// Set the Google Custom Search engine id
    pub fn google_cse_id(mut self, id: impl Into<String>) -> Self {
        self.config.google_cse_id = Some(id.into());
        self
    }

    /// Set the Gemini API key
    pub fn gemini_api_key(mut self, key: impl Into<String>) -> Self {
        self.config.gemini_api_key = Some(key.into());
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set the completion model name
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.config.model = model.into();
        self
    }

    /// Set how many candidates are processed at once (minimum 1)
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.config.concurrency = concurrency.max(1);
        self
    }

    pub fn summarize_timeout(mut self, timeout: Duration) -> Self {
        self.config.summarize_timeout = timeout;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = Config::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.port, 8000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.concurrency, 1);
        assert_eq!(
            config.missing_credentials(),
            vec!["GOOGLE_API_KEY", "GOOGLE_CSE_ID", "GEMINI_API_KEY"]
        );
    }

    #[test]
    fn test_credentials_present() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "g-key"),
            ("GOOGLE_CSE_ID", "cse"),
            ("GEMINI_API_KEY", "gem"),
            ("BRIEF_PORT", "9100"),
            ("BRIEF_CONCURRENCY", "4"),
        ]))
        .unwrap();

        let creds = config.credentials().unwrap();
        assert_eq!(creds.google_api_key, "g-key");
        assert_eq!(creds.google_cse_id, "cse");
        assert_eq!(creds.gemini_api_key, "gem");
        assert_eq!(config.bind_addr(), "127.0.0.1:9100");
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_blank_credential_counts_as_missing() {
        let config = Config::from_lookup(lookup(&[
            ("GOOGLE_API_KEY", "g-key"),
            ("GOOGLE_CSE_ID", "  "),
            ("GEMINI_API_KEY", "gem"),
        ]))
        .unwrap();

        match config.credentials() {
            Err(Error::Configuration(msg)) => assert!(msg.contains("GOOGLE_CSE_ID")),
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = Config::from_lookup(lookup(&[("BRIEF_PORT", "eighty")]));
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn test_builder_clamps_concurrency() {
        let config = Config::builder().concurrency(0).port(1234).build();
        assert_eq!(config.concurrency, 1);
        assert_eq!(config.port, 1234);
    }
}
