//! HTTP page fetching for the extraction strategies
//!
//! Every strategy downloads the page itself; nothing is cached between attempts.

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, StatusCode};
use tracing::{debug, instrument, warn};

use crate::extractor::config::ExtractorConfig;
use crate::extractor::error::ExtractError;

/// Source of raw page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the markup for `url`, or `None` if nothing usable came back
    async fn fetch(&self, url: &str) -> Option<String>;
}

/// Fetches pages over HTTP with a fixed browser identity and timeout
#[derive(Clone, Debug)]
pub struct HtmlFetcher {
    client: ReqwestClient,
}

impl HtmlFetcher {
    /// Create a fetcher from the extractor configuration
    pub fn new(config: &ExtractorConfig) -> Result<Self, ExtractError> {
        let mut headers = HeaderMap::new();
        let accept_language = HeaderValue::from_str(&config.accept_language)
            .map_err(|e| {
                ExtractError::ContentExtraction(format!("Invalid Accept-Language: {}", e))
            })?;
        headers.insert(ACCEPT_LANGUAGE, accept_language);

        let client = ReqwestClient::builder()
            .user_agent(config.user_agent.clone())
            .default_headers(headers)
            .timeout(config.fetch_timeout())
            .build()?;

        Ok(Self { client })
    }

    /// Fetch a page, reporting why it failed
    #[instrument(skip(self), level = "debug")]
    pub async fn try_fetch(&self, url: &str) -> Result<String, ExtractError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(ExtractError::Fetch {
                url: url.to_string(),
                reason: format!("status {}", status),
            });
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Err(ExtractError::Fetch {
                url: url.to_string(),
                reason: "empty body".to_string(),
            });
        }

        debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}

#[async_trait]
impl PageFetcher for HtmlFetcher {
    async fn fetch(&self, url: &str) -> Option<String> {
        match self.try_fetch(url).await {
            Ok(body) => Some(body),
            Err(e) => {
                warn!(url, error = %e, "Page fetch failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn fetcher() -> HtmlFetcher {
        HtmlFetcher::new(&ExtractorConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/story")
            .match_header("user-agent", Matcher::Regex("Chrome/120.0".to_string()))
            .match_header("accept-language", "en-US,en;q=0.9")
            .with_status(200)
            .with_body("<html><body>hello</body></html>")
            .expect(1)
            .create_async()
            .await;

        let body = fetcher().fetch(&format!("{}/story", server.url())).await;
        assert_eq!(body.as_deref(), Some("<html><body>hello</body></html>"));

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_ok_status_yields_nothing() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/paywalled")
            .with_status(403)
            .with_body("Forbidden")
            .create_async()
            .await;

        let body = fetcher().fetch(&format!("{}/paywalled", server.url())).await;
        assert!(body.is_none());

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_body_yields_nothing() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/empty")
            .with_status(200)
            .with_body("")
            .create_async()
            .await;

        let result = fetcher().try_fetch(&format!("{}/empty", server.url())).await;
        assert!(matches!(result, Err(ExtractError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_nothing() {
        let body = fetcher().fetch("http://127.0.0.1:1/unreachable").await;
        assert!(body.is_none());
    }
}
