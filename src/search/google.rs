//! Google Custom Search JSON API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use tracing::{debug, error, instrument};

use super::error::SearchError;
use super::{SearchProvider, SearchResult};

/// Endpoint of the Custom Search JSON API
pub const GOOGLE_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Default timeout for search requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// The API never returns more than this many results per request
const MAX_RESULTS_PER_REQUEST: usize = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Option<Vec<SearchItem>>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    title: Option<String>,
    link: Option<String>,
}

/// Search provider backed by a Programmable Search Engine
#[derive(Clone)]
pub struct GoogleSearch {
    client: ReqwestClient,
    base_url: String,
    api_key: String,
    cse_id: String,
}

#[cfg(test)]
impl GoogleSearch {
    /// Set the base URL (for testing only)
    pub fn set_base_url(&mut self, url: String) {
        self.base_url = url;
    }
}

impl GoogleSearch {
    /// Create a client for the given API key and search engine id
    pub fn new(api_key: impl Into<String>, cse_id: impl Into<String>) -> Result<Self, SearchError> {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: GOOGLE_SEARCH_URL.to_string(),
            api_key: api_key.into(),
            cse_id: cse_id.into(),
        })
    }
}

#[async_trait]
impl SearchProvider for GoogleSearch {
    #[instrument(skip(self), level = "debug")]
    async fn search(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, SearchError> {
        if query.trim().is_empty() {
            return Err(SearchError::InvalidParameters("query is empty".to_string()));
        }
        let num = max_results.clamp(1, MAX_RESULTS_PER_REQUEST).to_string();

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("cx", self.cse_id.as_str()),
                ("q", query),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!("Search API error: {} - {}", status, response_text);
            return Err(SearchError::Api {
                status_code: status.as_u16(),
                message: response_text,
            });
        }

        let parsed: SearchResponse = serde_json::from_str(&response_text)?;
        let results: Vec<SearchResult> = parsed
            .items
            .unwrap_or_default()
            .into_iter()
            .take(max_results)
            .map(|item| SearchResult {
                title: item.title,
                url: item.link,
            })
            .collect();

        debug!("Search for {:?} returned {} results", query, results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn client(server: &Server) -> GoogleSearch {
        let mut search = GoogleSearch::new("test-key", "test-cx").unwrap();
        search.set_base_url(server.url());
        search
    }

    #[tokio::test]
    async fn test_search_maps_items() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("key".into(), "test-key".into()),
                Matcher::UrlEncoded("cx".into(), "test-cx".into()),
                Matcher::UrlEncoded("q".into(), "climate policy 2024".into()),
                Matcher::UrlEncoded("num".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"items": [
                    {"title": "First", "link": "https://a.example.com"},
                    {"title": "No link"},
                    {"link": "https://c.example.com"}
                ]}"#,
            )
            .expect(1)
            .create_async()
            .await;

        let results = client(&server).search("climate policy 2024", 10).await.unwrap();

        assert_eq!(
            results,
            vec![
                SearchResult::new("First", "https://a.example.com"),
                SearchResult {
                    title: Some("No link".to_string()),
                    url: None
                },
                SearchResult {
                    title: None,
                    url: Some("https://c.example.com".to_string())
                },
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_search_without_items_is_empty() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"searchInformation": {"totalResults": "0"}}"#)
            .create_async()
            .await;

        let results = client(&server).search("nothing here", 10).await.unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_search_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_body("quota exceeded")
            .create_async()
            .await;

        let result = client(&server).search("anything", 10).await;
        assert!(matches!(result, Err(SearchError::Api { status_code: 403, .. })));
    }

    #[tokio::test]
    async fn test_search_malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let result = client(&server).search("anything", 10).await;
        assert!(matches!(result, Err(SearchError::ResultProcessing(_))));
    }
}
