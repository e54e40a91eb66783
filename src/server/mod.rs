//! # HTTP Service
//!
//! Serves the landing page and the JSON/PDF endpoints:
//!
//! - `GET /` landing page with the query form
//! - `POST /search` `{"query": ...}` to a JSON array of summaries
//! - `POST /export` `{"query": ..., "items": [...]}` to a PDF download
//!
//! The service starts even when credentials are missing; `/search` then answers
//! with a 500 until the process is restarted with a complete configuration.

mod error;
mod routes;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::orchestrator::Orchestrator;

pub use error::ApiError;

/// Shared state for request handlers
pub struct AppState {
    orchestrator: std::result::Result<Arc<Orchestrator>, String>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator: Ok(orchestrator),
        }
    }

    /// State whose searches fail with a configuration error
    pub fn unconfigured(reason: impl Into<String>) -> Self {
        Self {
            orchestrator: Err(reason.into()),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match Orchestrator::from_config(config) {
            Ok(orchestrator) => Self::new(Arc::new(orchestrator)),
            Err(e) => {
                warn!(error = %e, "Search is disabled until configuration is fixed");
                Self::unconfigured(e.to_string())
            }
        }
    }

    fn orchestrator(&self) -> Result<Arc<Orchestrator>> {
        self.orchestrator.clone().map_err(Error::Configuration)
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/search", post(routes::search))
        .route("/export", post(routes::export))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured address and serve until the process exits
pub async fn serve(config: &Config) -> Result<()> {
    let state = Arc::new(AppState::from_config(config));
    let listener = TcpListener::bind(config.bind_addr()).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MISSING_KEYS_MESSAGE;
    use crate::error::UNSUMMARIZABLE_MESSAGE;
    use crate::extractor::{ContentExtractor, ExtractError, ExtractedContent};
    use crate::search::{SearchError, SearchProvider, SearchResult};
    use crate::summarizer::{SummarizeError, Summarizer, SummaryContext};
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    struct Candidates(Vec<SearchResult>);

    #[async_trait]
    impl SearchProvider for Candidates {
        async fn search(
            &self,
            _query: &str,
            _max_results: usize,
        ) -> std::result::Result<Vec<SearchResult>, SearchError> {
            Ok(self.0.clone())
        }
    }

    /// Extracts every page except those whose URL contains "paywall"
    struct Pages;

    #[async_trait]
    impl ContentExtractor for Pages {
        async fn extract(&self, url: &str) -> std::result::Result<ExtractedContent, ExtractError> {
            if url.contains("paywall") {
                return Err(ExtractError::Unavailable(url.to_string()));
            }
            Ok(ExtractedContent {
                title: Some(format!("Page {}", url)),
                body: "text ".repeat(100),
                published_at: None,
            })
        }
    }

    struct Bullets;

    #[async_trait]
    impl Summarizer for Bullets {
        async fn summarize(
            &self,
            _text: &str,
            context: &SummaryContext,
        ) -> std::result::Result<Option<String>, SummarizeError> {
            Ok(Some(format!("- about {}", context.url)))
        }
    }

    fn app(urls: &[&str]) -> Router {
        let candidates = urls.iter().map(|u| SearchResult::new("t", *u)).collect();
        let orchestrator = Orchestrator::new(
            Arc::new(Candidates(candidates)),
            Arc::new(Pages),
            Arc::new(Bullets),
        );
        router(Arc::new(AppState::new(Arc::new(orchestrator))))
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body.into())
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let response = app(&[])
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains("/search"));
        assert!(html.contains("/export"));
    }

    #[tokio::test]
    async fn test_search_returns_summaries() {
        let response = app(&["https://a.example.com", "https://b.example.com"])
            .oneshot(post("/search", json!({"query": "rivers"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["url"], "https://a.example.com");
        assert_eq!(items[0]["title"], "Page https://a.example.com");
        assert_eq!(items[0]["summary"], "- about https://a.example.com");
    }

    #[tokio::test]
    async fn test_search_with_empty_query_is_bad_request() {
        let response = app(&["https://a.example.com"])
            .oneshot(post("/search", json!({"query": "   "}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json_body(response).await,
            json!({"error": "Search query cannot be empty."})
        );
    }

    #[tokio::test]
    async fn test_malformed_search_body_counts_as_empty_query() {
        let response = app(&["https://a.example.com"])
            .oneshot(post("/search", "not json"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_search_without_credentials_is_server_error() {
        let app = router(Arc::new(AppState::unconfigured("missing: GOOGLE_API_KEY")));
        let response = app
            .oneshot(post("/search", json!({"query": "rivers"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": MISSING_KEYS_MESSAGE}));
    }

    #[tokio::test]
    async fn test_state_from_incomplete_config_rejects_search() {
        let app = router(Arc::new(AppState::from_config(&Config::default())));
        let response = app
            .oneshot(post("/search", json!({"query": "rivers"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": MISSING_KEYS_MESSAGE}));
    }

    #[tokio::test]
    async fn test_unsummarizable_sources_are_server_error() {
        let response = app(&["https://paywall.example.com/1", "https://paywall.example.com/2"])
            .oneshot(post("/search", json!({"query": "rivers"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json_body(response).await, json!({"error": UNSUMMARIZABLE_MESSAGE}));
    }

    #[tokio::test]
    async fn test_search_with_no_candidates_is_empty_list() {
        let response = app(&[])
            .oneshot(post("/search", json!({"query": "rivers"}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_export_without_items_is_bad_request() {
        let response = app(&[])
            .oneshot(post("/export", json!({"query": "q", "items": []}).to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await, json!({"error": "No items to export."}));
    }

    #[tokio::test]
    async fn test_export_returns_pdf() {
        let body = json!({
            "query": "climate policy 2024",
            "items": [{"title": "T", "url": "http://x", "summary": "- a\n- b"}]
        });
        let response = app(&[])
            .oneshot(post("/export", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=summary.pdf"
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[tokio::test]
    async fn test_export_fills_item_defaults() {
        let body = json!({"items": [{}]});
        let response = app(&[])
            .oneshot(post("/export", body.to_string()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
