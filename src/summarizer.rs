//! # Article Summarization
//!
//! Sends extracted article text to a completion model and returns a Markdown
//! bullet summary. A failed, timed-out or empty completion is reported so the
//! caller can skip the article; nothing is retried.

use std::time::Duration;

use async_trait::async_trait;
use rig::agent::AgentBuilder;
use rig::completion::{CompletionModel, Prompt};
use thiserror::Error;
use tracing::{debug, instrument, trace};

use crate::config::SUMMARY_INPUT_CHARS;

const PREAMBLE: &str =
    "You are a research assistant. Summarize the article into clear bullet points.";

/// Metadata passed to the model alongside the article text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SummaryContext {
    pub title: Option<String>,
    pub url: String,
    /// Publish date as ISO-8601, if known
    pub date_iso: Option<String>,
}

/// Errors raised while summarizing
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// The model provider rejected or failed the request
    #[error("LLM error: {0}")]
    Llm(String),

    /// The model did not answer in time
    #[error("Summarization timed out after {0:?}")]
    Timeout(Duration),
}

/// Anything that can summarize article text
#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Summarize `text`; `Ok(None)` means the model produced nothing usable
    async fn summarize(
        &self,
        text: &str,
        context: &SummaryContext,
    ) -> Result<Option<String>, SummarizeError>;
}

/// Build the user prompt for an article
///
/// Only the first [`SUMMARY_INPUT_CHARS`] characters of `text` are included.
pub fn build_prompt(text: &str, context: &SummaryContext) -> String {
    let content: String = text.chars().take(SUMMARY_INPUT_CHARS).collect();
    format!(
        "Requirements:\n\
         - 5-8 concise bullets.\n\
         - One-sentence tl;dr at top.\n\
         - Include any concrete numbers, dates, names.\n\
         - If the article is older, note its age.\n\
         - Output valid GitHub-flavored Markdown only.\n\
         \n\
         Article title: {}\n\
         Article URL: {}\n\
         Article date (if any): {}\n\
         \n\
         CONTENT (first {} chars):\n\
         ---\n\
         {}\n\
         ---\n",
        context.title.as_deref().unwrap_or("Unknown"),
        context.url,
        context.date_iso.as_deref().unwrap_or("None"),
        SUMMARY_INPUT_CHARS,
        content
    )
}

/// Summarizer backed by a `rig` completion model
#[derive(Clone)]
pub struct ArticleSummarizer<M: CompletionModel> {
    model: M,
    timeout: Duration,
}

impl<M: CompletionModel> ArticleSummarizer<M> {
    pub fn new(model: M, timeout: Duration) -> Self {
        Self { model, timeout }
    }
}

#[async_trait]
impl<M> Summarizer for ArticleSummarizer<M>
where
    M: CompletionModel + 'static,
{
    #[instrument(skip(self, text), fields(url = %context.url))]
    async fn summarize(
        &self,
        text: &str,
        context: &SummaryContext,
    ) -> Result<Option<String>, SummarizeError> {
        let prompt = build_prompt(text, context);
        debug!(
            "Summarizing {} chars of article text",
            text.chars().count().min(SUMMARY_INPUT_CHARS)
        );

        let agent = AgentBuilder::new(self.model.clone()).preamble(PREAMBLE).build();
        let response = tokio::time::timeout(self.timeout, agent.prompt(prompt.as_str()))
            .await
            .map_err(|_| SummarizeError::Timeout(self.timeout))?
            .map_err(|e| SummarizeError::Llm(e.to_string()))?;

        let summary = response.trim();
        trace!("Model returned {} chars", summary.len());
        if summary.is_empty() {
            Ok(None)
        } else {
            Ok(Some(summary.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::mock_model::MockCompletionModel;

    fn context() -> SummaryContext {
        SummaryContext {
            title: Some("Rivers run dry".to_string()),
            url: "https://news.example.com/rivers".to_string(),
            date_iso: Some("2024-03-05T07:30:00+00:00".to_string()),
        }
    }

    #[test]
    fn test_prompt_includes_metadata() {
        let prompt = build_prompt("Body text.", &context());

        assert!(prompt.contains("Article title: Rivers run dry"));
        assert!(prompt.contains("Article URL: https://news.example.com/rivers"));
        assert!(prompt.contains("Article date (if any): 2024-03-05T07:30:00+00:00"));
        assert!(prompt.contains("---\nBody text.\n---"));
    }

    #[test]
    fn test_prompt_truncates_to_first_8000_chars() {
        let text = format!("{}{}", "a".repeat(SUMMARY_INPUT_CHARS), "TAIL");
        let prompt = build_prompt(&text, &SummaryContext::default());

        assert!(prompt.contains(&"a".repeat(SUMMARY_INPUT_CHARS)));
        assert!(!prompt.contains("TAIL"));
        assert!(prompt.contains("Article title: Unknown"));
        assert!(prompt.contains("Article date (if any): None"));
    }

    #[test]
    fn test_prompt_truncation_respects_char_boundaries() {
        let text = "é".repeat(SUMMARY_INPUT_CHARS + 10);
        let prompt = build_prompt(&text, &SummaryContext::default());
        assert_eq!(prompt.matches('é').count(), SUMMARY_INPUT_CHARS);
    }

    #[tokio::test]
    async fn test_summarize_returns_markdown() {
        let model = MockCompletionModel::new();
        model
            .set_text_response("**tl;dr** Rivers are low.\n\n- Lowest since 1921\n- Quotas cut 40%\n")
            .await;
        let summarizer = ArticleSummarizer::new(model.clone(), Duration::from_secs(5));

        let summary = summarizer.summarize("Body", &context()).await.unwrap();

        assert_eq!(
            summary.as_deref(),
            Some("**tl;dr** Rivers are low.\n\n- Lowest since 1921\n- Quotas cut 40%")
        );
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_blank_response_is_none() {
        let model = MockCompletionModel::new();
        model.set_text_response("  \n ").await;
        let summarizer = ArticleSummarizer::new(model, Duration::from_secs(5));

        let summary = summarizer.summarize("Body", &context()).await.unwrap();
        assert!(summary.is_none());
    }

    #[tokio::test]
    async fn test_provider_error_is_reported() {
        let model = MockCompletionModel::new();
        model.set_error("quota exhausted").await;
        let summarizer = ArticleSummarizer::new(model, Duration::from_secs(5));

        let result = summarizer.summarize("Body", &context()).await;
        assert!(matches!(result, Err(SummarizeError::Llm(msg)) if msg.contains("quota exhausted")));
    }

    #[tokio::test]
    async fn test_slow_model_times_out() {
        let model = MockCompletionModel::new();
        model.set_stall(Duration::from_secs(10)).await;
        let summarizer = ArticleSummarizer::new(model, Duration::from_millis(50));

        let result = summarizer.summarize("Body", &context()).await;
        assert!(matches!(result, Err(SummarizeError::Timeout(_))));
    }
}
