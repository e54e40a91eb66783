//! # Mock Completion Model for Testing
//!
//! Provides a `MockCompletionModel` that implements the `CompletionModel` trait
//! so the summarizer can be exercised without making API calls. It can answer
//! with fixed text, fail like a provider error, or stall to trigger timeouts.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use rig::{
    completion::{
        AssistantContent, CompletionError, CompletionModel, CompletionRequest, CompletionResponse,
    },
    one_or_many::OneOrMany,
};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Error(String),
    Stall(Duration),
}

/// A mock completion model for testing purposes.
#[derive(Debug, Clone)]
pub struct MockCompletionModel {
    reply: Arc<Mutex<Reply>>,
    calls: Arc<AtomicUsize>,
}

impl MockCompletionModel {
    /// Creates a new mock model that answers with empty text.
    pub fn new() -> Self {
        Self {
            reply: Arc::new(Mutex::new(Reply::Text(String::new()))),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answer every request with `text`.
    pub async fn set_text_response(&self, text: &str) {
        *self.reply.lock().await = Reply::Text(text.to_string());
    }

    /// Fail every request with a provider error.
    pub async fn set_error(&self, message: &str) {
        *self.reply.lock().await = Reply::Error(message.to_string());
    }

    /// Sleep for `delay` before answering with empty text.
    pub async fn set_stall(&self, delay: Duration) {
        *self.reply.lock().await = Reply::Stall(delay);
    }

    /// Number of completion requests received so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Default for MockCompletionModel {
    fn default() -> Self {
        Self::new()
    }
}

impl CompletionModel for MockCompletionModel {
    type Response = String;

    async fn completion(
        &self,
        _completion_request: CompletionRequest,
    ) -> Result<CompletionResponse<Self::Response>, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = {
            let guard = self.reply.lock().await;
            guard.clone()
        };
        let text = match reply {
            Reply::Text(text) => text,
            Reply::Error(message) => return Err(CompletionError::ProviderError(message)),
            Reply::Stall(delay) => {
                tokio::time::sleep(delay).await;
                String::new()
            }
        };
        Ok(CompletionResponse {
            choice: OneOrMany::one(AssistantContent::text(&text)),
            raw_response: text,
        })
    }
}
