//! # LLM Model Module
//!
//! Builds the completion model used for article summaries. Everything above this
//! module talks to the `rig` `CompletionModel` trait, so tests can swap in
//! [`mock_model::MockCompletionModel`].

use rig::providers::gemini;

pub mod mock_model;

/// Create a Gemini completion model for the given key and model name
pub fn gemini_completion_model(api_key: &str, model: &str) -> gemini::completion::CompletionModel {
    let gemini_client = gemini::Client::new(api_key);
    gemini_client.completion_model(model)
}
