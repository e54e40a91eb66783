//! # brief - search, extract and summarize
//!
//! Turns a free-text query into a short list of article summaries:
//!
//! 1. Google Programmable Search returns up to ten candidate URLs.
//! 2. Each page is fetched and run through a chain of extraction strategies
//!    until one yields enough readable text.
//! 3. The text is summarized into Markdown bullets by a Gemini model.
//! 4. The first six successes, in search order, are returned.
//!
//! Results can be served over HTTP ([`server`]), printed to a terminal
//! ([`markdown`]) or rendered as a PDF report ([`report`]).
//!
//! ## Example
//!
//! ```rust,no_run
//! use brief::config::Config;
//! use brief::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let orchestrator = Orchestrator::from_config(&config)?;
//!
//!     for item in orchestrator.run("climate policy 2024").await? {
//!         println!("{} ({})\n{}\n", item.title, item.url, item.summary_markdown);
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
mod error;
pub mod extractor;
pub mod markdown;
pub mod model;
pub mod orchestrator;
pub mod report;
pub mod search;
pub mod server;
pub mod summarizer;

pub use error::{Error, Result, UNSUMMARIZABLE_MESSAGE};

/// Commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::orchestrator::{Orchestrator, SummaryItem};
}
