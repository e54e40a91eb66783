//! Last-resort extraction: every visible string on the page

use scraper::Html;

use crate::extractor::error::ExtractError;
use crate::extractor::html::{document_title, flatten_text};
use crate::extractor::strategy::{ExtractionStrategy, PartialExtraction};

/// Drops `script`, `style` and `noscript`, then flattens all remaining text
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkupStrategy;

impl ExtractionStrategy for MarkupStrategy {
    fn name(&self) -> &'static str {
        "markup"
    }

    fn attempt(&self, _url: &str, markup: &str) -> Result<PartialExtraction, ExtractError> {
        let document = Html::parse_document(markup);
        let text = flatten_text(document.root_element());

        Ok(PartialExtraction {
            title: document_title(&document)?,
            body: (!text.is_empty()).then_some(text),
            published_at: None,
        })
    }
}
