//! Readability-based extraction
//!
//! Scores the DOM to isolate the main content region, then reduces it to plain
//! text. The title is the document title with site-name decorations removed.

use scraper::Html;
use spider_transformations::transformation::content::{
    ReturnFormat, TransformConfig, TransformInput, transform_content_input,
};

use crate::extractor::error::ExtractError;
use crate::extractor::html::{document_title, markdown_to_text, short_title};
use crate::extractor::strategy::{ExtractionStrategy, PartialExtraction};

/// Readability transform followed by plain-text stripping
#[derive(Debug, Default, Clone, Copy)]
pub struct ReadabilityStrategy;

impl ExtractionStrategy for ReadabilityStrategy {
    fn name(&self) -> &'static str {
        "readability"
    }

    fn attempt(&self, url: &str, markup: &str) -> Result<PartialExtraction, ExtractError> {
        let title = document_title(&Html::parse_document(markup))?.map(|t| short_title(&t));

        let parsed_url = url::Url::parse(url).ok();
        let config = TransformConfig {
            readability: true,
            main_content: true,
            return_format: ReturnFormat::Markdown,
            filter_images: true,
            filter_svg: true,
            clean_html: true,
        };
        let input = TransformInput {
            url: parsed_url.as_ref(),
            content: markup.as_bytes(),
            screenshot_bytes: None,
            encoding: None,
            selector_config: None,
            ignore_tags: None,
        };

        let text = markdown_to_text(&transform_content_input(input, &config));

        Ok(PartialExtraction {
            title,
            body: (!text.is_empty()).then_some(text),
            published_at: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_title_and_body() {
        let page = r#"<html><head><title>Coastal towns brace for record tides | Harbor Gazette</title></head>
            <body><div class="content">
              <p>Officials in four coastal towns opened emergency shelters on Friday ahead of record tides.</p>
              <p>Forecasters expect water levels to peak two feet above the previous high set in 2019.</p>
            </div></body></html>"#;

        let result = ReadabilityStrategy
            .attempt("https://gazette.example.com/tides", page)
            .unwrap();

        assert_eq!(result.title.as_deref(), Some("Coastal towns brace for record tides"));
        let body = result.body.unwrap_or_default();
        assert!(body.contains("emergency shelters"));
        assert!(result.published_at.is_none());
    }

    #[test]
    fn test_page_without_title() {
        let result = ReadabilityStrategy
            .attempt("https://example.com", "<html><body></body></html>")
            .unwrap();
        assert!(result.title.is_none());
    }
}
