//! Boilerplate-stripping extraction
//!
//! Keeps the main content region of the page and drops navigation, headers,
//! footers and similar chrome. Recovers body text only.

use spider_transformations::transformation::content::{
    ReturnFormat, TransformConfig, TransformInput, transform_content_input,
};

use crate::extractor::error::ExtractError;
use crate::extractor::html::markdown_to_text;
use crate::extractor::strategy::{ExtractionStrategy, PartialExtraction};

/// Main-content extraction without readability scoring
#[derive(Debug, Default, Clone, Copy)]
pub struct BoilerplateStrategy;

impl ExtractionStrategy for BoilerplateStrategy {
    fn name(&self) -> &'static str {
        "boilerplate"
    }

    fn attempt(&self, url: &str, markup: &str) -> Result<PartialExtraction, ExtractError> {
        let parsed_url = url::Url::parse(url)?;
        let config = TransformConfig {
            readability: false,
            main_content: true,
            return_format: ReturnFormat::Markdown,
            filter_images: true,
            filter_svg: true,
            clean_html: true,
        };
        let input = TransformInput {
            url: Some(&parsed_url),
            content: markup.as_bytes(),
            screenshot_bytes: None,
            encoding: None,
            selector_config: None,
            ignore_tags: None,
        };

        let text = markdown_to_text(&transform_content_input(input, &config));

        Ok(PartialExtraction {
            title: None,
            body: (!text.is_empty()).then_some(text),
            published_at: None,
        })
    }
}
