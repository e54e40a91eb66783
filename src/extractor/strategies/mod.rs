//! The four extraction strategies, in the order the pipeline tries them

mod article;
mod boilerplate;
mod markup;
mod readability;

pub use article::ArticleStrategy;
pub use boilerplate::BoilerplateStrategy;
pub use markup::MarkupStrategy;
pub use readability::ReadabilityStrategy;

use crate::extractor::strategy::ExtractionStrategy;

/// The default fallback chain: article, boilerplate, readability, markup
pub fn default_chain() -> Vec<Box<dyn ExtractionStrategy>> {
    vec![
        Box::new(ArticleStrategy),
        Box::new(BoilerplateStrategy),
        Box::new(ReadabilityStrategy),
        Box::new(MarkupStrategy),
    ]
}
