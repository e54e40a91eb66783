//! Markup helpers shared by the extraction strategies

use pulldown_cmark::{Event, Parser, TagEnd};
use scraper::{ElementRef, Html, Selector};

use crate::extractor::error::ExtractError;

/// Elements whose text never belongs to readable content
pub const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript"];

/// Parse a CSS selector, mapping failures into an extraction error
pub fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css)
        .map_err(|e| ExtractError::HtmlParse(format!("Failed to parse selector '{}': {}", css, e)))
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text of the first element matching `css`, whitespace-normalized, if non-empty
pub fn first_text(document: &Html, css: &str) -> Result<Option<String>, ExtractError> {
    let selector = selector(css)?;
    Ok(document
        .select(&selector)
        .next()
        .map(|element| normalize_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty()))
}

/// Value of `attr` on the first element matching `css`, trimmed, if non-empty
pub fn first_attr(document: &Html, css: &str, attr: &str) -> Result<Option<String>, ExtractError> {
    let selector = selector(css)?;
    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(str::to_string))
}

/// The document's `<title>`
pub fn document_title(document: &Html) -> Result<Option<String>, ExtractError> {
    first_text(document, "title")
}

/// Drop site-name decorations from a page title
///
/// `"Heat waves are getting longer, study finds | The Daily Planet"` becomes
/// `"Heat waves are getting longer, study finds"`. Titles that would end up too
/// short or too long are returned unchanged.
pub fn short_title(title: &str) -> String {
    let original = normalize_whitespace(title);
    let word_count = |s: &str| s.split_whitespace().count();

    let mut candidate = original.clone();
    let mut found = false;
    for delimiter in [" | ", " - ", " \u{2013} ", " \u{2014} ", " :: ", " / "] {
        if !original.contains(delimiter) {
            continue;
        }
        let parts: Vec<&str> = original.split(delimiter).collect();
        let first = parts.first().copied().unwrap_or_default();
        let last = parts.last().copied().unwrap_or_default();
        if word_count(first) >= 4 {
            candidate = first.to_string();
            found = true;
            break;
        } else if word_count(last) >= 4 {
            candidate = last.to_string();
            found = true;
            break;
        }
    }

    if !found {
        if let Some((_, rest)) = original.split_once(": ") {
            if word_count(rest) >= 4 {
                candidate = rest.to_string();
            }
        }
    }

    let len = candidate.chars().count();
    if len <= 15 || len >= 150 {
        return original;
    }
    candidate
}

/// Flatten the visible text under `root` into trimmed, newline-separated lines
///
/// Text inside `script`, `style` and `noscript` is skipped.
pub fn flatten_text(root: ElementRef<'_>) -> String {
    let mut lines = Vec::new();
    for node in root.descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| NON_CONTENT_TAGS.contains(&element.name()))
        });
        if hidden {
            continue;
        }
        lines.extend(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }
    lines.join("\n")
}

/// Reduce Markdown to plain text, one block per line
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(&t),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak => text.push('\n'),
            Event::End(end)
                if matches!(
                    end,
                    TagEnd::Paragraph
                        | TagEnd::Heading(_)
                        | TagEnd::Item
                        | TagEnd::CodeBlock
                        | TagEnd::TableRow
                ) =>
            {
                text.push('\n')
            }
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
