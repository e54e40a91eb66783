//! Structured-article extraction
//!
//! Reads a news-style page in one pass: headline from the social/meta tags or the
//! first heading, body from the paragraphs of the densest article container, and
//! the publish date from meta tags, JSON-LD, `<time>` elements or the URL path.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use scraper::{ElementRef, Html};
use tracing::trace;

use crate::extractor::error::ExtractError;
use crate::extractor::html::{
    document_title, first_attr, first_text, normalize_whitespace, selector,
};
use crate::extractor::strategy::{ExtractionStrategy, PartialExtraction};

/// Containers that usually wrap the article body, in order of preference
const BODY_CONTAINERS: &[&str] = &[
    "article",
    "[itemprop='articleBody']",
    "main",
    "[role='main']",
    ".article-body",
    ".post-content",
    ".entry-content",
];

/// Meta tags that carry a publish timestamp
const DATE_META: &[&str] = &[
    "meta[property='article:published_time']",
    "meta[property='og:published_time']",
    "meta[itemprop='datePublished']",
    "meta[name='pubdate']",
    "meta[name='publishdate']",
    "meta[name='publish-date']",
    "meta[name='parsely-pub-date']",
    "meta[name='date']",
    "meta[name='DC.date.issued']",
];

/// Paragraphs shorter than this are treated as captions or UI chrome
const MIN_PARAGRAPH_CHARS: usize = 25;

static URL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(19|20)(\d{2})[/-](\d{1,2})[/-](\d{1,2})(?:/|$|-)")
        .expect("valid url date pattern")
});

/// Article-aware extraction of title, body and publish date
#[derive(Debug, Default, Clone, Copy)]
pub struct ArticleStrategy;

impl ExtractionStrategy for ArticleStrategy {
    fn name(&self) -> &'static str {
        "article"
    }

    fn attempt(&self, url: &str, markup: &str) -> Result<PartialExtraction, ExtractError> {
        let document = Html::parse_document(markup);

        let title = extract_title(&document)?;
        let body = extract_body(&document)?;
        let published_at = extract_published_at(&document)?.or_else(|| date_from_url(url));

        trace!(
            url,
            title = title.as_deref().unwrap_or_default(),
            body_chars = body.as_deref().map_or(0, |b| b.chars().count()),
            "Article heuristics finished"
        );

        Ok(PartialExtraction {
            title,
            body,
            published_at,
        })
    }
}

fn extract_title(document: &Html) -> Result<Option<String>, ExtractError> {
    if let Some(title) = first_attr(document, "meta[property='og:title']", "content")? {
        return Ok(Some(normalize_whitespace(&title)));
    }
    if let Some(title) = first_attr(document, "meta[name='twitter:title']", "content")? {
        return Ok(Some(normalize_whitespace(&title)));
    }
    if let Some(title) = first_text(document, "h1")? {
        return Ok(Some(title));
    }
    document_title(document)
}

fn paragraphs(container: ElementRef<'_>) -> Result<Vec<String>, ExtractError> {
    let p = selector("p")?;
    Ok(container
        .select(&p)
        .map(|paragraph| normalize_whitespace(&paragraph.text().collect::<String>()))
        .filter(|text| text.chars().count() >= MIN_PARAGRAPH_CHARS)
        .collect())
}

fn extract_body(document: &Html) -> Result<Option<String>, ExtractError> {
    let mut best: Vec<String> = Vec::new();
    let mut best_len = 0;

    for css in BODY_CONTAINERS {
        let container = selector(css)?;
        for element in document.select(&container) {
            let found = paragraphs(element)?;
            let len: usize = found.iter().map(|p| p.chars().count()).sum();
            if len > best_len {
                best_len = len;
                best = found;
            }
        }
    }

    if best.is_empty() {
        best = paragraphs(document.root_element())?;
    }

    if best.is_empty() {
        Ok(None)
    } else {
        Ok(Some(best.join("\n\n")))
    }
}

fn extract_published_at(document: &Html) -> Result<Option<DateTime<Utc>>, ExtractError> {
    for css in DATE_META {
        if let Some(date) = first_attr(document, css, "content")?.and_then(|v| parse_date(&v)) {
            return Ok(Some(date));
        }
    }

    let ld_json = selector("script[type='application/ld+json']")?;
    for script in document.select(&ld_json) {
        let raw = script.text().collect::<String>();
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&raw) else {
            continue;
        };
        if let Some(date) = find_date_published(&value).and_then(parse_date) {
            return Ok(Some(date));
        }
    }

    Ok(first_attr(document, "time[datetime]", "datetime")?.and_then(|v| parse_date(&v)))
}

fn find_date_published(value: &serde_json::Value) -> Option<&str> {
    match value {
        serde_json::Value::Object(map) => map
            .get("datePublished")
            .and_then(|v| v.as_str())
            .or_else(|| map.values().find_map(find_date_published)),
        serde_json::Value::Array(items) => items.iter().find_map(find_date_published),
        _ => None,
    }
}

/// Parse the timestamp formats commonly found in article markup
pub(crate) fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(raw) {
        return Some(date.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(date.and_utc());
        }
    }
    let date_part = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|date| date.and_utc())
}

fn date_from_url(url: &str) -> Option<DateTime<Utc>> {
    let captures = URL_DATE.captures(url)?;
    let year: i32 = format!("{}{}", &captures[1], &captures[2]).parse().ok()?;
    let month: u32 = captures[3].parse().ok()?;
    let day: u32 = captures[4].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)?
        .and_hms_opt(0, 0, 0)
        .map(|date| date.and_utc())
}
