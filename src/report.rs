//! # PDF Report Export
//!
//! Renders a list of summaries as a US Letter PDF: the query as a heading, a
//! generation timestamp, then for each item a numbered heading, a clickable URL
//! and the summary's lines as plain paragraphs. Markdown is not interpreted; it is
//! only split into lines.

use chrono::{DateTime, Utc};
use printpdf::{
    Actions, BuiltinFont, Color, IndirectFontRef, LinkAnnotation, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Rect, Rgb,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::orchestrator::{SummaryItem, UNTITLED};

const PAGE_WIDTH: f32 = 215.9;
const PAGE_HEIGHT: f32 = 279.4;
const MARGIN: f32 = 25.4;

/// Millimetres per typographic point
const PT_TO_MM: f32 = 0.3528;

/// Average Helvetica glyph width as a fraction of the font size
const AVG_GLYPH_EM: f32 = 0.52;

/// Heading used when an export request carries no query
pub const DEFAULT_REPORT_TITLE: &str = "Research Summary";

const NO_SUMMARY: &str = "No summary available.";

fn default_title() -> String {
    UNTITLED.to_string()
}

fn default_summary() -> String {
    NO_SUMMARY.to_string()
}

/// One entry of a report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportItem {
    #[serde(default = "default_title")]
    pub title: String,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default = "default_summary")]
    pub summary: String,
}

impl From<SummaryItem> for ReportItem {
    fn from(item: SummaryItem) -> Self {
        Self {
            title: item.title,
            url: Some(item.url),
            summary: item.summary_markdown,
        }
    }
}

#[derive(Clone, Copy)]
enum Style {
    Title,
    Heading,
    Body,
}

impl Style {
    fn size(self) -> f32 {
        match self {
            Style::Title => 18.0,
            Style::Heading => 13.0,
            Style::Body => 10.0,
        }
    }

    fn line_height(self) -> f32 {
        self.size() * PT_TO_MM * 1.35
    }
}

/// Lays text out top to bottom, starting new pages as needed
struct ReportWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
    pages: usize,
}

impl ReportWriter {
    fn new(title: &str) -> Result<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| Error::Report(format!("Failed to load font: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| Error::Report(format!("Failed to load font: {}", e)))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            let (page, layer) = self
                .doc
                .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.cursor = PAGE_HEIGHT - MARGIN;
            self.pages += 1;
        }
    }

    fn font(&self, style: Style) -> &IndirectFontRef {
        match style {
            Style::Body => &self.regular,
            Style::Title | Style::Heading => &self.bold,
        }
    }

    fn paragraph(&mut self, text: &str, style: Style) {
        for line in wrap(&to_winansi(text), max_chars(style.size())) {
            let height = style.line_height();
            self.ensure_room(height);
            self.cursor -= height;
            self.layer.use_text(
                line,
                style.size(),
                Mm(MARGIN),
                Mm(self.cursor),
                self.font(style),
            );
        }
    }

    fn link(&mut self, url: &str) {
        let style = Style::Body;
        let blue = Color::Rgb(Rgb::new(0.0, 0.2, 0.8, None));
        let black = Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None));

        self.layer.set_fill_color(blue);
        for line in wrap(&to_winansi(url), max_chars(style.size())) {
            let height = style.line_height();
            self.ensure_room(height);
            self.cursor -= height;

            let width = line.chars().count() as f32 * style.size() * PT_TO_MM * AVG_GLYPH_EM;
            self.layer.use_text(
                line,
                style.size(),
                Mm(MARGIN),
                Mm(self.cursor),
                &self.regular,
            );
            self.layer.add_link_annotation(LinkAnnotation::new(
                Rect::new(
                    Mm(MARGIN),
                    Mm(self.cursor - 1.0),
                    Mm(MARGIN + width),
                    Mm(self.cursor + style.size() * PT_TO_MM),
                ),
                None,
                None,
                Actions::uri(url.to_string()),
                None,
            ));
        }
        self.layer.set_fill_color(black);
    }

    fn space(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn finish(self) -> Result<Vec<u8>> {
        debug!("Rendered report with {} pages", self.pages);
        self.doc
            .save_to_bytes()
            .map_err(|e| Error::Report(format!("Failed to write PDF: {}", e)))
    }
}

/// Widest line, in characters, that fits the text column at `size` points
fn max_chars(size: f32) -> usize {
    let column = PAGE_WIDTH - 2.0 * MARGIN;
    (column / (size * PT_TO_MM * AVG_GLYPH_EM)).floor().max(10.0) as usize
}

/// Greedy word wrap; words longer than a line are split
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let rest = word.split_off(width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Map text onto what the built-in PDF fonts can draw
fn to_winansi(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2022}' => '*',
            '\t' => ' ',
            c if c.is_ascii() && !c.is_ascii_control() => c,
            c if ('\u{A0}'..='\u{FF}').contains(&c) => c,
            _ => '?',
        })
        .collect()
}

/// Render the report, returning the PDF bytes
pub fn render_report(
    query: &str,
    items: &[ReportItem],
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let query = if query.trim().is_empty() {
        DEFAULT_REPORT_TITLE
    } else {
        query.trim()
    };
    let mut writer = ReportWriter::new(query)?;

    writer.paragraph(query, Style::Title);
    writer.paragraph(
        &format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M UTC")),
        Style::Body,
    );
    writer.space(7.6);

    for (i, item) in items.iter().enumerate() {
        writer.paragraph(&format!("{}. {}", i + 1, item.title), Style::Heading);
        if let Some(url) = item.url.as_deref().filter(|u| !u.is_empty()) {
            writer.link(url);
        }
        writer.space(2.5);

        for line in item.summary.lines().map(str::trim).filter(|l| !l.is_empty()) {
            writer.paragraph(line, Style::Body);
        }
        writer.space(7.6);
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn item(title: &str) -> ReportItem {
        ReportItem {
            title: title.to_string(),
            url: Some("http://x".to_string()),
            summary: "- a\n- b".to_string(),
        }
    }

    #[test]
    fn test_render_single_item() {
        let generated = Utc.with_ymd_and_hms(2024, 9, 1, 10, 30, 0).unwrap();
        let bytes = render_report("climate policy 2024", &[item("T")], generated).unwrap();

        assert!(!bytes.is_empty());
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_report_spans_pages() {
        let summary = (0..12)
            .map(|i| {
                format!("- Bullet {} with enough words to take up a reasonable share of a line", i)
            })
            .collect::<Vec<_>>()
            .join("\n");
        let items: Vec<ReportItem> = (0..10)
            .map(|i| ReportItem {
                title: format!("Article {}", i),
                url: Some(format!("https://example.com/{}", i)),
                summary: summary.clone(),
            })
            .collect();

        let mut writer = ReportWriter::new("long").unwrap();
        for item in &items {
            writer.paragraph(&item.title, Style::Heading);
            for line in item.summary.lines() {
                writer.paragraph(line, Style::Body);
            }
        }
        assert!(writer.pages > 1);
        assert!(writer.cursor >= MARGIN);
    }

    #[test]
    fn test_wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 10);
        assert_eq!(lines, vec!["the quick", "brown fox", "jumps over", "the lazy", "dog"]);
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap("https://example.com/a/very/long/path", 12);
        assert_eq!(lines.concat(), "https://example.com/a/very/long/path");
        assert!(lines.iter().all(|l| l.chars().count() <= 12));
    }

    #[test]
    fn test_to_winansi() {
        assert_eq!(to_winansi("\u{201C}Caf\u{e9}\u{201D} \u{2014} \u{6F22}"), "\"Caf\u{e9}\" - ?");
    }

    #[test]
    fn test_report_item_defaults() {
        let item: ReportItem = serde_json::from_str("{}").unwrap();
        assert_eq!(item.title, "Untitled");
        assert_eq!(item.summary, "No summary available.");
        assert!(item.url.is_none());
    }
}
