//! Terminal rendering of summaries
//!
//! Summaries are GitHub-flavored Markdown. This module walks the pulldown-cmark
//! event stream and writes styled text to any [`WriteColor`] sink, so the same
//! code drives a colored terminal and a plain in-memory buffer.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::error::Result;
use crate::orchestrator::SummaryItem;

/// Print summaries to stdout, colored when stdout is a terminal
pub fn print_summaries(items: &[SummaryItem]) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    write_summaries(&mut stdout, items)
}

/// Write a numbered list of summaries with their titles and URLs
pub fn write_summaries<W: WriteColor>(out: &mut W, items: &[SummaryItem]) -> Result<()> {
    if items.is_empty() {
        writeln!(out, "No results found.")?;
        return Ok(());
    }

    for (i, item) in items.iter().enumerate() {
        out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(out, "{}. {}", i + 1, item.title)?;
        out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_underline(true))?;
        writeln!(out, "{}", item.url)?;
        out.reset()?;

        write_markdown(out, &item.summary_markdown)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Render Markdown text with terminal styling
pub fn write_markdown<W: WriteColor>(out: &mut W, markdown: &str) -> Result<()> {
    let mut state = FormatState::default();
    for event in Parser::new_ext(markdown, Options::all()) {
        state.handle_event(out, event)?;
    }
    out.reset()?;
    Ok(())
}

#[derive(Default)]
struct FormatState {
    styles: Vec<ColorSpec>,
    /// Next number for each open list; `None` for bullet lists
    lists: Vec<Option<u64>>,
}

impl FormatState {
    fn handle_event<W: WriteColor>(&mut self, out: &mut W, event: Event) -> Result<()> {
        match event {
            Event::Start(tag) => self.start(out, tag)?,
            Event::End(tag) => self.end(out, tag)?,
            Event::Text(text) => write!(out, "{}", text)?,
            Event::Code(code) => {
                out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
                write!(out, "`{}`", code)?;
                self.restore(out)?;
            }
            Event::SoftBreak => write!(out, " ")?,
            Event::HardBreak => writeln!(out)?,
            Event::Rule => writeln!(out, "---")?,
            _ => {}
        }
        Ok(())
    }

    fn push<W: WriteColor>(&mut self, out: &mut W, spec: ColorSpec) -> Result<()> {
        out.set_color(&spec)?;
        self.styles.push(spec);
        Ok(())
    }

    fn pop<W: WriteColor>(&mut self, out: &mut W) -> Result<()> {
        self.styles.pop();
        self.restore(out)
    }

    fn restore<W: WriteColor>(&self, out: &mut W) -> Result<()> {
        match self.styles.last() {
            Some(spec) => out.set_color(spec)?,
            None => out.reset()?,
        }
        Ok(())
    }

    fn start<W: WriteColor>(&mut self, out: &mut W, tag: Tag) -> Result<()> {
        match tag {
            Tag::Heading { level, .. } => {
                let color = match level {
                    HeadingLevel::H1 => Color::Rgb(255, 99, 71),
                    HeadingLevel::H2 => Color::Rgb(70, 130, 180),
                    _ => Color::Cyan,
                };
                let mut spec = ColorSpec::new();
                spec.set_fg(Some(color)).set_bold(true);
                self.push(out, spec)?;
            }
            Tag::Strong => {
                let mut spec = self.styles.last().cloned().unwrap_or_default();
                spec.set_bold(true);
                self.push(out, spec)?;
            }
            Tag::Emphasis => {
                let mut spec = self.styles.last().cloned().unwrap_or_default();
                spec.set_italic(true);
                self.push(out, spec)?;
            }
            Tag::Link { .. } => {
                let mut spec = ColorSpec::new();
                spec.set_fg(Some(Color::Blue)).set_underline(true);
                self.push(out, spec)?;
            }
            Tag::List(start) => {
                if !self.lists.is_empty() {
                    writeln!(out)?;
                }
                self.lists.push(start);
            }
            Tag::Item => {
                let depth = self.lists.len().saturating_sub(1);
                write!(out, "{}", "  ".repeat(depth))?;
                match self.lists.last_mut() {
                    Some(Some(n)) => {
                        write!(out, "{}. ", n)?;
                        *n += 1;
                    }
                    _ => write!(out, "• ")?,
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn end<W: WriteColor>(&mut self, out: &mut W, tag: TagEnd) -> Result<()> {
        match tag {
            TagEnd::Heading(_) => {
                self.pop(out)?;
                writeln!(out)?;
            }
            TagEnd::Strong | TagEnd::Emphasis => self.pop(out)?,
            TagEnd::Link => {
                self.pop(out)?;
            }
            TagEnd::Paragraph => {
                if self.lists.is_empty() {
                    writeln!(out)?;
                    writeln!(out)?;
                }
            }
            TagEnd::List(_) => {
                self.lists.pop();
            }
            TagEnd::Item => writeln!(out)?,
            _ => {}
        }
        Ok(())
    }
}
