//! Output formatting for search results

use crate::index::types::IndexEntry;
use crate::query::Matcher;
use std::io::{self, Write};
use std::ops::Range;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Widest snippet printed under an entry, in bytes
const SNIPPET_WIDTH: usize = 96;

/// Print entries in human-readable form, highlighting `query` when given
pub fn print_entries(entries: &[&IndexEntry], query: Option<&str>, choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    write_entries(&mut stdout, entries, query)
}

pub fn write_entries<W: WriteColor>(out: &mut W, entries: &[&IndexEntry], query: Option<&str>) -> io::Result<()> {
    let matcher = query.and_then(Matcher::new);

    for entry in entries {
        // Header: page › title (location)
        out.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)).set_bold(true))?;
        write!(out, "{}", entry.page)?;
        out.reset()?;
        write!(out, " › ")?;
        write_highlighted(out, &entry.title, matcher.as_ref())?;

        if !entry.location.is_empty() {
            out.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)))?;
            write!(out, " ({})", entry.location)?;
            out.reset()?;
        }

        out.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
        write!(out, " [{}]", entry.category)?;
        out.reset()?;
        writeln!(out)?;

        if !entry.text.is_empty() {
            let span = matcher.as_ref().and_then(|m| m.find_span(&entry.text));
            let (snippet, span) = snippet(&entry.text, span);
            write!(out, "    ")?;
            write_with_span(out, &snippet, span)?;
            writeln!(out)?;
        }
    }

    Ok(())
}

/// Print entries as a JSON array of records
pub fn print_json(entries: &[&IndexEntry]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    serde_json::to_writer_pretty(&mut lock, entries)?;
    writeln!(lock)
}

/// Print one page name per line
pub fn print_pages(pages: &[&str], choice: ColorChoice) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(choice);
    for page in pages {
        stdout.set_color(ColorSpec::new().set_fg(Some(Color::Magenta)))?;
        writeln!(stdout, "{}", page)?;
        stdout.reset()?;
    }
    Ok(())
}

fn write_highlighted<W: WriteColor>(out: &mut W, text: &str, matcher: Option<&Matcher>) -> io::Result<()> {
    let span = matcher.and_then(|m| m.find_span(text));
    write_with_span(out, text, span)
}

/// Write `text` with the byte range `span` highlighted
fn write_with_span<W: WriteColor>(out: &mut W, text: &str, span: Option<Range<usize>>) -> io::Result<()> {
    let Some(span) = span else {
        return write!(out, "{}", text);
    };

    write!(out, "{}", &text[..span.start])?;
    out.set_color(ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true))?;
    write!(out, "{}", &text[span.clone()])?;
    out.reset()?;
    write!(out, "{}", &text[span.end..])
}

/// Flatten `text` onto one line and cut it down to a window around `span`.
///
/// Returns the snippet and the span re-based into it.
fn snippet(text: &str, span: Option<Range<usize>>) -> (String, Option<Range<usize>>) {
    // Single-byte replacements keep every offset valid
    let flat: String = text
        .chars()
        .map(|c| if c == '\n' || c == '\r' || c == '\t' { ' ' } else { c })
        .collect();

    if flat.len() <= SNIPPET_WIDTH {
        return (flat, span);
    }

    let center = span.as_ref().map(|s| s.start).unwrap_or(0);
    let mut start = floor_boundary(&flat, center.saturating_sub(SNIPPET_WIDTH / 4));
    let mut end = floor_boundary(&flat, (start + SNIPPET_WIDTH).min(flat.len()));
    if let Some(s) = &span {
        // Never cut through the match itself
        start = start.min(s.start);
        end = end.max(s.end);
    }

    let mut out = String::with_capacity(end - start + 6);
    if start > 0 {
        out.push('…');
    }
    let offset = out.len();
    out.push_str(&flat[start..end]);
    if end < flat.len() {
        out.push('…');
    }

    let span = span.map(|s| (s.start - start + offset)..(s.end - start + offset));
    (out, span)
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
