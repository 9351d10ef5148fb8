//! Condensed plain-text backend for list-card previews.
//!
//! Previews are shown in fixed-height cards, so no markup is produced:
//! lists become `• item` / `1. item` lines, each quoted paragraph is wrapped
//! in quotation marks on its own line, and blank-line runs are squeezed.
//!
//! Empty blocks are kept: an empty paragraph between two blocks shows as one
//! blank line, the same gap it stands for in the source text.

use std::fmt::Write;
use std::sync::LazyLock;

use helpdeck_document::{HeadingLevel, ListKind};
use regex::Regex;

use crate::backend::RenderBackend;

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Preview render backend.
///
/// Blocks are separated by a newline; runs of three or more newlines are
/// collapsed to two and leading/trailing blank lines are trimmed.
pub struct PreviewBackend;

impl RenderBackend for PreviewBackend {
    const BLOCK_SEPARATOR: &'static str = "\n";
    const MARKUP: bool = false;

    fn paragraph(text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn heading(_level: HeadingLevel, text: &str, out: &mut String) {
        out.push_str(text);
    }

    fn list_start(_kind: ListKind, _out: &mut String) {}

    fn list_item(kind: ListKind, number: usize, text: &str, out: &mut String) {
        if number > 1 {
            out.push('\n');
        }
        match kind {
            ListKind::Bullet => write!(out, "• {text}").unwrap(),
            ListKind::Ordered => write!(out, "{number}. {text}").unwrap(),
        }
    }

    fn list_end(_kind: ListKind, _out: &mut String) {}

    fn blockquote(paragraphs: &[String], out: &mut String) {
        for (index, text) in paragraphs.iter().enumerate() {
            if index > 0 {
                out.push('\n');
            }
            write!(out, "\"{text}\"").unwrap();
        }
    }

    fn finish(out: String) -> String {
        let collapsed = EXCESS_NEWLINES.replace_all(&out, "\n\n");
        trim_blank_lines(&collapsed).to_owned()
    }
}

/// Strip whitespace-only lines from both ends of `text`.
fn trim_blank_lines(text: &str) -> &str {
    let start: usize = text
        .split_inclusive('\n')
        .take_while(|line| line.trim().is_empty())
        .map(str::len)
        .sum();
    let text = &text[start..];

    let mut end = text.len();
    while let Some(pos) = text[..end].rfind('\n') {
        if !text[pos + 1..end].trim().is_empty() {
            break;
        }
        end = pos;
    }
    &text[..end]
}
