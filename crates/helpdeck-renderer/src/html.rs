//! HTML backend for block rendering.
//!
//! Produces the HTML fragment embedded into themed article and change-log
//! pages. Only a fixed set of tags is emitted and no attributes are written;
//! spacing is left to the page container's CSS, so blocks are concatenated
//! without separators.

use std::fmt::Write;

use helpdeck_document::{HeadingLevel, ListKind};

use crate::backend::RenderBackend;

/// HTML render backend.
///
/// Produces:
/// - `<p>` for paragraphs (empty paragraphs render as `<p></p>`)
/// - `<h1>`..`<h6>` for headings
/// - `<ul>` / `<ol>` with one `<li>` per item
/// - `<blockquote>` for blockquotes
pub struct HtmlBackend;

impl RenderBackend for HtmlBackend {
    const BLOCK_SEPARATOR: &'static str = "";
    const MARKUP: bool = true;

    fn paragraph(text: &str, out: &mut String) {
        out.push_str("<p>");
        out.push_str(text);
        out.push_str("</p>");
    }

    fn heading(level: HeadingLevel, text: &str, out: &mut String) {
        let level = level.get();
        write!(out, "<h{level}>{text}</h{level}>").unwrap();
    }

    fn list_start(kind: ListKind, out: &mut String) {
        out.push_str(list_tag(kind, false));
    }

    fn list_item(_kind: ListKind, _number: usize, text: &str, out: &mut String) {
        out.push_str("<li>");
        out.push_str(text);
        out.push_str("</li>");
    }

    fn list_end(kind: ListKind, out: &mut String) {
        out.push_str(list_tag(kind, true));
    }

    fn blockquote(paragraphs: &[String], out: &mut String) {
        out.push_str("<blockquote>");
        for text in paragraphs {
            out.push_str(text);
        }
        out.push_str("</blockquote>");
    }
}

fn list_tag(kind: ListKind, close: bool) -> &'static str {
    match (kind, close) {
        (ListKind::Bullet, false) => "<ul>",
        (ListKind::Bullet, true) => "</ul>",
        (ListKind::Ordered, false) => "<ol>",
        (ListKind::Ordered, true) => "</ol>",
    }
}
