//! Generic block renderer with pluggable backend.

use std::borrow::Cow;
use std::marker::PhantomData;

use helpdeck_document::{Block, Document, ListItem, ListKind, TextRun, inline_text};
use serde_json::Value;

use crate::backend::RenderBackend;
use crate::content::Content;
use crate::html::HtmlBackend;
use crate::preview::PreviewBackend;
use crate::util::escape_html;

/// Output verbosity requested by the page layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RenderMode {
    /// Full HTML fragment ([`HtmlBackend`]).
    #[default]
    Html,
    /// Condensed plain text ([`PreviewBackend`]).
    Preview,
}

impl RenderMode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Preview => "preview",
        }
    }
}

/// Generic block document renderer.
///
/// Walks top-level blocks in order and delegates output to the backend `B`.
/// Unknown block kinds contribute nothing. Rendering is pure and never fails;
/// one renderer can be shared across threads.
pub struct BlockRenderer<B: RenderBackend> {
    escape_html: bool,
    _backend: PhantomData<B>,
}

impl<B: RenderBackend> BlockRenderer<B> {
    /// Create a renderer with HTML escaping of inline text enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            escape_html: true,
            _backend: PhantomData,
        }
    }

    /// Enable or disable HTML escaping of inline text.
    ///
    /// Only affects markup backends. With escaping disabled, text is
    /// interpolated into tags as stored, which is how legacy pages were
    /// rendered.
    #[must_use]
    pub fn with_html_escaping(mut self, enabled: bool) -> Self {
        self.escape_html = enabled;
        self
    }

    /// Render a typed document.
    #[must_use]
    pub fn render(&self, doc: &Document) -> String {
        let mut out = String::with_capacity(256);
        for (index, block) in doc.blocks.iter().enumerate() {
            if index > 0 {
                out.push_str(B::BLOCK_SEPARATOR);
            }
            self.render_block(block, &mut out);
        }
        B::finish(out)
    }

    /// Render stored content of any accepted shape.
    ///
    /// - empty strings render empty
    /// - strings are parsed as JSON first; strings that are not JSON are
    ///   legacy text and are returned unchanged
    /// - JSON that is not a `doc` object renders empty
    #[must_use]
    pub fn render_content<'a>(&self, content: impl Into<Content<'a>>) -> String {
        match content.into() {
            Content::Document(doc) => self.render(doc),
            Content::Raw(text) => self.render_raw(text),
            Content::Json(Value::String(text)) => self.render_raw(text),
            Content::Json(value) => self.render_value(value),
        }
    }

    fn render_raw(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        match serde_json::from_str::<Value>(text) {
            Ok(value) => self.render_value(&value),
            Err(_) => {
                tracing::debug!(len = text.len(), "Content is not JSON, passing through as text");
                text.to_owned()
            }
        }
    }

    fn render_value(&self, value: &Value) -> String {
        if let Some(doc) = Document::from_json_value(value) {
            self.render(&doc)
        } else {
            tracing::debug!("JSON content is not a document, rendering empty");
            String::new()
        }
    }

    fn render_block(&self, block: &Block, out: &mut String) {
        match block {
            Block::Paragraph { content } => B::paragraph(&self.text(content), out),
            Block::Heading { level, content } => B::heading(*level, &self.text(content), out),
            Block::BulletList { items } => self.render_list(ListKind::Bullet, items, out),
            Block::OrderedList { items } => self.render_list(ListKind::Ordered, items, out),
            Block::Blockquote { paragraphs } => {
                let paragraphs: Vec<String> =
                    paragraphs.iter().map(|runs| self.text(runs)).collect();
                B::blockquote(&paragraphs, out);
            }
            Block::Unknown { kind } => {
                tracing::debug!(kind = %kind, "Skipping unknown block kind");
            }
        }
    }

    fn render_list(&self, kind: ListKind, items: &[ListItem], out: &mut String) {
        B::list_start(kind, out);
        for (index, item) in items.iter().enumerate() {
            B::list_item(kind, index + 1, &self.text(&item.content), out);
        }
        B::list_end(kind, out);
    }

    fn text(&self, runs: &[TextRun]) -> String {
        let text = inline_text(runs);
        if B::MARKUP && self.escape_html {
            match escape_html(&text) {
                Cow::Borrowed(_) => text,
                Cow::Owned(escaped) => escaped,
            }
        } else {
            text
        }
    }
}

impl<B: RenderBackend> Default for BlockRenderer<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render stored content with the backend selected by `mode`.
#[must_use]
pub fn render_with_mode<'a>(
    mode: RenderMode,
    content: impl Into<Content<'a>>,
    escape_html: bool,
) -> String {
    match mode {
        RenderMode::Html => BlockRenderer::<HtmlBackend>::new()
            .with_html_escaping(escape_html)
            .render_content(content),
        RenderMode::Preview => BlockRenderer::<PreviewBackend>::new()
            .with_html_escaping(escape_html)
            .render_content(content),
    }
}
