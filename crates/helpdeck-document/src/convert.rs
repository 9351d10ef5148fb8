//! Plain-text / markdown to block document conversion.
//!
//! Conversion is line oriented. Each line is classified independently
//! ([`classify`]), then folded into the document by [`Converter::step`], which
//! tracks the open list in a small [`ListState`] machine:
//!
//! - adjacent list lines of the same kind and nesting level share one list block
//! - a change of kind or level, or any non-list line, closes the open list
//! - blank lines become empty paragraphs
//!
//! Conversion is total: unrecognised lines fall through to plain paragraphs.

use std::sync::LazyLock;

use regex::Regex;

use crate::model::{Block, Document, HeadingLevel, ListItem, ListKind};

/// Leading whitespace characters per list nesting level.
pub const DEFAULT_INDENT_WIDTH: usize = 2;

// Line text never contains a line terminator: a trailing `\r` (CRLF input) or
// U+2028/U+2029 makes the line plain.
static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+([^\r\n\x{2028}\x{2029}]+)$").unwrap());
static BULLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[•*\-]\s+([^\r\n\x{2028}\x{2029}]+)$").unwrap());
static NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\s*)[0-9]+\.\s+([^\r\n\x{2028}\x{2029}]+)$").unwrap());
static QUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^>\s+([^\r\n\x{2028}\x{2029}]+)$").unwrap());

/// Classification of a single source line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Line<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// `#` to `######`, whitespace, text.
    Heading { level: HeadingLevel, text: &'a str },
    /// Optional indent, `•`/`*`/`-`, whitespace, text.
    Bullet { level: usize, text: &'a str },
    /// Optional indent, digits, `.`, whitespace, text.
    Numbered { level: usize, text: &'a str },
    /// `>`, whitespace, text.
    Quote { text: &'a str },
    /// Anything else; carries the whole line.
    Plain { text: &'a str },
}

/// Classify one line. Patterns are tried in a fixed order: heading, bullet,
/// numbered, quote, then plain.
///
/// List nesting level is the count of leading whitespace characters divided
/// by `indent_width` (rounded down). Tabs count as one character.
#[must_use]
pub fn classify(line: &str, indent_width: usize) -> Line<'_> {
    if line.trim().is_empty() {
        return Line::Blank;
    }

    if let Some(caps) = HEADING.captures(line) {
        let hashes = caps.get(1).map_or(0, |m| m.as_str().len());
        if let (Some(level), Some(text)) = (heading_level(hashes), caps.get(2)) {
            return Line::Heading {
                level,
                text: text.as_str(),
            };
        }
    }

    if let Some((level, text)) = list_marker(&BULLET, line, indent_width) {
        return Line::Bullet { level, text };
    }

    if let Some((level, text)) = list_marker(&NUMBERED, line, indent_width) {
        return Line::Numbered { level, text };
    }

    if let Some(text) = QUOTE.captures(line).and_then(|caps| caps.get(1)) {
        return Line::Quote {
            text: text.as_str(),
        };
    }

    Line::Plain { text: line }
}

fn heading_level(hashes: usize) -> Option<HeadingLevel> {
    u8::try_from(hashes).ok().and_then(HeadingLevel::new)
}

fn list_marker<'a>(
    pattern: &Regex,
    line: &'a str,
    indent_width: usize,
) -> Option<(usize, &'a str)> {
    let caps = pattern.captures(line)?;
    let indent = caps.get(1).map_or(0, |m| m.as_str().chars().count());
    let text = caps.get(2)?.as_str();
    Some((indent / indent_width.max(1), text))
}

/// Open-list tracking between lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListState {
    #[default]
    NoList,
    InBulletList(usize),
    InOrderedList(usize),
}

impl ListState {
    fn for_list(kind: ListKind, level: usize) -> Self {
        match kind {
            ListKind::Bullet => Self::InBulletList(level),
            ListKind::Ordered => Self::InOrderedList(level),
        }
    }
}

/// Line-oriented plain-text to document converter.
///
/// # Example
///
/// ```
/// use helpdeck_document::Converter;
///
/// let doc = Converter::new().convert("- a\n- b\n1. c");
/// assert_eq!(doc.blocks.len(), 2);
/// assert_eq!(doc.blocks[0].kind(), "bulletList");
/// assert_eq!(doc.blocks[1].kind(), "orderedList");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Converter {
    indent_width: usize,
}

impl Converter {
    /// Create a converter with the default indent width of two characters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }

    /// Set how many leading whitespace characters make one nesting level.
    ///
    /// Zero is treated as one.
    #[must_use]
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width.max(1);
        self
    }

    /// Convert `input` into a document.
    ///
    /// Lines are split on `\n` only. An empty input is a single blank line and
    /// yields one empty paragraph.
    #[must_use]
    pub fn convert(&self, input: &str) -> Document {
        let mut lines = 0usize;
        let (blocks, _) = input
            .split('\n')
            .inspect(|_| lines += 1)
            .fold((Vec::new(), ListState::NoList), |(blocks, state), line| {
                self.step(blocks, state, line)
            });

        tracing::debug!(lines, blocks = blocks.len(), "Converted plain text to document");
        Document::new(blocks)
    }

    /// Fold one line into the blocks built so far.
    ///
    /// Returns the updated blocks and the list state for the next line.
    #[must_use]
    pub fn step(
        &self,
        mut blocks: Vec<Block>,
        state: ListState,
        line: &str,
    ) -> (Vec<Block>, ListState) {
        let next = match classify(line, self.indent_width) {
            Line::Blank => {
                blocks.push(Block::empty_paragraph());
                ListState::NoList
            }
            Line::Heading { level, text } => {
                blocks.push(Block::heading(level, text));
                ListState::NoList
            }
            Line::Bullet { level, text } => {
                push_item(&mut blocks, state, ListKind::Bullet, level, text)
            }
            Line::Numbered { level, text } => {
                push_item(&mut blocks, state, ListKind::Ordered, level, text)
            }
            Line::Quote { text } => {
                blocks.push(Block::blockquote(text));
                ListState::NoList
            }
            Line::Plain { text } => {
                blocks.push(Block::paragraph(text));
                ListState::NoList
            }
        };
        (blocks, next)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Append a list item, continuing the open list when kind and level match.
fn push_item(
    blocks: &mut Vec<Block>,
    state: ListState,
    kind: ListKind,
    level: usize,
    text: &str,
) -> ListState {
    let next = ListState::for_list(kind, level);
    let item = ListItem::new(text);

    if state == next
        && let Some(items) = blocks.last_mut().and_then(|block| block.list_items_mut(kind))
    {
        items.push(item);
    } else {
        blocks.push(Block::list(kind, vec![item]));
    }
    next
}

/// Convert `input` with default settings.
#[must_use]
pub fn convert(input: &str) -> Document {
    Converter::new().convert(input)
}
