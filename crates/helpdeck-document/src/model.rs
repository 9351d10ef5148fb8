//! Typed block document model.

/// Root of a block document (the `doc` node).
///
/// Blocks are kept in source order. A document is built once, either by the
/// [`Converter`](crate::Converter) or by decoding stored JSON, and is not
/// mutated by rendering.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Document {
    /// Top-level blocks in document order.
    pub blocks: Vec<Block>,
}

impl Document {
    /// Create a document from its top-level blocks.
    #[must_use]
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Returns `true` if the document has no blocks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

/// Plain-text span inside a block. No inline formatting is modelled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Concatenate the text of a run sequence.
#[must_use]
pub fn inline_text(runs: &[TextRun]) -> String {
    runs.iter().map(|run| run.text.as_str()).collect()
}

/// Heading level, always within `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HeadingLevel(u8);

impl HeadingLevel {
    /// Smallest heading level (`<h1>`).
    pub const MIN: u8 = 1;
    /// Largest heading level (`<h6>`).
    pub const MAX: u8 = 6;

    /// Create a heading level, returning `None` outside `1..=6`.
    #[must_use]
    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&level).then_some(Self(level))
    }

    /// Create a heading level, clamping any integer into `1..=6`.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn clamped(level: i64) -> Self {
        Self(level.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u8)
    }

    #[must_use]
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for HeadingLevel {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Kind of list block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListKind {
    /// Unordered list (`bulletList`).
    Bullet,
    /// Numbered list (`orderedList`).
    Ordered,
}

/// Single list entry holding one paragraph's worth of inline text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListItem {
    pub content: Vec<TextRun>,
}

impl ListItem {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextRun::new(text)],
        }
    }

    /// Concatenated item text.
    #[must_use]
    pub fn text(&self) -> String {
        inline_text(&self.content)
    }
}

/// Top-level block node.
///
/// `Unknown` records the kind name of a block this model does not understand;
/// its content is not retained and renderers emit nothing for it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Paragraph {
        content: Vec<TextRun>,
    },
    Heading {
        level: HeadingLevel,
        content: Vec<TextRun>,
    },
    BulletList {
        items: Vec<ListItem>,
    },
    OrderedList {
        items: Vec<ListItem>,
    },
    /// Quoted paragraphs, each a run sequence.
    Blockquote {
        paragraphs: Vec<Vec<TextRun>>,
    },
    Unknown {
        kind: String,
    },
}

impl Block {
    /// Paragraph with a single text run.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::Paragraph {
            content: vec![TextRun::new(text)],
        }
    }

    /// Paragraph with no runs (a blank line in the source text).
    #[must_use]
    pub fn empty_paragraph() -> Self {
        Self::Paragraph {
            content: Vec::new(),
        }
    }

    pub fn heading(level: HeadingLevel, text: impl Into<String>) -> Self {
        Self::Heading {
            level,
            content: vec![TextRun::new(text)],
        }
    }

    pub fn blockquote(text: impl Into<String>) -> Self {
        Self::Blockquote {
            paragraphs: vec![vec![TextRun::new(text)]],
        }
    }

    /// List block of the given kind.
    #[must_use]
    pub fn list(kind: ListKind, items: Vec<ListItem>) -> Self {
        match kind {
            ListKind::Bullet => Self::BulletList { items },
            ListKind::Ordered => Self::OrderedList { items },
        }
    }

    /// Wire name of this block's kind (`"paragraph"`, `"bulletList"`, ...).
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading { .. } => "heading",
            Self::BulletList { .. } => "bulletList",
            Self::OrderedList { .. } => "orderedList",
            Self::Blockquote { .. } => "blockquote",
            Self::Unknown { kind } => kind,
        }
    }

    /// List kind and items, if this block is a list.
    #[must_use]
    pub fn as_list(&self) -> Option<(ListKind, &[ListItem])> {
        match self {
            Self::BulletList { items } => Some((ListKind::Bullet, items)),
            Self::OrderedList { items } => Some((ListKind::Ordered, items)),
            _ => None,
        }
    }

    /// Mutable items of a list block of the given kind.
    pub(crate) fn list_items_mut(&mut self, kind: ListKind) -> Option<&mut Vec<ListItem>> {
        match (self, kind) {
            (Self::BulletList { items }, ListKind::Bullet)
            | (Self::OrderedList { items }, ListKind::Ordered) => Some(items),
            _ => None,
        }
    }
}
