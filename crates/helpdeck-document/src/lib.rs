//! Block document model for HelpDeck articles and change logs.
//!
//! Content is stored as a tree rooted at a `doc` node holding an ordered
//! sequence of blocks (paragraphs, headings, lists, blockquotes). This crate
//! provides:
//!
//! - [`Document`] and [`Block`]: the typed document model
//! - the rich-text editor JSON wire format ([`Document`] implements serde's
//!   `Serialize`/`Deserialize`, plus [`Document::from_json_value`] for lenient reads)
//! - [`Converter`]: line-oriented conversion of plain text / markdown into a document
//! - [`slugify`]: article slug generation from titles
//!
//! # Example
//!
//! ```
//! use helpdeck_document::{Block, convert};
//!
//! let doc = convert("# Install\n- download\n- run");
//! assert_eq!(doc.blocks.len(), 2);
//! assert!(matches!(doc.blocks[1], Block::BulletList { .. }));
//! ```

mod convert;
mod model;
mod slug;
mod wire;

pub use convert::{Converter, DEFAULT_INDENT_WIDTH, Line, ListState, classify, convert};
pub use model::{Block, Document, HeadingLevel, ListItem, ListKind, TextRun, inline_text};
pub use slug::slugify;
