//! Render backend trait.

use helpdeck_document::{HeadingLevel, ListKind};

/// Output format for [`BlockRenderer`](crate::BlockRenderer).
///
/// Every method receives inline text that the renderer has already
/// concatenated (and escaped, when the backend produces markup and escaping
/// is enabled) and appends to `out`.
pub trait RenderBackend {
    /// Written between consecutive top-level blocks.
    const BLOCK_SEPARATOR: &'static str;

    /// Whether output is markup, so inline text is subject to HTML escaping.
    const MARKUP: bool;

    fn paragraph(text: &str, out: &mut String);

    fn heading(level: HeadingLevel, text: &str, out: &mut String);

    fn list_start(kind: ListKind, out: &mut String);

    /// Render one list item. `number` is 1-based and restarts for every list block.
    fn list_item(kind: ListKind, number: usize, text: &str, out: &mut String);

    fn list_end(kind: ListKind, out: &mut String);

    /// Render a blockquote from the text of each quoted paragraph.
    fn blockquote(paragraphs: &[String], out: &mut String);

    /// Post-process the complete output.
    fn finish(out: String) -> String {
        out
    }
}
