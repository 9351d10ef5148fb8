//! Trait-based block document renderer with pluggable backends.
//!
//! This crate provides a generic [`BlockRenderer`] that walks a
//! [`Document`](helpdeck_document::Document) and produces a string through the
//! [`RenderBackend`] trait.
//!
//! # Backends
//!
//! - [`HtmlBackend`]: HTML fragment for article and change-log detail views
//! - [`PreviewBackend`]: condensed plain text with bullets for list cards
//!
//! The renderer owns the block walk (order, list numbering, text escaping);
//! backends only decide how each block is written.
//!
//! # Stored content
//!
//! Content comes out of storage either as a serialized JSON document or as a
//! legacy plain-text string. [`BlockRenderer::render_content`] accepts both:
//! JSON is decoded leniently, text that is not JSON is returned unchanged.
//! Rendering never fails.
//!
//! # Example
//!
//! ```
//! use helpdeck_renderer::{BlockRenderer, HtmlBackend, PreviewBackend};
//!
//! let stored = r#"{"type":"doc","content":[
//!     {"type":"heading","attrs":{"level":1},"content":[{"type":"text","text":"X"}]},
//!     {"type":"paragraph","content":[{"type":"text","text":"Y"}]}
//! ]}"#;
//!
//! let html = BlockRenderer::<HtmlBackend>::new().render_content(stored);
//! assert_eq!(html, "<h1>X</h1><p>Y</p>");
//!
//! let preview = BlockRenderer::<PreviewBackend>::new().render_content(stored);
//! assert_eq!(preview, "X\nY");
//! ```

mod backend;
mod content;
mod html;
mod preview;
mod renderer;
mod util;

pub use backend::RenderBackend;
pub use content::Content;
pub use html::HtmlBackend;
pub use preview::PreviewBackend;
pub use renderer::{BlockRenderer, RenderMode, render_with_mode};
pub use util::escape_html;
