//! Stored content as accepted by the renderer.

use helpdeck_document::Document;
use serde_json::Value;

/// Article or change-log content in any of the shapes storage hands out.
#[derive(Clone, Copy, Debug)]
pub enum Content<'a> {
    /// Stored string: a serialized JSON document or legacy plain text.
    Raw(&'a str),
    /// Already-parsed JSON.
    Json(&'a Value),
    /// Typed document.
    Document(&'a Document),
}

impl<'a> From<&'a str> for Content<'a> {
    fn from(text: &'a str) -> Self {
        Self::Raw(text)
    }
}

impl<'a> From<&'a String> for Content<'a> {
    fn from(text: &'a String) -> Self {
        Self::Raw(text)
    }
}

impl<'a> From<&'a Value> for Content<'a> {
    fn from(value: &'a Value) -> Self {
        Self::Json(value)
    }
}

impl<'a> From<&'a Document> for Content<'a> {
    fn from(doc: &'a Document) -> Self {
        Self::Document(doc)
    }
}
