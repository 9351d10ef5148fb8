//! Rich-text editor JSON wire format.
//!
//! Stored documents use the editor's node shape:
//!
//! ```json
//! {"type": "doc", "content": [
//!   {"type": "heading", "attrs": {"level": 2}, "content": [{"type": "text", "text": "Install"}]},
//!   {"type": "bulletList", "content": [
//!     {"type": "listItem", "content": [
//!       {"type": "paragraph", "content": [{"type": "text", "text": "Download"}]}
//!     ]}
//!   ]}
//! ]}
//! ```
//!
//! Decoding is strict only at the root. Below it every shape degrades to
//! something renderable: missing or ill-typed `content` reads as empty, runs
//! without a string `text` contribute nothing, bad heading levels fall back to 1
//! (or clamp into `1..=6`), nodes without a non-empty string `type` are
//! dropped, and other unrecognised kinds become [`Block::Unknown`].

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{Block, Document, HeadingLevel, ListItem, TextRun};

const DOC: &str = "doc";
const TEXT: &str = "text";
const PARAGRAPH: &str = "paragraph";
const HEADING: &str = "heading";
const BULLET_LIST: &str = "bulletList";
const ORDERED_LIST: &str = "orderedList";
const LIST_ITEM: &str = "listItem";
const BLOCKQUOTE: &str = "blockquote";

/// Node as written to storage.
#[derive(Serialize)]
struct WireNode<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    attrs: Option<WireAttrs>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<Vec<WireNode<'a>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<&'a str>,
}

#[derive(Serialize)]
struct WireAttrs {
    level: u8,
}

impl<'a> WireNode<'a> {
    fn new(kind: &'a str) -> Self {
        Self {
            kind,
            attrs: None,
            content: None,
            text: None,
        }
    }

    fn with_content(mut self, content: Vec<WireNode<'a>>) -> Self {
        self.content = Some(content);
        self
    }

    fn text(run: &'a TextRun) -> Self {
        Self {
            text: Some(&run.text),
            ..Self::new(TEXT)
        }
    }

    fn paragraph(runs: &'a [TextRun]) -> Self {
        Self::new(PARAGRAPH).with_content(runs.iter().map(Self::text).collect())
    }

    fn list(kind: &'a str, items: &'a [ListItem]) -> Self {
        let items = items
            .iter()
            .map(|item| Self::new(LIST_ITEM).with_content(vec![Self::paragraph(&item.content)]))
            .collect();
        Self::new(kind).with_content(items)
    }

    fn block(block: &'a Block) -> Self {
        match block {
            Block::Paragraph { content } => Self::paragraph(content),
            Block::Heading { level, content } => Self {
                attrs: Some(WireAttrs { level: level.get() }),
                ..Self::new(HEADING).with_content(content.iter().map(Self::text).collect())
            },
            Block::BulletList { items } => Self::list(BULLET_LIST, items),
            Block::OrderedList { items } => Self::list(ORDERED_LIST, items),
            Block::Blockquote { paragraphs } => Self::new(BLOCKQUOTE)
                .with_content(paragraphs.iter().map(|runs| Self::paragraph(runs)).collect()),
            Block::Unknown { kind } => Self::new(kind),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        WireNode::new(DOC)
            .with_content(
                self.blocks
                    .iter()
                    .filter(|block| !block.kind().is_empty())
                    .map(WireNode::block)
                    .collect(),
            )
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json_value(&value)
            .ok_or_else(|| de::Error::custom("expected an object with \"type\": \"doc\""))
    }
}

impl Document {
    /// Decode a stored document leniently.
    ///
    /// Returns `None` only when `value` is not an object whose `type` is
    /// `"doc"`. Everything below the root is decoded best-effort.
    #[must_use]
    pub fn from_json_value(value: &Value) -> Option<Self> {
        if value.get("type").and_then(Value::as_str) != Some(DOC) {
            return None;
        }
        Some(Self::new(children(value).iter().filter_map(decode_block).collect()))
    }

    /// Encode as a JSON value in the wire shape.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        // Serializing plain strings and integers into a `Value` cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

fn children(node: &Value) -> &[Value] {
    node.get("content")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn decode_block(node: &Value) -> Option<Block> {
    let kind = node
        .get("type")
        .and_then(Value::as_str)
        .filter(|kind| !kind.is_empty())?;
    let block = match kind {
        PARAGRAPH => Block::Paragraph {
            content: runs(node),
        },
        HEADING => Block::Heading {
            level: heading_level(node),
            content: runs(node),
        },
        BULLET_LIST => Block::BulletList {
            items: list_items(node),
        },
        ORDERED_LIST => Block::OrderedList {
            items: list_items(node),
        },
        BLOCKQUOTE => Block::Blockquote {
            paragraphs: quote_paragraphs(node),
        },
        other => Block::Unknown {
            kind: other.to_owned(),
        },
    };
    Some(block)
}

/// Text runs held directly by `node`.
fn runs(node: &Value) -> Vec<TextRun> {
    children(node)
        .iter()
        .filter_map(|child| child.get("text").and_then(Value::as_str))
        .map(TextRun::new)
        .collect()
}

/// Text runs of `node`, flattening any paragraph children into one sequence.
fn nested_runs(node: &Value) -> Vec<TextRun> {
    children(node)
        .iter()
        .flat_map(|child| match child.get("text").and_then(Value::as_str) {
            Some(text) => vec![TextRun::new(text)],
            None => runs(child),
        })
        .collect()
}

/// Paragraphs of a blockquote. Adjacent direct text runs form one paragraph.
fn quote_paragraphs(node: &Value) -> Vec<Vec<TextRun>> {
    let mut paragraphs: Vec<Vec<TextRun>> = Vec::new();
    let mut loose_open = false;
    for child in children(node) {
        if let Some(text) = child.get("text").and_then(Value::as_str) {
            if loose_open && let Some(last) = paragraphs.last_mut() {
                last.push(TextRun::new(text));
            } else {
                paragraphs.push(vec![TextRun::new(text)]);
            }
            loose_open = true;
        } else {
            paragraphs.push(runs(child));
            loose_open = false;
        }
    }
    paragraphs
}

fn list_items(node: &Value) -> Vec<ListItem> {
    children(node)
        .iter()
        .map(|item| ListItem {
            content: nested_runs(item),
        })
        .collect()
}

fn heading_level(node: &Value) -> HeadingLevel {
    node.get("attrs")
        .and_then(|attrs| attrs.get("level"))
        .and_then(integral)
        .filter(|level| *level != 0)
        .map_or_else(HeadingLevel::default, HeadingLevel::clamped)
}

/// Integer value of a JSON number, accepting floats with no fractional part.
#[allow(clippy::cast_possible_truncation)]
fn integral(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|level| level.is_finite() && level.fract() == 0.0)
            .map(|level| level as i64)
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::ListKind;

    fn sample() -> Document {
        Document::new(vec![
            Block::heading(HeadingLevel::new(2).unwrap(), "Installation"),
            Block::empty_paragraph(),
            Block::list(
                ListKind::Bullet,
                vec![ListItem::new("Download"), ListItem::new("Run")],
            ),
            Block::blockquote("Be careful"),
        ])
    }

    #[test]
    fn test_serialize_wire_shape() {
        let value = sample().to_json_value();
        assert_eq!(
            value,
            json!({
                "type": "doc",
                "content": [
                    {
                        "type": "heading",
                        "attrs": {"level": 2},
                        "content": [{"type": "text", "text": "Installation"}]
                    },
                    {"type": "paragraph", "content": []},
                    {
                        "type": "bulletList",
                        "content": [
                            {"type": "listItem", "content": [
                                {"type": "paragraph", "content": [{"type": "text", "text": "Download"}]}
                            ]},
                            {"type": "listItem", "content": [
                                {"type": "paragraph", "content": [{"type": "text", "text": "Run"}]}
                            ]}
                        ]
                    },
                    {
                        "type": "blockquote",
                        "content": [
                            {"type": "paragraph", "content": [{"type": "text", "text": "Be careful"}]}
                        ]
                    }
                ]
            })
        );
    }

    #[test]
    fn test_stored_document_reads_back_unchanged() {
        let doc = sample();
        let stored = serde_json::to_string(&doc).unwrap();
        let loaded: Document = serde_json::from_str(&stored).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_deserialize_rejects_non_doc_root() {
        let result: Result<Document, _> = serde_json::from_str(r#"{"type": "paragraph"}"#);
        assert!(result.is_err());
        assert!(Document::from_json_value(&json!("doc")).is_none());
        assert!(Document::from_json_value(&json!([1, 2])).is_none());
    }

    #[test]
    fn test_missing_content_is_empty() {
        let doc = Document::from_json_value(&json!({"type": "doc"})).unwrap();
        assert!(doc.is_empty());

        let doc = Document::from_json_value(&json!({
            "type": "doc",
            "content": [{"type": "paragraph", "content": "not an array"}]
        }))
        .unwrap();
        assert_eq!(doc.blocks, vec![Block::empty_paragraph()]);
    }

    #[test]
    fn test_non_string_text_is_dropped() {
        let doc = Document::from_json_value(&json!({
            "type": "doc",
            "content": [{"type": "paragraph", "content": [
                {"type": "text", "text": "a"},
                {"type": "text", "text": 5},
                {"type": "text"},
                {"type": "text", "text": "b"}
            ]}]
        }))
        .unwrap();
        assert_eq!(
            doc.blocks,
            vec![Block::Paragraph {
                content: vec![TextRun::new("a"), TextRun::new("b")]
            }]
        );
    }

    #[test]
    fn test_heading_level_fallbacks() {
        let level_of = |attrs: Value| {
            let doc = Document::from_json_value(&json!({
                "type": "doc",
                "content": [{"type": "heading", "attrs": attrs, "content": []}]
            }))
            .unwrap();
            match &doc.blocks[0] {
                Block::Heading { level, .. } => level.get(),
                other => panic!("expected heading, got {other:?}"),
            }
        };
        assert_eq!(level_of(json!({"level": 3})), 3);
        assert_eq!(level_of(json!({})), 1);
        assert_eq!(level_of(json!({"level": "two"})), 1);
        assert_eq!(level_of(json!({"level": 0})), 1);
        assert_eq!(level_of(json!({"level": 9})), 6);
        assert_eq!(level_of(json!(null)), 1);
    }

    #[test]
    fn test_heading_level_accepts_integral_floats() {
        let doc = Document::from_json_value(&json!({
            "type": "doc",
            "content": [
                {"type": "heading", "attrs": {"level": 2.0}, "content": []},
                {"type": "heading", "attrs": {"level": 2.5}, "content": []}
            ]
        }))
        .unwrap();
        let levels: Vec<u8> = doc
            .blocks
            .iter()
            .map(|block| match block {
                Block::Heading { level, .. } => level.get(),
                other => panic!("expected heading, got {other:?}"),
            })
            .collect();
        assert_eq!(levels, vec![2, 1]);
    }

    #[test]
    fn test_list_items_flatten_paragraphs() {
        let doc = Document::from_json_value(&json!({
            "type": "doc",
            "content": [{"type": "orderedList", "content": [
                {"type": "listItem", "content": [
                    {"type": "paragraph", "content": [{"type": "text", "text": "one"}]},
                    {"type": "paragraph", "content": [{"type": "text", "text": " more"}]}
                ]},
                "garbage",
                {"type": "listItem"}
            ]}]
        }))
        .unwrap();
        let (kind, items) = doc.blocks[0].as_list().unwrap();
        assert_eq!(kind, ListKind::Ordered);
        let texts: Vec<String> = items.iter().map(ListItem::text).collect();
        assert_eq!(texts, vec!["one more", "", ""]);
    }

    #[test]
    fn test_blockquote_accepts_direct_runs() {
        let doc = Document::from_json_value(&json!({
            "type": "doc",
            "content": [{"type": "blockquote", "content": [{"type": "text", "text": "quoted"}]}]
        }))
        .unwrap();
        assert_eq!(doc.blocks, vec![Block::blockquote("quoted")]);
    }

    #[test]
    fn test_blockquote_keeps_paragraph_boundaries() {
        let stored = json!({
            "type": "doc",
            "content": [{"type": "blockquote", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "p1"}]},
                {"type": "paragraph", "content": [{"type": "text", "text": "p2"}]}
            ]}]
        });
        let doc = Document::from_json_value(&stored).unwrap();
        assert_eq!(
            doc.blocks,
            vec![Block::Blockquote {
                paragraphs: vec![vec![TextRun::new("p1")], vec![TextRun::new("p2")]]
            }]
        );
        assert_eq!(doc.to_json_value(), stored);
    }

    #[test]
    fn test_unknown_kinds_are_kept() {
        let doc = Document::from_json_value(&json!({
            "type": "doc",
            "content": [{"type": "codeBlock", "content": [{"type": "text", "text": "x"}]}]
        }))
        .unwrap();
        let kinds: Vec<&str> = doc.blocks.iter().map(Block::kind).collect();
        assert_eq!(kinds, vec!["codeBlock"]);
        assert_eq!(
            doc.to_json_value(),
            json!({"type": "doc", "content": [{"type": "codeBlock"}]})
        );
    }

    #[test]
    fn test_untyped_nodes_are_dropped() {
        let doc = Document::from_json_value(&json!({
            "type": "doc",
            "content": [{"content": []}, {"type": ""}, {"type": 3}, 17, {"type": "paragraph"}]
        }))
        .unwrap();
        assert_eq!(doc.blocks, vec![Block::empty_paragraph()]);
    }

    #[test]
    fn test_unnamed_unknown_block_is_not_serialized() {
        let doc = Document::new(vec![
            Block::Unknown {
                kind: String::new(),
            },
            Block::paragraph("kept"),
        ]);
        assert_eq!(
            doc.to_json_value(),
            json!({"type": "doc", "content": [
                {"type": "paragraph", "content": [{"type": "text", "text": "kept"}]}
            ]})
        );
    }
}
