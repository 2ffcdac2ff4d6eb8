//! Block/span model for CMS-authored rich text
//!
//! Bodies arrive as loosely-typed JSON. Everything here is parsed with
//! `Option` lookups and explicit defaults, so any shape produces a value:
//! a malformed item becomes an embed without fallback text, a malformed
//! span is dropped, an unusable mark definition is left out.

use serde_json::{Map, Value};
use std::collections::HashMap;

/// Semantic style hint of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockStyle {
    Normal,
    Heading(u8),
    Blockquote,
}

impl BlockStyle {
    /// Parse a style name; anything unknown is `Normal`
    pub fn parse(style: Option<&str>) -> Self {
        let Some(style) = style else {
            return BlockStyle::Normal;
        };

        let level = style
            .strip_prefix("heading-")
            .or_else(|| style.strip_prefix('h'))
            .and_then(|n| n.parse::<u8>().ok());

        match (style, level) {
            (_, Some(n @ 1..=6)) => BlockStyle::Heading(n),
            ("blockquote", _) => BlockStyle::Blockquote,
            _ => BlockStyle::Normal,
        }
    }
}

/// List membership of a text block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Bullet,
    Number,
}

/// An inline run of text
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    /// Mark keys in application order
    pub marks: Vec<String>,
}

impl Span {
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Span {
                text: text.clone(),
                marks: Vec::new(),
            }),
            Value::Object(obj) => {
                let text = obj
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                let marks = obj
                    .get("marks")
                    .and_then(Value::as_array)
                    .map(|marks| {
                        marks
                            .iter()
                            .filter_map(Value::as_str)
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default();
                Some(Span { text, marks })
            }
            _ => None,
        }
    }
}

/// Block-scoped annotation referenced by a custom mark key
#[derive(Debug, Clone, PartialEq)]
pub enum MarkDef {
    /// Link with an explicit target
    ExternalLink { href: String },
    /// Link to another content document, by slug
    InternalLink { slug: String },
}

impl MarkDef {
    fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;

        if let Some(href) = non_empty_str(obj.get("href")) {
            return Some(MarkDef::ExternalLink {
                href: href.to_string(),
            });
        }

        obj.get("reference")
            .and_then(Value::as_object)
            .and_then(|reference| slug_of(reference.get("slug")))
            .or_else(|| slug_of(obj.get("slug")))
            .map(|slug| MarkDef::InternalLink {
                slug: slug.to_string(),
            })
    }
}

/// One paragraph-like unit of rich text
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub style: BlockStyle,
    pub list: Option<ListKind>,
    pub children: Vec<Span>,
    pub mark_defs: HashMap<String, MarkDef>,
}

impl Block {
    /// Look up a custom mark key in this block's definitions
    pub fn mark_def(&self, key: &str) -> Option<&MarkDef> {
        self.mark_defs.get(key)
    }
}

/// A top-level body item
#[derive(Debug, Clone, PartialEq)]
pub enum BodyItem {
    Text(Block),
    /// Anything that is not a text block (images, unknown embeds)
    Embed { fallback: Option<String> },
}

impl BodyItem {
    /// Classify a raw body item; never fails
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return BodyItem::Embed { fallback: None };
        };

        match obj.get("children").and_then(Value::as_array) {
            Some(children) => BodyItem::Text(parse_block(obj, children)),
            None => BodyItem::Embed {
                fallback: non_empty_str(obj.get("alt"))
                    .or_else(|| non_empty_str(obj.get("caption")))
                    .map(str::to_string),
            },
        }
    }
}

/// Parse a body value; anything but an array is an empty body
pub fn parse_body(value: &Value) -> Vec<BodyItem> {
    value
        .as_array()
        .map(|items| items.iter().map(BodyItem::from_value).collect())
        .unwrap_or_default()
}

fn parse_block(obj: &Map<String, Value>, children: &[Value]) -> Block {
    let style = BlockStyle::parse(obj.get("style").and_then(Value::as_str));
    let list = match obj.get("listItem").and_then(Value::as_str) {
        Some("bullet") => Some(ListKind::Bullet),
        Some("number") => Some(ListKind::Number),
        _ => None,
    };
    let children = children.iter().filter_map(Span::from_value).collect();
    let defs = obj.get("markDefs").or_else(|| obj.get("markDefinitions"));

    Block {
        style,
        list,
        children,
        mark_defs: parse_mark_defs(defs),
    }
}

/// Mark definitions come either as `[{_key, ...}]` or as `{key: {...}}`
fn parse_mark_defs(value: Option<&Value>) -> HashMap<String, MarkDef> {
    match value {
        Some(Value::Array(defs)) => defs
            .iter()
            .filter_map(|def| {
                let key = non_empty_str(def.get("_key"))?;
                Some((key.to_string(), MarkDef::from_value(def)?))
            })
            .collect(),
        Some(Value::Object(defs)) => defs
            .iter()
            .filter_map(|(key, def)| Some((key.clone(), MarkDef::from_value(def)?)))
            .collect(),
        _ => HashMap::new(),
    }
}

/// A slug is either a bare string or `{current: "..."}`
fn slug_of(value: Option<&Value>) -> Option<&str> {
    match value? {
        Value::String(_) => non_empty_str(value),
        Value::Object(slug) => non_empty_str(slug.get("current")),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_style_parse() {
        assert_eq!(BlockStyle::parse(None), BlockStyle::Normal);
        assert_eq!(BlockStyle::parse(Some("normal")), BlockStyle::Normal);
        assert_eq!(BlockStyle::parse(Some("h2")), BlockStyle::Heading(2));
        assert_eq!(BlockStyle::parse(Some("heading-3")), BlockStyle::Heading(3));
        assert_eq!(BlockStyle::parse(Some("h9")), BlockStyle::Normal);
        assert_eq!(BlockStyle::parse(Some("hero")), BlockStyle::Normal);
        assert_eq!(BlockStyle::parse(Some("blockquote")), BlockStyle::Blockquote);
    }

    #[test]
    fn test_parse_body_non_array() {
        assert!(parse_body(&Value::Null).is_empty());
        assert!(parse_body(&json!(42)).is_empty());
        assert!(parse_body(&json!("text")).is_empty());
        assert!(parse_body(&json!({"children": []})).is_empty());
    }

    #[test]
    fn test_mark_defs_array_and_map() {
        let block = json!({
            "_type": "block",
            "children": [{"text": "x", "marks": ["a", 7, "b"]}],
            "markDefs": [
                {"_key": "a", "_type": "link", "href": "https://example.com"},
                {"_key": "b", "_type": "internalLink", "reference": {"slug": {"current": "post-1"}}},
                {"_key": "c", "_type": "link"},
                {"_type": "link", "href": "https://nokey.example"}
            ]
        });
        let BodyItem::Text(block) = BodyItem::from_value(&block) else {
            panic!("expected a text block");
        };
        assert_eq!(block.children[0].marks, vec!["a", "b"]);
        assert_eq!(block.mark_defs.len(), 2);
        assert_eq!(
            block.mark_def("b"),
            Some(&MarkDef::InternalLink {
                slug: "post-1".to_string()
            })
        );

        let block = json!({
            "children": [],
            "markDefinitions": {"k": {"href": "/internal"}}
        });
        let BodyItem::Text(block) = BodyItem::from_value(&block) else {
            panic!("expected a text block");
        };
        assert_eq!(
            block.mark_def("k"),
            Some(&MarkDef::ExternalLink {
                href: "/internal".to_string()
            })
        );
    }

    #[test]
    fn test_embed_fallback() {
        let item = BodyItem::from_value(&json!({"_type": "image", "caption": "A cat", "alt": ""}));
        assert_eq!(
            item,
            BodyItem::Embed {
                fallback: Some("A cat".to_string())
            }
        );

        let item = BodyItem::from_value(&json!({"_type": "image", "children": "nope"}));
        assert_eq!(item, BodyItem::Embed { fallback: None });
    }
}
