//! Rich-text rendering for CMS document bodies
//!
//! A body is walked once, front to back. Every block becomes a run of
//! inline nodes; consecutive blocks are joined by a [`Node::Gap`] so the
//! whole body can sit inside a single inline container. Unknown shapes
//! render as plain text or not at all.

use serde_json::Value;

use super::portable::{parse_body, Block, BlockStyle, BodyItem, ListKind, MarkDef, Span};
use crate::helpers::{encode_segment, html_escape, is_external, link_attrs};

/// Plain-text form of a paragraph gap
pub const PLAIN_GAP: &str = "\n\u{200B}\n";

/// HTML form of a paragraph gap: line breaks around a zero-width space
const HTML_GAP: &str = concat!(
    r#"<br aria-hidden="true">"#,
    r#"<span class="rich-text-gap" aria-hidden="true">&#8203;</span>"#,
    r#"<br aria-hidden="true">"#
);

/// A presentational node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Text(String),
    Strong(Vec<Node>),
    Emphasis(Vec<Node>),
    Code(Vec<Node>),
    Link {
        href: String,
        /// Opens in a new browsing context without opener or referrer
        external: bool,
        children: Vec<Node>,
    },
    /// A non-normal block style wrapping a whole block
    Styled {
        style: BlockStyle,
        children: Vec<Node>,
    },
    /// Invisible paragraph separator between blocks
    Gap,
}

/// Renderer for block/span bodies
#[derive(Debug, Clone)]
pub struct RichTextRenderer {
    link_base: String,
}

impl RichTextRenderer {
    /// Create a renderer whose internal links hang off `/`
    pub fn new() -> Self {
        Self::with_link_base("/")
    }

    /// Create a renderer with a custom prefix for internal links
    pub fn with_link_base(link_base: &str) -> Self {
        let link_base = if link_base.ends_with('/') {
            link_base.to_string()
        } else {
            format!("{}/", link_base)
        };
        Self { link_base }
    }

    /// Render a body value into inline nodes
    pub fn render(&self, body: &Value) -> Vec<Node> {
        let mut nodes = Vec::new();
        let mut number = 0usize;

        for item in parse_body(body) {
            let rendered = match item {
                BodyItem::Text(block) => {
                    number = match block.list {
                        Some(ListKind::Number) => number + 1,
                        _ => 0,
                    };
                    self.render_block(&block, number)
                }
                BodyItem::Embed { fallback } => {
                    number = 0;
                    fallback.map(Node::Text).into_iter().collect()
                }
            };

            if rendered.is_empty() {
                continue;
            }
            if !nodes.is_empty() {
                nodes.push(Node::Gap);
            }
            nodes.extend(rendered);
        }

        nodes
    }

    /// Render a body value straight to HTML
    pub fn render_html(&self, body: &Value) -> String {
        to_html(&self.render(body))
    }

    fn render_block(&self, block: &Block, number: usize) -> Vec<Node> {
        if block.children.iter().all(|span| span.text.is_empty()) {
            return Vec::new();
        }

        let mut children: Vec<Node> = block
            .children
            .iter()
            .map(|span| self.render_span(block, span))
            .collect();

        match block.list {
            Some(ListKind::Bullet) => children.insert(0, Node::Text("• ".to_string())),
            Some(ListKind::Number) => children.insert(0, Node::Text(format!("{}. ", number))),
            None => {}
        }

        match block.style {
            BlockStyle::Normal => children,
            style => vec![Node::Styled { style, children }],
        }
    }

    /// Apply marks in list order; each one wraps the previous result
    fn render_span(&self, block: &Block, span: &Span) -> Node {
        span.marks
            .iter()
            .fold(Node::Text(span.text.clone()), |node, mark| {
                self.apply_mark(block, mark, node)
            })
    }

    fn apply_mark(&self, block: &Block, mark: &str, node: Node) -> Node {
        match mark {
            "strong" | "bold" => Node::Strong(vec![node]),
            "em" | "italic" => Node::Emphasis(vec![node]),
            "code" => Node::Code(vec![node]),
            key => match block.mark_def(key) {
                Some(MarkDef::ExternalLink { href }) => Node::Link {
                    external: is_external(href),
                    href: href.clone(),
                    children: vec![node],
                },
                Some(MarkDef::InternalLink { slug }) => Node::Link {
                    href: format!("{}{}", self.link_base, encode_segment(slug)),
                    external: false,
                    children: vec![node],
                },
                None => node,
            },
        }
    }
}

impl Default for RichTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Serialize nodes to HTML; all text is escaped
pub fn to_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_html(&mut out, node);
    }
    out
}

fn push_html(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&html_escape(text)),
        Node::Strong(children) => wrap(out, "<strong>", children, "</strong>"),
        Node::Emphasis(children) => wrap(out, "<em>", children, "</em>"),
        Node::Code(children) => wrap(out, "<code>", children, "</code>"),
        Node::Link {
            href,
            external,
            children,
        } => {
            let attrs = if *external {
                link_attrs(href)
            } else {
                format!(r#"href="{}""#, html_escape(href))
            };
            wrap(out, &format!("<a {}>", attrs), children, "</a>");
        }
        Node::Styled { style, children } => {
            let open = match style {
                BlockStyle::Heading(level) => format!(
                    r#"<span class="rich-text-h{0}" role="heading" aria-level="{0}">"#,
                    level
                ),
                BlockStyle::Blockquote => r#"<span class="rich-text-quote">"#.to_string(),
                BlockStyle::Normal => "<span>".to_string(),
            };
            wrap(out, &open, children, "</span>");
        }
        Node::Gap => out.push_str(HTML_GAP),
    }
}

fn wrap(out: &mut String, open: &str, children: &[Node], close: &str) {
    out.push_str(open);
    for child in children {
        push_html(out, child);
    }
    out.push_str(close);
}

/// Flatten nodes to text, dropping decoration
pub fn to_plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        push_text(&mut out, node);
    }
    out
}

fn push_text(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Strong(children)
        | Node::Emphasis(children)
        | Node::Code(children)
        | Node::Link { children, .. }
        | Node::Styled { children, .. } => {
            for child in children {
                push_text(out, child);
            }
        }
        Node::Gap => out.push_str(PLAIN_GAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn text(s: &str) -> Node {
        Node::Text(s.to_string())
    }

    #[test]
    fn test_non_array_input_is_empty() {
        let renderer = RichTextRenderer::new();
        for input in [
            Value::Null,
            json!(3),
            json!("plain string"),
            json!(true),
            json!({"children": [{"text": "x"}]}),
        ] {
            assert!(renderer.render(&input).is_empty());
        }
    }

    #[test]
    fn test_same_block_spans_concatenate() {
        let renderer = RichTextRenderer::new();
        let body = json!([{
            "style": "normal",
            "children": [
                {"text": "Hello ", "marks": []},
                {"text": "world", "marks": ["strong"]}
            ]
        }]);
        let nodes = renderer.render(&body);
        assert_eq!(nodes, vec![text("Hello "), Node::Strong(vec![text("world")])]);
        assert_eq!(to_html(&nodes), "Hello <strong>world</strong>");
    }

    #[test]
    fn test_blocks_are_separated_by_gap() {
        let renderer = RichTextRenderer::new();
        let body = json!([{"children": [{"text": "A"}]}, {"children": [{"text": "B"}]}]);
        let nodes = renderer.render(&body);
        assert_eq!(nodes, vec![text("A"), Node::Gap, text("B")]);

        let plain = to_plain_text(&nodes);
        assert_ne!(plain, "AB");
        assert_eq!(plain, format!("A{}B", PLAIN_GAP));

        let html = to_html(&nodes);
        assert!(html.starts_with('A') && html.ends_with('B'));
        assert!(html.contains("&#8203;"));
    }

    #[test]
    fn test_marks_nest_in_order() {
        let renderer = RichTextRenderer::new();
        let body = json!([{"children": [{"text": "x", "marks": ["bold", "italic", "code"]}]}]);
        assert_eq!(
            to_html(&renderer.render(&body)),
            "<code><em><strong>x</strong></em></code>"
        );
    }

    #[test]
    fn test_unknown_mark_passes_through() {
        let renderer = RichTextRenderer::new();
        let body = json!([{
            "children": [{"text": "plain", "marks": ["missing", "underline"]}],
            "markDefs": [{"_key": "other", "href": "https://example.com"}]
        }]);
        assert_eq!(renderer.render(&body), vec![text("plain")]);
    }

    #[test]
    fn test_external_link_security_attributes() {
        let renderer = RichTextRenderer::new();
        let body = json!([{
            "children": [{"text": "site", "marks": ["l1"]}],
            "markDefs": [{"_key": "l1", "_type": "link", "href": "https://example.com"}]
        }]);
        let html = renderer.render_html(&body);
        assert_eq!(
            html,
            r#"<a href="https://example.com" target="_blank" rel="noopener noreferrer">site</a>"#
        );

        let body = json!([{
            "children": [{"text": "home", "marks": ["l1"]}],
            "markDefs": [{"_key": "l1", "_type": "link", "href": "/internal"}]
        }]);
        let html = renderer.render_html(&body);
        assert_eq!(html, r#"<a href="/internal">home</a>"#);
        assert!(!html.contains("noopener"));
        assert!(!html.contains("noreferrer"));
    }

    #[test]
    fn test_internal_link_from_slug() {
        let renderer = RichTextRenderer::with_link_base("/projects");
        let body = json!([{
            "children": [{"text": "see", "marks": ["ref"]}],
            "markDefs": [{
                "_key": "ref",
                "_type": "internalLink",
                "reference": {"_ref": "abc", "slug": {"current": "my project"}}
            }]
        }]);
        assert_eq!(
            renderer.render(&body),
            vec![Node::Link {
                href: "/projects/my%20project".to_string(),
                external: false,
                children: vec![text("see")],
            }]
        );
    }

    #[test]
    fn test_embed_fallback_and_skip() {
        let renderer = RichTextRenderer::new();
        let body = json!([
            {"_type": "image", "asset": {"_ref": "img"}},
            {"children": [{"text": "A"}]},
            {"_type": "image", "alt": "A diagram"},
            {"style": "h3", "children": [{"text": ""}, {"text": "", "marks": ["strong"]}]},
            {"children": []},
            42,
            null,
            {"children": [{"text": "B"}]}
        ]);
        assert_eq!(
            renderer.render(&body),
            vec![text("A"), Node::Gap, text("A diagram"), Node::Gap, text("B")]
        );
    }

    #[test]
    fn test_styles_and_lists() {
        let renderer = RichTextRenderer::new();
        let body = json!([
            {"style": "h2", "children": [{"text": "Title"}]},
            {"style": "mystery", "listItem": "number", "children": [{"text": "one"}]},
            {"listItem": "number", "children": [{"text": "two"}]},
            {"listItem": "bullet", "children": [{"text": "dot"}]}
        ]);
        let nodes = renderer.render(&body);
        assert_eq!(
            nodes[0],
            Node::Styled {
                style: BlockStyle::Heading(2),
                children: vec![text("Title")],
            }
        );
        assert_eq!(
            to_plain_text(&nodes),
            format!("Title{0}1. one{0}2. two{0}• dot", PLAIN_GAP)
        );
    }

    #[test]
    fn test_text_is_escaped() {
        let renderer = RichTextRenderer::new();
        let body = json!([{"children": [{"text": "<script>alert(1)</script>"}]}]);
        assert_eq!(
            renderer.render_html(&body),
            "&lt;script&gt;alert(1)&lt;/script&gt;"
        );
    }

    #[test]
    fn test_rendering_is_idempotent() {
        let renderer = RichTextRenderer::new();
        let body = json!([
            {"children": [{"text": "a", "marks": ["em"]}, {"text": "b"}]},
            {"children": [{"text": "c", "marks": ["k"]}], "markDefs": [{"_key": "k", "href": "http://x.test"}]}
        ]);
        assert_eq!(renderer.render(&body), renderer.render(&body));
        assert_eq!(renderer.render_html(&body), renderer.render_html(&body));
    }

    #[test]
    fn test_malformed_spans_never_panic() {
        let renderer = RichTextRenderer::new();
        let body = json!([
            {"children": [null, 5, {"marks": "bold"}, {"text": 9}, "bare"]},
            {"children": [], "markDefs": "nope"},
            {"children": [{"text": "z", "marks": [null, {"k": 1}]}], "markDefs": [1, {"_key": 2}]}
        ]);
        let nodes = renderer.render(&body);
        assert_eq!(to_plain_text(&nodes), format!("bare{}z", PLAIN_GAP));
    }
}
