//! HTML serializer for [`Element`] trees.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::fmt::Write;

use super::node::{Element, Node, is_raw_text_tag};

/// Serialize an [`Element`] tree back to HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlSerializer;

impl HtmlSerializer {
    /// Create a new serializer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Serialize the children of `root`, dropping the wrapper itself.
    #[must_use]
    pub fn serialize(&self, root: &Element) -> String {
        let mut out = String::with_capacity(4096);
        for child in &root.children {
            serialize_node(child, &mut out);
        }
        out
    }
}

fn serialize_node(node: &Node, out: &mut String) {
    match node {
        Node::Element(element) => serialize_element(element, out),
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Raw(html) => out.push_str(html),
    }
}

fn serialize_element(element: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&element.tag);
    for (key, value) in &element.attrs {
        let _ = write!(out, r#" {key}="{}""#, escape_attr(value));
    }

    if element.self_closing && element.children.is_empty() {
        out.push_str(" />");
        return;
    }
    out.push('>');
    if element.is_void() {
        return;
    }

    let raw_text = is_raw_text_tag(&element.tag);
    for child in &element.children {
        match child {
            Node::Text(text) if raw_text => out.push_str(text),
            _ => serialize_node(child, out),
        }
    }
    let _ = write!(out, "</{}>", element.tag);
}

/// Escape text for HTML content.
#[must_use]
pub fn escape_text(text: &str) -> String {
    escape_html(text, false)
}

/// Escape text for a double-quoted HTML attribute value.
#[must_use]
pub fn escape_attr(text: &str) -> String {
    escape_html(text, true)
}

fn escape_html(text: &str, attribute: bool) -> String {
    let mut result = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => result.push_str("&amp;"),
            '\u{00a0}' => result.push_str("&nbsp;"),
            '"' if attribute => result.push_str("&quot;"),
            '<' if !attribute => result.push_str("&lt;"),
            '>' if !attribute => result.push_str("&gt;"),
            _ => result.push(ch),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::HtmlParser;
    use pretty_assertions::assert_eq;

    fn reserialize(html: &str) -> String {
        let root = HtmlParser::new().parse(html).unwrap();
        HtmlSerializer::new().serialize(&root)
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("a < b & c > d \"q\""), "a &lt; b &amp; c &gt; d \"q\"");
    }

    #[test]
    fn test_escape_attr() {
        assert_eq!(escape_attr(r#"x < "y" & z"#), "x < &quot;y&quot; &amp; z");
        assert_eq!(escape_attr("a\u{00a0}b"), "a&nbsp;b");
    }

    #[test]
    fn test_markdown_output_unchanged() {
        let html = "<h1>Title</h1>\n<p>Some <em>text</em> &amp; more &lt;here&gt;.</p>\n\
                    <pre><code class=\"language-rust\">fn main() {}\n</code></pre>\n";
        assert_eq!(reserialize(html), html);
    }

    #[test]
    fn test_void_elements() {
        assert_eq!(reserialize("<p>a<br>b</p>"), "<p>a<br>b</p>");
        assert_eq!(reserialize("<p>a<br />b</p>"), "<p>a<br />b</p>");
        assert_eq!(
            reserialize(r#"<img src="a.png" alt="x">"#),
            r#"<img src="a.png" alt="x">"#
        );
    }

    #[test]
    fn test_entities_normalized() {
        assert_eq!(reserialize("<p>a&nbsp;b&mdash;c</p>"), "<p>a&nbsp;b\u{2014}c</p>");
        assert_eq!(reserialize("<p>&#955;</p>"), "<p>\u{03bb}</p>");
    }

    #[test]
    fn test_raw_nodes_verbatim() {
        let root = Element::new("root").with_children(vec![
            Node::Raw("<span title=\"x\">&alpha;</span>".to_owned()),
            Node::Text("<".to_owned()),
        ]);
        assert_eq!(
            HtmlSerializer::new().serialize(&root),
            "<span title=\"x\">&alpha;</span>&lt;"
        );
    }

    #[test]
    fn test_script_and_style_text_verbatim() {
        let html = "<script>if (a && b) go();</script><style>a > b { color: red; }</style>\
                    <p>a && b</p>";
        assert_eq!(
            reserialize(html),
            "<script>if (a && b) go();</script><style>a > b { color: red; }</style>\
             <p>a &amp;&amp; b</p>"
        );
    }

    #[test]
    fn test_comments_preserved() {
        assert_eq!(reserialize("<!-- c --><p>x</p>"), "<!-- c --><p>x</p>");
    }
}
