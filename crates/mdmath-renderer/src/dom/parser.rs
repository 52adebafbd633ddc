//! HTML fragment parser built on quick-xml.
//!
//! Markdown renderers emit well-formed HTML apart from void elements
//! (`<br>`, `<img ...>`) and HTML entities. Both are handled here: void
//! start tags never open a scope, and entities are normalized before the
//! XML reader sees them.

#![allow(clippy::unused_self)] // Unit struct methods have &self for API consistency

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use super::ParseError;
use super::entities::{decode_reference, normalize_entities};
use super::node::{Element, Node, is_void_tag, push_text};

/// Tag of the synthetic element wrapping the fragment.
pub const ROOT_TAG: &str = "mdmath-root";

/// Maximum element nesting accepted by [`HtmlParser::parse`].
pub const MAX_DEPTH: usize = 256;

/// Parse HTML fragments into an [`Element`] tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    /// Create a new parser.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Parse an HTML fragment.
    ///
    /// The fragment's top-level nodes become children of a [`ROOT_TAG`]
    /// element. Comments are kept verbatim; doctype, declarations and
    /// processing instructions are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the fragment is not well-formed enough to parse,
    /// or if elements nest deeper than [`MAX_DEPTH`].
    pub fn parse(&self, html: &str) -> Result<Element, ParseError> {
        let html = normalize_entities(html);
        let wrapped = format!("<{ROOT_TAG}>{html}</{ROOT_TAG}>");

        let mut reader = Reader::from_str(&wrapped);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;

        let (top, _) = self.parse_children(&mut reader, &mut Vec::new())?;
        Ok(top
            .into_iter()
            .find_map(|node| match node {
                Node::Element(root) if root.tag == ROOT_TAG => Some(root),
                _ => None,
            })
            .unwrap_or_else(|| Element::new(ROOT_TAG)))
    }

    /// Read nodes until the end tag of the innermost open element.
    ///
    /// `open` holds the tags of the enclosing elements, innermost last. An
    /// end tag closing an outer element ends this one implicitly; its name
    /// is returned so the matching ancestor can stop too. End tags matching
    /// no open element are dropped.
    fn parse_children<R: BufRead>(
        &self,
        reader: &mut Reader<R>,
        open: &mut Vec<String>,
    ) -> Result<(Vec<Node>, Option<String>), ParseError> {
        if open.len() > MAX_DEPTH {
            return Err(ParseError::TooDeep(MAX_DEPTH));
        }

        let mut buf = Vec::new();
        let mut nodes = Vec::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Start(e) => {
                    let mut child = self.decode_element(reader, &e);
                    if is_void_tag(&child.tag) {
                        nodes.push(Node::Element(child));
                    } else {
                        open.push(child.tag.clone());
                        let (children, pending) = self.parse_children(reader, open)?;
                        open.pop();
                        child.children = children;
                        nodes.push(Node::Element(child));

                        if let Some(end_tag) = pending {
                            let closes_self = open
                                .last()
                                .is_some_and(|tag| tag.eq_ignore_ascii_case(&end_tag));
                            let pending = (!closes_self).then_some(end_tag);
                            return Ok((nodes, pending));
                        }
                    }
                }
                Event::Empty(e) => {
                    let mut child = self.decode_element(reader, &e);
                    child.self_closing = true;
                    nodes.push(Node::Element(child));
                }
                Event::Text(e) => {
                    let text = reader.decoder().decode(&e)?;
                    push_text(&mut nodes, &text);
                }
                Event::GeneralRef(e) => {
                    let entity = reader.decoder().decode(&e)?;
                    push_text(&mut nodes, &decode_reference(&entity));
                }
                Event::CData(e) => {
                    push_text(&mut nodes, &String::from_utf8_lossy(&e));
                }
                Event::Comment(e) => {
                    let comment = reader.decoder().decode(&e)?;
                    nodes.push(Node::Raw(format!("<!--{comment}-->")));
                }
                Event::End(e) => {
                    let end_tag = self.decode_name(reader, e.name().as_ref());
                    let Some((parent, ancestors)) = open.split_last() else {
                        buf.clear();
                        continue;
                    };
                    if end_tag.eq_ignore_ascii_case(parent) {
                        return Ok((nodes, None));
                    }
                    if ancestors.iter().any(|tag| tag.eq_ignore_ascii_case(&end_tag)) {
                        return Ok((nodes, Some(end_tag)));
                    }
                    // Stray end tag (e.g. `</br>`), skip it
                }
                Event::Eof => return Ok((nodes, None)),
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            }
            buf.clear();
        }
    }

    fn decode_element<R: BufRead>(&self, reader: &Reader<R>, e: &BytesStart) -> Element {
        let mut element = Element::new(self.decode_name(reader, e.name().as_ref()));
        for attr in e.html_attributes().flatten() {
            let key = self.decode_name(reader, attr.key.as_ref());
            let value = attr.unescape_value().map_or_else(
                |_| String::from_utf8_lossy(&attr.value).into_owned(),
                std::borrow::Cow::into_owned,
            );
            element.attrs.push((key, value));
        }
        element
    }

    fn decode_name<R: BufRead>(&self, reader: &Reader<R>, name: &[u8]) -> String {
        reader.decoder().decode(name).map_or_else(
            |_| String::from_utf8_lossy(name).into_owned(),
            std::borrow::Cow::into_owned,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(html: &str) -> Element {
        HtmlParser::new().parse(html).unwrap()
    }

    #[test]
    fn test_parse_simple_element() {
        let root = parse("<p>Hello</p>");

        assert_eq!(root.tag, ROOT_TAG);
        assert_eq!(root.children.len(), 1);
        let p = root.children[0].as_element().unwrap();
        assert_eq!(p.tag, "p");
        assert_eq!(p.text_content(), "Hello");
    }

    #[test]
    fn test_parse_nested_with_tail_text() {
        let root = parse("<p><strong>Bold</strong> text</p>");

        let p = root.children[0].as_element().unwrap();
        assert_eq!(p.children.len(), 2);
        assert_eq!(p.children[1], Node::Text(" text".to_owned()));
    }

    #[test]
    fn test_parse_attributes_in_order() {
        let root = parse(r#"<code class="latex language-latex" data-x="a&amp;b">x</code>"#);

        let code = root.children[0].as_element().unwrap();
        assert_eq!(
            code.attrs,
            vec![
                ("class".to_owned(), "latex language-latex".to_owned()),
                ("data-x".to_owned(), "a&b".to_owned()),
            ]
        );
    }

    #[test]
    fn test_parse_void_elements_without_close() {
        let root = parse("<p>a<br>b<img src=\"x.png\">c</p><p>d</p>");

        assert_eq!(root.children.len(), 2);
        let p = root.children[0].as_element().unwrap();
        assert_eq!(p.text_content(), "abc");
        assert_eq!(p.element_children().count(), 2);
    }

    #[test]
    fn test_parse_self_closing() {
        let root = parse("<p>Before<br />After</p>");

        let p = root.children[0].as_element().unwrap();
        let br = p.children[1].as_element().unwrap();
        assert_eq!(br.tag, "br");
        assert!(br.self_closing);
    }

    #[test]
    fn test_parse_entities_decoded() {
        let root = parse("<p>a &lt; b&nbsp;&#955; &amp; c</p>");
        assert_eq!(root.text_content(), "a < b\u{00a0}\u{03bb} & c");
    }

    #[test]
    fn test_parse_bare_ampersand() {
        let root = parse("<p>Q&A</p>");
        assert_eq!(root.text_content(), "Q&A");
    }

    #[test]
    fn test_parse_comment_kept_raw() {
        let root = parse("<!-- note --><p>x</p>");
        assert_eq!(root.children[0], Node::Raw("<!-- note -->".to_owned()));
    }

    #[test]
    fn test_parse_top_level_text() {
        let root = parse("just text");
        assert_eq!(root.children, vec![Node::Text("just text".to_owned())]);
    }

    #[test]
    fn test_end_tag_closes_open_descendants() {
        let root = parse("<div><p>x</div><p>y</p>");

        assert_eq!(root.children.len(), 2);
        let div = root.children[0].as_element().unwrap();
        assert_eq!(div.tag, "div");
        assert_eq!(div.children.len(), 1);
        assert_eq!(div.children[0].as_element().unwrap().text_content(), "x");
        assert_eq!(root.children[1].as_element().unwrap().text_content(), "y");
    }

    #[test]
    fn test_implied_list_item_ends() {
        let root = parse("<ul><li>a<li>b</ul><p>c</p>");

        assert_eq!(root.children.len(), 2);
        let ul = root.children[0].as_element().unwrap();
        assert_eq!(ul.text_content(), "ab");
        assert_eq!(root.children[1].as_element().unwrap().tag, "p");
    }

    #[test]
    fn test_stray_end_tag_dropped() {
        let root = parse("<p>a</span>b</p>");
        assert_eq!(root.children.len(), 1);
        assert_eq!(root.children[0].as_element().unwrap().text_content(), "ab");
    }

    #[test]
    fn test_nesting_limit() {
        let html = "<span>".repeat(MAX_DEPTH + 10);
        assert!(matches!(
            HtmlParser::new().parse(&html),
            Err(ParseError::TooDeep(MAX_DEPTH))
        ));

        let html = format!("{}x{}", "<b>".repeat(100), "</b>".repeat(100));
        assert_eq!(parse(&html).text_content(), "x");
    }

    #[test]
    fn test_parse_empty() {
        let root = parse("");
        assert!(root.children.is_empty());
    }
}
