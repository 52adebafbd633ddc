//! Delimiter-based math rendering inside arbitrary HTML text.
//!
//! Where [`MathRenderer`](crate::MathRenderer) only touches explicitly marked
//! code elements, [`AutoRender`] scans every text node of the tree for the
//! configured delimiters (`$$...$$`, `\(...\)`, `~...~` and so on) and
//! replaces each span with the engine's output.

use std::sync::Arc;

use mdmath_config::{Delimiter, EffectiveConfig};

use crate::dom::{Element, Node, push_text};
use crate::engine::MathEngine;
use crate::error::MathError;

/// Renders math found anywhere inside an element tree.
///
/// Invoked once over the whole document after marked code elements have been
/// replaced.
pub trait MathInElement: Send + Sync {
    /// Render math inside `root` in place.
    fn render_in_element(&self, root: &mut Element, config: &EffectiveConfig)
    -> Result<(), MathError>;
}

impl<F> MathInElement for F
where
    F: Fn(&mut Element, &EffectiveConfig) -> Result<(), MathError> + Send + Sync,
{
    fn render_in_element(
        &self,
        root: &mut Element,
        config: &EffectiveConfig,
    ) -> Result<(), MathError> {
        self(root, config)
    }
}

/// Elements whose text is never scanned for math.
const IGNORED_TAGS: &[&str] = &[
    "script", "noscript", "style", "textarea", "pre", "code", "option",
];

/// A piece of a text node after splitting at delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment<'a> {
    Text(&'a str),
    Math {
        /// Notation between the markers.
        notation: &'a str,
        /// Notation with its markers, as written.
        raw: &'a str,
        display: bool,
    },
}

/// Built-in [`MathInElement`] that renders delimited math in text nodes.
pub struct AutoRender {
    engine: Arc<dyn MathEngine>,
}

impl AutoRender {
    /// Create an in-element renderer backed by `engine`.
    pub fn new(engine: Arc<dyn MathEngine>) -> Self {
        Self { engine }
    }

    fn render_children(
        &self,
        element: &mut Element,
        config: &EffectiveConfig,
    ) -> Result<(), MathError> {
        let mut index = 0;
        while index < element.children.len() {
            match &mut element.children[index] {
                Node::Text(text) => {
                    if let Some(nodes) = self.render_text(text, config)? {
                        let count = nodes.len();
                        element.children.splice(index..=index, nodes);
                        index += count;
                        continue;
                    }
                }
                Node::Element(child) => {
                    if !is_ignored(&child.tag) {
                        self.render_children(child, config)?;
                    }
                }
                Node::Raw(_) => {}
            }
            index += 1;
        }
        Ok(())
    }

    /// Render the math spans of one text node.
    ///
    /// Returns None if the text contains no complete span.
    fn render_text(
        &self,
        text: &str,
        config: &EffectiveConfig,
    ) -> Result<Option<Vec<Node>>, MathError> {
        let segments = split_at_delimiters(text, &config.delimiters);
        if !segments.iter().any(|s| matches!(s, Segment::Math { .. })) {
            return Ok(None);
        }

        let mut nodes = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Text(text) => push_text(&mut nodes, text),
                Segment::Math {
                    notation,
                    raw,
                    display,
                } => {
                    let options = config.with_display_mode(display);
                    match self.engine.render_to_string(notation, &options) {
                        Ok(html) => nodes.push(Node::Raw(html)),
                        Err(e) if config.throw_on_error => return Err(e),
                        Err(e) => {
                            tracing::warn!(error = %e, notation, "Math rendering failed, keeping source text");
                            push_text(&mut nodes, raw);
                        }
                    }
                }
            }
        }
        Ok(Some(nodes))
    }
}

impl MathInElement for AutoRender {
    fn render_in_element(
        &self,
        root: &mut Element,
        config: &EffectiveConfig,
    ) -> Result<(), MathError> {
        self.render_children(root, config)
    }
}

fn is_ignored(tag: &str) -> bool {
    IGNORED_TAGS.iter().any(|t| t.eq_ignore_ascii_case(tag))
}

/// Split text into plain and math segments.
///
/// The earliest `left` marker wins; on a tie the first-listed delimiter is
/// used. A `left` marker without its `right` marker ends the scan and the
/// remainder stays text.
fn split_at_delimiters<'a>(text: &'a str, delimiters: &[Delimiter]) -> Vec<Segment<'a>> {
    let mut segments = Vec::new();
    let mut pos = 0;

    loop {
        let rest = &text[pos..];
        let next = delimiters
            .iter()
            .filter(|d| !d.left.is_empty() && !d.right.is_empty())
            .filter_map(|d| rest.find(&d.left).map(|offset| (offset, d)))
            .min_by_key(|(offset, _)| *offset);

        let Some((offset, delimiter)) = next else {
            break;
        };
        let start = pos + offset;
        let math_start = start + delimiter.left.len();
        let Some(end) = find_end_of_math(text, math_start, &delimiter.right) else {
            break;
        };

        if start > pos {
            segments.push(Segment::Text(&text[pos..start]));
        }
        let after = end + delimiter.right.len();
        segments.push(Segment::Math {
            notation: &text[math_start..end],
            raw: &text[start..after],
            display: delimiter.display,
        });
        pos = after;
    }

    if pos < text.len() {
        segments.push(Segment::Text(&text[pos..]));
    }
    segments
}

/// Byte offset of the `right` marker closing a span that starts at `from`.
///
/// Markers inside `{...}` groups or directly after a backslash do not count.
fn find_end_of_math(text: &str, from: usize, right: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut index = from;
    let mut depth = 0_i32;

    while index < bytes.len() {
        if depth <= 0 && bytes[index..].starts_with(right.as_bytes()) {
            return Some(index);
        }
        match bytes[index] {
            b'\\' => index += 1,
            b'{' => depth += 1,
            b'}' => depth -= 1,
            _ => {}
        }
        index += 1;
    }
    None
}
