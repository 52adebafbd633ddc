//! Math code fences as an iterator adapter over pulldown-cmark events.
//!
//! pulldown-cmark renders ```` ```latex ```` as
//! `<pre><code class="language-latex">`. The math filters select code
//! elements carrying both the bare and the `language-` class, so math fences
//! are opened with that markup instead.

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Tag, TagEnd};

use mdmath_renderer::MathCodeKind;

/// Math language of a fence info string (`latex`, `math`, `asciimath`, ...).
fn parse_info_string(info: &str) -> Option<MathCodeKind> {
    MathCodeKind::parse(info.split_whitespace().next()?)
}

/// Iterator adapter that marks math code fences for the math filters.
///
/// This filter:
/// - Replaces the opening of a math fence with
///   `<pre><code class="latex language-latex">` (or the ASCII-math classes)
/// - Replaces the matching close with `</code></pre>`
/// - Passes the fence content and all other events through unchanged
pub struct MathFences<'a, I: Iterator<Item = Event<'a>>> {
    iter: I,
    in_math: bool,
    count: usize,
}

impl<'a, I: Iterator<Item = Event<'a>>> MathFences<'a, I> {
    /// Create a new adapter wrapping the given event iterator.
    pub fn new(iter: I) -> Self {
        Self {
            iter,
            in_math: false,
            count: 0,
        }
    }

    /// Number of math fences seen so far.
    #[must_use]
    pub fn fence_count(&self) -> usize {
        self.count
    }
}

impl<'a, I: Iterator<Item = Event<'a>>> Iterator for MathFences<'a, I> {
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.iter.next()?;

        match event {
            Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))) if !self.in_math => {
                let Some(kind) = parse_info_string(&info) else {
                    return Some(Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(info))));
                };
                self.in_math = true;
                self.count += 1;
                let open = format!(r#"<pre><code class="{}">"#, kind.class_attr());
                Some(Event::Html(CowStr::Boxed(open.into_boxed_str())))
            }
            Event::End(TagEnd::CodeBlock) if self.in_math => {
                self.in_math = false;
                Some(Event::Html(CowStr::Borrowed("</code></pre>\n")))
            }
            event => Some(event),
        }
    }
}
