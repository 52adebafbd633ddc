//! Owned HTML tree.

/// Index path from a root element to one of its descendants.
pub type NodePath = Vec<usize>;

/// Elements that never have content or a closing tag.
const VOID_TAGS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text content is serialized without escaping.
const RAW_TEXT_TAGS: &[&str] = &[
    "script", "style", "xmp", "iframe", "noembed", "noframes", "noscript", "plaintext",
];

/// Check whether text inside `tag` is written verbatim by `innerHTML`.
pub(crate) fn is_raw_text_tag(tag: &str) -> bool {
    RAW_TEXT_TAGS.iter().any(|raw| raw.eq_ignore_ascii_case(tag))
}

/// Check whether `tag` is an HTML void element.
pub(crate) fn is_void_tag(tag: &str) -> bool {
    VOID_TAGS.iter().any(|void| void.eq_ignore_ascii_case(tag))
}

/// A node of the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Element with attributes and children.
    Element(Element),
    /// Decoded character data.
    Text(String),
    /// Markup emitted verbatim (comments, rendered math).
    Raw(String),
}

impl Node {
    /// Borrow as an element.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Mutably borrow as an element.
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
            Self::Text(text) => out.push_str(text),
            Self::Raw(_) => {}
        }
    }
}

/// An HTML element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// Tag name as written in the source.
    pub tag: String,
    /// Attributes in source order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<Node>,
    /// Written as `<tag />` in the source.
    pub self_closing: bool,
}

impl Element {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Builder: append an attribute.
    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((key.into(), value.into()));
        self
    }

    /// Builder: append a text child.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    /// Builder: append children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children.extend(children);
        self
    }

    /// Attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Check whether the `class` attribute contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Check whether the `class` attribute contains every class in `classes`.
    #[must_use]
    pub fn has_classes(&self, classes: &[&str]) -> bool {
        classes.iter().all(|class| self.has_class(class))
    }

    /// Check whether this is an HTML void element.
    #[must_use]
    pub fn is_void(&self) -> bool {
        is_void_tag(&self.tag)
    }

    /// Concatenated text of all descendants.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.collect_text(&mut out);
        }
        out
    }

    /// Child elements, skipping text and raw nodes.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Paths of all descendant elements matching `predicate`, in document order.
    pub fn find_all(&self, predicate: impl Fn(&Element) -> bool) -> Vec<NodePath> {
        let mut found = Vec::new();
        let mut path = Vec::new();
        collect_matches(self, &predicate, &mut path, &mut found);
        found
    }

    /// Node at `path`, relative to this element.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&Node> {
        let (&last, parents) = path.split_last()?;
        let mut current = self;
        for &index in parents {
            current = current.children.get(index)?.as_element()?;
        }
        current.children.get(last)
    }

    /// Element at `path`, relative to this element. An empty path is `self`.
    #[must_use]
    pub fn element_at(&self, path: &[usize]) -> Option<&Element> {
        if path.is_empty() {
            return Some(self);
        }
        self.node_at(path)?.as_element()
    }

    /// Mutable node at `path`, relative to this element.
    pub fn node_at_mut(&mut self, path: &[usize]) -> Option<&mut Node> {
        let (&last, parents) = path.split_last()?;
        let mut current = self;
        for &index in parents {
            current = current.children.get_mut(index)?.as_element_mut()?;
        }
        current.children.get_mut(last)
    }

    /// Replace the node at `path`, returning the previous node.
    pub fn replace(&mut self, path: &[usize], node: Node) -> Option<Node> {
        self.node_at_mut(path)
            .map(|slot| std::mem::replace(slot, node))
    }
}

fn collect_matches(
    element: &Element,
    predicate: &impl Fn(&Element) -> bool,
    path: &mut Vec<usize>,
    found: &mut Vec<NodePath>,
) {
    for (index, child) in element.children.iter().enumerate() {
        if let Node::Element(child) = child {
            path.push(index);
            if predicate(child) {
                found.push(path.clone());
            }
            collect_matches(child, predicate, path, found);
            path.pop();
        }
    }
}

/// Append text to a node list, merging with a trailing text node.
pub(crate) fn push_text(nodes: &mut Vec<Node>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Node::Text(last)) = nodes.last_mut() {
        last.push_str(text);
    } else {
        nodes.push(Node::Text(text.to_owned()));
    }
}
