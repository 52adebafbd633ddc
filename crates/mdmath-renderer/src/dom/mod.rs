//! Minimal HTML document model.
//!
//! Rendered markdown is parsed into an owned [`Element`] tree so math code
//! elements can be selected by class and replaced in place, then serialized
//! back to HTML.

mod entities;
mod node;
mod parser;
mod serializer;

pub use node::{Element, Node, NodePath};
pub(crate) use node::push_text;
pub use parser::{HtmlParser, MAX_DEPTH, ROOT_TAG};
pub use serializer::{HtmlSerializer, escape_attr, escape_text};

/// Error parsing an HTML fragment.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Malformed markup.
    #[error("XML parse error")]
    Xml(#[from] quick_xml::Error),

    /// Text could not be decoded.
    #[error("encoding error")]
    Encoding(#[from] quick_xml::encoding::EncodingError),

    /// Elements nest deeper than the parser accepts.
    #[error("element nesting exceeds {0} levels")]
    TooDeep(usize),
}
