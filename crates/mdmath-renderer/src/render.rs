//! Rendering of class-marked math code elements.

use std::sync::Arc;

use mdmath_asciimath::{AsciiMathToTex, AsciiMathTranslator};
use mdmath_config::EffectiveConfig;

use crate::auto_render::MathInElement;
use crate::dom::{Element, HtmlParser, HtmlSerializer, Node, escape_attr};
use crate::engine::MathEngine;
use crate::error::FilterError;

/// Notation carried by a marked math code element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MathCodeKind {
    /// `code.latex.language-latex`
    Latex,
    /// `code.asciimath.language-asciimath`
    AsciiMath,
}

impl MathCodeKind {
    /// Parse a code fence language.
    ///
    /// Returns None if the language does not hold math notation.
    pub fn parse(language: &str) -> Option<Self> {
        match language {
            "latex" | "tex" | "math" => Some(Self::Latex),
            "asciimath" => Some(Self::AsciiMath),
            _ => None,
        }
    }

    /// Classes an element must carry to be selected.
    #[must_use]
    pub fn classes(self) -> [&'static str; 2] {
        match self {
            Self::Latex => ["latex", "language-latex"],
            Self::AsciiMath => ["asciimath", "language-asciimath"],
        }
    }

    /// `class` attribute value that marks a `<code>` element as this kind.
    #[must_use]
    pub fn class_attr(self) -> &'static str {
        match self {
            Self::Latex => "latex language-latex",
            Self::AsciiMath => "asciimath language-asciimath",
        }
    }

    /// Check whether `element` is a `<code>` carrying this kind's classes.
    #[must_use]
    pub fn matches(self, element: &Element) -> bool {
        element.tag.eq_ignore_ascii_case("code") && element.has_classes(&self.classes())
    }
}

/// Replaces marked math code elements with rendered math.
pub struct MathRenderer {
    engine: Arc<dyn MathEngine>,
    translator: Arc<dyn AsciiMathTranslator>,
    in_element: Option<Arc<dyn MathInElement>>,
}

impl MathRenderer {
    /// Create a renderer using the built-in ASCII-math translator.
    pub fn new(engine: Arc<dyn MathEngine>) -> Self {
        Self {
            engine,
            translator: Arc::new(AsciiMathToTex),
            in_element: None,
        }
    }

    /// Use a different ASCII-math translator.
    #[must_use]
    pub fn with_translator(mut self, translator: Arc<dyn AsciiMathTranslator>) -> Self {
        self.translator = translator;
        self
    }

    /// Run `in_element` over the whole tree after code elements are rendered.
    #[must_use]
    pub fn with_in_element(mut self, in_element: Arc<dyn MathInElement>) -> Self {
        self.in_element = Some(in_element);
        self
    }

    /// Render every marked math code element in an HTML fragment.
    ///
    /// Each `code.latex.language-latex` element is rendered from its text
    /// content, each `code.asciimath.language-asciimath` element is first
    /// translated to TeX. The element, or its `<pre>` wrapper when it is the
    /// wrapper's only element child, is replaced with
    /// `<span title="{source}">{rendered}</span>`. Both selections are taken
    /// before any replacement happens.
    ///
    /// HTML that cannot be parsed is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::Render`] if the engine or in-element renderer
    /// fails while `throwOnError` is set.
    pub fn render_math(&self, html: &str, config: &EffectiveConfig) -> Result<String, FilterError> {
        if html.is_empty() {
            return Ok(String::new());
        }

        let mut root = match HtmlParser::new().parse(html) {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to parse HTML, math left unrendered");
                return Ok(html.to_owned());
            }
        };

        let latex = root.find_all(|el| MathCodeKind::Latex.matches(el));
        let asciimath = root.find_all(|el| MathCodeKind::AsciiMath.matches(el));
        tracing::debug!(
            latex = latex.len(),
            asciimath = asciimath.len(),
            "Selected math code elements"
        );

        self.render_elements(&mut root, &latex, MathCodeKind::Latex, config)?;
        self.render_elements(&mut root, &asciimath, MathCodeKind::AsciiMath, config)?;

        if let Some(in_element) = &self.in_element {
            in_element.render_in_element(&mut root, config)?;
        } else {
            tracing::debug!("No in-element renderer configured");
        }

        Ok(HtmlSerializer::new().serialize(&root))
    }

    fn render_elements(
        &self,
        root: &mut Element,
        paths: &[Vec<usize>],
        kind: MathCodeKind,
        config: &EffectiveConfig,
    ) -> Result<(), FilterError> {
        for path in paths {
            // An earlier replacement may have removed this element
            let Some(element) = root.element_at(path).filter(|el| kind.matches(el)) else {
                tracing::debug!(?path, ?kind, "Skipping replaced math element");
                continue;
            };

            let source = element.text_content();
            let tex = match kind {
                MathCodeKind::Latex => source.clone(),
                MathCodeKind::AsciiMath => self.translator.translate(&source),
            };

            let rendered = match self.engine.render_to_string(&tex, config) {
                Ok(rendered) => rendered,
                Err(e) if config.throw_on_error => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(error = %e, notation = %tex, "Math rendering failed");
                    e.to_fallback_html(&tex, &config.error_color)
                }
            };

            let replacement = Node::Raw(format!(
                r#"<span title="{}">{rendered}</span>"#,
                escape_attr(&source)
            ));
            let target = replacement_target(root, path);
            root.replace(target, replacement);
        }
        Ok(())
    }
}

/// Path of the node to replace for the math element at `path`.
///
/// A fenced block renders as `<pre><code ...>`; the `<pre>` goes too when
/// the code element is its only element child.
fn replacement_target<'a>(root: &Element, path: &'a [usize]) -> &'a [usize] {
    let parent_path = &path[..path.len() - 1];
    match root.element_at(parent_path) {
        Some(parent)
            if !parent_path.is_empty()
                && parent.tag.eq_ignore_ascii_case("pre")
                && parent.element_children().count() == 1 =>
        {
            parent_path
        }
        _ => path,
    }
}
