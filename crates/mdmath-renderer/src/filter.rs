//! Output filter stages and the extension factory that builds them.

use std::sync::Arc;

use mdmath_asciimath::{AsciiMathToTex, AsciiMathTranslator};
use mdmath_config::{MathConfig, merge_config};

use crate::auto_render::{AutoRender, MathInElement};
use crate::engine::MathEngine;
use crate::error::FilterError;
use crate::render::MathRenderer;
use crate::substitute::substitute_ascii_math;

/// Post-processing stage applied to a markdown pipeline's output.
pub trait OutputFilter: Send + Sync {
    /// Stage name, for logging.
    fn name(&self) -> &'static str;

    /// Transform the pipeline output.
    fn filter(&self, text: &str) -> Result<String, FilterError>;
}

/// Stage 1: translates ASCII-math spans in the raw output to TeX.
pub struct AsciiMathFilter {
    config: Option<MathConfig>,
    translator: Arc<dyn AsciiMathTranslator>,
}

impl OutputFilter for AsciiMathFilter {
    fn name(&self) -> &'static str {
        "asciimath"
    }

    fn filter(&self, text: &str) -> Result<String, FilterError> {
        let config = merge_config(self.config.as_ref());
        substitute_ascii_math(text, &config, self.translator.as_ref())
    }
}

/// Stage 2: renders math code elements (and optionally delimited math) in HTML.
pub struct MathRenderFilter {
    config: Option<MathConfig>,
    renderer: MathRenderer,
}

impl OutputFilter for MathRenderFilter {
    fn name(&self) -> &'static str {
        "math-render"
    }

    fn filter(&self, html: &str) -> Result<String, FilterError> {
        let config = merge_config(self.config.as_ref());
        self.renderer.render_math(html, &config)
    }
}

/// Factory for the two math output filters.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use mdmath_config::MathConfig;
/// use mdmath_renderer::MathExtension;
///
/// let [asciimath, render] = MathExtension::new(engine)
///     .config(MathConfig { throw_on_error: Some(true), ..Default::default() })
///     .auto_render()
///     .filters();
///
/// let html = render.filter(&asciimath.filter(&html)?)?;
/// ```
pub struct MathExtension {
    engine: Arc<dyn MathEngine>,
    config: Option<MathConfig>,
    translator: Arc<dyn AsciiMathTranslator>,
    in_element: Option<Arc<dyn MathInElement>>,
}

impl MathExtension {
    /// Create an extension rendering with `engine` and default options.
    pub fn new(engine: Arc<dyn MathEngine>) -> Self {
        Self {
            engine,
            config: None,
            translator: Arc::new(AsciiMathToTex),
            in_element: None,
        }
    }

    /// Set user options, merged with the defaults on every filter call.
    #[must_use]
    pub fn config(mut self, config: MathConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a different ASCII-math translator in both stages.
    #[must_use]
    pub fn translator(mut self, translator: Arc<dyn AsciiMathTranslator>) -> Self {
        self.translator = translator;
        self
    }

    /// Run `in_element` over each document after code elements are rendered.
    #[must_use]
    pub fn in_element(mut self, in_element: Arc<dyn MathInElement>) -> Self {
        self.in_element = Some(in_element);
        self
    }

    /// Render delimited math in running text with [`AutoRender`].
    #[must_use]
    pub fn auto_render(self) -> Self {
        let auto = AutoRender::new(Arc::clone(&self.engine));
        self.in_element(Arc::new(auto))
    }

    /// Build the ordered filter pair: ASCII-math substitution, then rendering.
    pub fn filters(self) -> [Box<dyn OutputFilter>; 2] {
        let (asciimath, render) = self.into_stages();
        [Box::new(asciimath), Box::new(render)]
    }

    /// Build the two stages as concrete types.
    pub fn into_stages(self) -> (AsciiMathFilter, MathRenderFilter) {
        let mut renderer =
            MathRenderer::new(self.engine).with_translator(Arc::clone(&self.translator));
        if let Some(in_element) = self.in_element {
            renderer = renderer.with_in_element(in_element);
        }

        let asciimath = AsciiMathFilter {
            config: self.config.clone(),
            translator: self.translator,
        };
        let render = MathRenderFilter {
            config: self.config,
            renderer,
        };
        (asciimath, render)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockEngine;
    use mdmath_config::Delimiter;
    use pretty_assertions::assert_eq;

    fn extension(engine: &Arc<MockEngine>) -> MathExtension {
        MathExtension::new(Arc::clone(engine) as Arc<dyn MathEngine>)
    }

    fn run(filters: &[Box<dyn OutputFilter>; 2], input: &str) -> Result<String, FilterError> {
        filters
            .iter()
            .try_fold(input.to_owned(), |text, filter| filter.filter(&text))
    }

    #[test]
    fn test_filter_order_and_names() {
        let engine = Arc::new(MockEngine::new());
        let filters = extension(&engine).filters();
        assert_eq!(filters[0].name(), "asciimath");
        assert_eq!(filters[1].name(), "math-render");
    }

    #[test]
    fn test_stage_one_translates_spans() {
        let engine = Arc::new(MockEngine::new());
        let (asciimath, _) = extension(&engine).into_stages();
        assert_eq!(asciimath.filter("<p>~x^2~</p>").unwrap(), "<p>~x^{2}~</p>");
        assert_eq!(asciimath.filter("").unwrap(), "");
    }

    #[test]
    fn test_pipeline_renders_code_elements() {
        let engine = Arc::new(MockEngine::new());
        let filters = extension(&engine).filters();

        let out = run(&filters, r#"<p>a</p><code class="latex language-latex">x^2</code>"#).unwrap();
        assert_eq!(
            out,
            format!(
                r#"<p>a</p><span title="x^2">{}</span>"#,
                MockEngine::expected("x^2", true)
            )
        );
    }

    #[test]
    fn test_pipeline_with_auto_render() {
        let engine = Arc::new(MockEngine::new());
        let filters = extension(&engine).auto_render().filters();

        let out = run(&filters, "<p>Half is ~1/2~.</p>").unwrap();
        assert_eq!(
            out,
            format!("<p>Half is {}.</p>", MockEngine::expected(r"\frac{1}{2}", false))
        );
    }

    #[test]
    fn test_without_auto_render_delimited_text_is_kept() {
        let engine = Arc::new(MockEngine::new());
        let filters = extension(&engine).filters();

        let out = run(&filters, "<p>$$x$$</p>").unwrap();
        assert_eq!(out, "<p>$$x$$</p>");
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn test_user_config_reaches_both_stages() {
        let engine = Arc::new(MockEngine::new());
        let config = MathConfig {
            display_mode: Some(false),
            delimiters: Some(vec![Delimiter::new("@", "@", false).ascii_math()]),
            ..Default::default()
        };
        let filters = extension(&engine).config(config).filters();

        let out = run(
            &filters,
            r#"<p>@a/b@</p><code class="latex language-latex">y</code>"#,
        )
        .unwrap();
        assert_eq!(
            out,
            format!(
                r#"<p>@\frac{{a}}{{b}}@</p><span title="y">{}</span>"#,
                MockEngine::expected("y", false)
            )
        );
    }

    #[test]
    fn test_custom_translator_shared_by_stages() {
        let engine = Arc::new(MockEngine::new());
        let filters = extension(&engine)
            .translator(Arc::new(|s: &str| s.to_uppercase()))
            .filters();

        let out = run(
            &filters,
            r#"<p>~ab~</p><code class="asciimath language-asciimath">cd</code>"#,
        )
        .unwrap();
        assert_eq!(
            out,
            format!(
                r#"<p>~AB~</p><span title="cd">{}</span>"#,
                MockEngine::expected("CD", true)
            )
        );
    }

    #[test]
    fn test_throw_on_error_surfaces() {
        let engine = Arc::new(MockEngine::new().fail_on("x"));
        let config = MathConfig {
            throw_on_error: Some(true),
            ..Default::default()
        };
        let filters = extension(&engine).config(config).filters();

        let err = run(&filters, r#"<code class="latex language-latex">x</code>"#).unwrap_err();
        assert!(matches!(err, FilterError::Render(_)));
    }

    #[test]
    fn test_invalid_html_passes_through() {
        let engine = Arc::new(MockEngine::new());
        let filters = extension(&engine).filters();
        let html = "<p><!-- broken";
        assert_eq!(run(&filters, html).unwrap(), html);
    }
}
