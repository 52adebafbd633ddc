//! Markdown pipeline hosting output filters.

use std::path::Path;
use std::sync::Arc;

use mdmath_config::{ConfigError, MathConfig};
use mdmath_renderer::{FilterError, MathEngine, MathExtension, OutputFilter};
use pulldown_cmark::{Options, Parser, html};

use crate::fences::MathFences;

/// Error rendering a document.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Math options could not be loaded.
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// An output filter failed.
    #[error("output filter failed")]
    Filter(#[from] FilterError),
}

/// Markdown to HTML conversion followed by registered output filters.
///
/// Math fences (```` ```latex ````, ```` ```math ````, ```` ```asciimath ````)
/// are emitted with the class markers the math filters select.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use mdmath::{MarkdownPipeline, MathExtension};
///
/// let pipeline = MarkdownPipeline::new()
///     .with_extension(MathExtension::new(Arc::new(engine)).auto_render());
/// let html = pipeline.render("Half is ~1/2~.")?;
/// ```
pub struct MarkdownPipeline {
    options: Options,
    filters: Vec<Box<dyn OutputFilter>>,
}

impl Default for MarkdownPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownPipeline {
    /// Create a pipeline with tables and task lists enabled.
    ///
    /// Strikethrough stays off: `~text~` is the inline ASCII-math delimiter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            options: Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS,
            filters: Vec::new(),
        }
    }

    /// Create a pipeline with the math extension configured from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the file cannot be read, parsed or
    /// validated.
    pub fn from_config_file(
        path: &Path,
        engine: Arc<dyn MathEngine>,
    ) -> Result<Self, PipelineError> {
        let config = MathConfig::load(path)?;
        Ok(Self::new().with_extension(MathExtension::new(engine).config(config).auto_render()))
    }

    /// Replace the pulldown-cmark parser options.
    #[must_use]
    pub fn options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Append a single output filter.
    #[must_use]
    pub fn with_filter(mut self, filter: Box<dyn OutputFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Register both math stages, in order.
    #[must_use]
    pub fn with_extension(mut self, extension: MathExtension) -> Self {
        self.filters.extend(extension.filters());
        self
    }

    /// Render markdown to HTML without running output filters.
    #[must_use]
    pub fn render_html(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut fences = MathFences::new(parser);

        let mut out = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut out, &mut fences);
        tracing::debug!(math_fences = fences.fence_count(), "Rendered markdown");
        out
    }

    /// Render markdown to HTML and apply every output filter in order.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Filter`] if a filter fails, e.g. a math
    /// engine error with `throwOnError` set.
    pub fn render(&self, markdown: &str) -> Result<String, PipelineError> {
        let mut html = self.render_html(markdown);
        for filter in &self.filters {
            tracing::debug!(filter = filter.name(), "Applying output filter");
            html = filter.filter(&html)?;
        }
        Ok(html)
    }
}
