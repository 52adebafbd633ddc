//! Error types for math rendering.

use crate::dom::{escape_attr, escape_text};

/// Failure reported by a math engine or in-element renderer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MathError {
    message: String,
    position: Option<usize>,
}

impl MathError {
    /// Create an error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            position: None,
        }
    }

    /// Attach the offset in the notation where the error was detected.
    #[must_use]
    pub fn at(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Error message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Offset in the notation, when the engine reports one.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Render the engine-style fallback shown in place of failed math.
    ///
    /// Produces `<span class="katex-error" title="{message}"
    /// style="color:{error_color}">{notation}</span>`.
    #[must_use]
    pub fn to_fallback_html(&self, notation: &str, error_color: &str) -> String {
        let title = match self.position {
            Some(position) => format!("{} at position {position}", self.message),
            None => self.message.clone(),
        };
        format!(
            r#"<span class="katex-error" title="{}" style="color:{}">{}</span>"#,
            escape_attr(&title),
            escape_attr(error_color),
            escape_text(notation)
        )
    }
}

/// Error from an output filter stage.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum FilterError {
    /// The math engine failed and `throwOnError` is set.
    #[error("math rendering failed")]
    Render(#[from] MathError),

    /// A delimiter could not be compiled into a scanning pattern.
    #[error("invalid delimiter pattern")]
    Pattern(#[from] regex::Error),
}
