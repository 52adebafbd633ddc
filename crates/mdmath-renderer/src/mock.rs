//! Mock math engine for testing.
//!
//! Provides [`MockEngine`] for exercising the filters without a real
//! typesetting engine.

use std::sync::RwLock;

use mdmath_config::EffectiveConfig;

use crate::dom::escape_text;
use crate::engine::MathEngine;
use crate::error::MathError;

/// A single call recorded by [`MockEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderCall {
    /// Notation passed to the engine.
    pub notation: String,
    /// `displayMode` the engine was called with.
    pub display_mode: bool,
}

/// Mock math engine for testing.
///
/// Renders every notation to a recognizable placeholder (see
/// [`MockEngine::expected`]) and records each call. Notations registered with
/// [`MockEngine::fail_on`] fail instead.
///
/// # Example
///
/// ```ignore
/// use mdmath_renderer::{MathEngine, MockEngine};
///
/// let engine = MockEngine::new().fail_on(r"\bad");
/// let html = engine.render_to_string("x^2", &Default::default()).unwrap();
/// assert_eq!(html, MockEngine::expected("x^2", true));
/// ```
#[derive(Debug, Default)]
pub struct MockEngine {
    calls: RwLock<Vec<RenderCall>>,
    failing: Vec<String>,
}

impl MockEngine {
    /// Create a mock engine that renders everything.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make rendering `notation` fail.
    #[must_use]
    pub fn fail_on(mut self, notation: impl Into<String>) -> Self {
        self.failing.push(notation.into());
        self
    }

    /// Calls made so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<RenderCall> {
        self.calls.read().unwrap().clone()
    }

    /// Output the mock produces for `notation`.
    #[must_use]
    pub fn expected(notation: &str, display_mode: bool) -> String {
        format!(
            r#"<span class="mock-math" data-display="{display_mode}">{}</span>"#,
            escape_text(notation)
        )
    }
}

impl MathEngine for MockEngine {
    fn render_to_string(
        &self,
        notation: &str,
        config: &EffectiveConfig,
    ) -> Result<String, MathError> {
        self.calls.write().unwrap().push(RenderCall {
            notation: notation.to_owned(),
            display_mode: config.display_mode,
        });

        if self.failing.iter().any(|f| f == notation) {
            return Err(MathError::new(format!("cannot render {notation}")).at(0));
        }
        Ok(Self::expected(notation, config.display_mode))
    }
}
