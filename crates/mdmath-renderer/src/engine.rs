//! Math engine abstraction.

use mdmath_config::EffectiveConfig;

use crate::error::MathError;

/// Renders math notation to an HTML string.
///
/// Implementations receive the full effective configuration, including
/// pass-through options they alone understand. With `throwOnError` unset an
/// engine should prefer returning its own fallback markup over an error.
pub trait MathEngine: Send + Sync {
    /// Render TeX `notation` to HTML.
    fn render_to_string(&self, notation: &str, config: &EffectiveConfig)
    -> Result<String, MathError>;
}

impl<F> MathEngine for F
where
    F: Fn(&str, &EffectiveConfig) -> Result<String, MathError> + Send + Sync,
{
    fn render_to_string(
        &self,
        notation: &str,
        config: &EffectiveConfig,
    ) -> Result<String, MathError> {
        self(notation, config)
    }
}
