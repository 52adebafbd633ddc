//! [`MathEngine`] backed by the `math-core` crate.
//!
//! Renders TeX to MathML Core, which browsers display natively without a
//! stylesheet or fonts.

use math_core::{LatexToMathML, MathCoreConfig, MathDisplay};
use mdmath_config::EffectiveConfig;
use mdmath_renderer::{MathEngine, MathError};

/// TeX to MathML engine.
///
/// Engine options come from the pass-through part of the math config:
///
/// - `macros`: table of macro name to definition, e.g. `{ "\\RR" = "\\mathbb{R}" }`
/// - `ignoreUnknownCommands`: render unknown commands as text instead of failing
/// - `xmlNamespace`: add the MathML namespace to the `<math>` element
#[derive(Debug)]
pub struct MathCoreEngine {
    converter: LatexToMathML,
}

impl MathCoreEngine {
    /// Create an engine with the default `math-core` settings.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the error case only covers macro definitions.
    pub fn new() -> Result<Self, MathError> {
        Self::with_config(MathCoreConfig::default())
    }

    /// Create an engine from the pass-through options of `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if a macro definition cannot be parsed.
    pub fn from_config(config: &EffectiveConfig) -> Result<Self, MathError> {
        let macros = config
            .option("macros")
            .and_then(|value| value.as_object())
            .map(|table| {
                table
                    .iter()
                    .filter_map(|(name, body)| {
                        let name = name.strip_prefix('\\').unwrap_or(name);
                        body.as_str().map(|body| (name.to_owned(), body.to_owned()))
                    })
                    .collect()
            })
            .unwrap_or_default();
        let flag = |key: &str| {
            config
                .option(key)
                .and_then(|value| value.as_bool())
                .unwrap_or(false)
        };

        Self::with_config(MathCoreConfig {
            macros,
            ignore_unknown_commands: flag("ignoreUnknownCommands"),
            xml_namespace: flag("xmlNamespace"),
            ..Default::default()
        })
    }

    fn with_config(config: MathCoreConfig) -> Result<Self, MathError> {
        let converter = LatexToMathML::new(config).map_err(|(err, index, source)| {
            MathError::new(format!(
                "invalid macro #{index} `{source}`: {}",
                err.error_message()
            ))
        })?;
        Ok(Self { converter })
    }
}

impl MathEngine for MathCoreEngine {
    fn render_to_string(
        &self,
        notation: &str,
        config: &EffectiveConfig,
    ) -> Result<String, MathError> {
        let display = if config.display_mode {
            MathDisplay::Block
        } else {
            MathDisplay::Inline
        };
        self.converter
            .convert_with_local_counter(notation, display)
            .map_err(|err| MathError::new(err.error_message()).at(err.0.start))
    }
}
