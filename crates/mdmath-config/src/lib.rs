//! Configuration for the mdmath output filters.
//!
//! User options ([`MathConfig`]) are merged with built-in defaults into an
//! [`EffectiveConfig`] by [`merge_config`]. Merging is pure and cheap, so each
//! filter stage recomputes it on every call instead of sharing mutable state.
//!
//! Options can be built in code or deserialized with serde. Keys use the
//! camelCase names math engines expect (`displayMode`, `throwOnError`,
//! `errorColor`); snake_case aliases are accepted. Unknown keys are kept as
//! pass-through options for the engine:
//!
//! ```toml
//! displayMode = false
//! errorColor = "#cc0000"
//! strict = "ignore"
//!
//! [[delimiters]]
//! left = "$"
//! right = "$"
//! display = false
//! ```

mod delimiter;
mod merge;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub use delimiter::{Delimiter, builtin_delimiters};
pub use merge::{DEFAULT_ERROR_COLOR, EffectiveConfig, merge_config};

/// User-supplied math options.
///
/// Every field is optional; missing values fall back to the defaults applied
/// by [`merge_config`].
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MathConfig {
    /// Render in display (block) mode. Default: `true`.
    #[serde(alias = "display_mode", skip_serializing_if = "Option::is_none")]
    pub display_mode: Option<bool>,
    /// Surface engine failures to the caller. Default: `false`.
    #[serde(alias = "throw_on_error", skip_serializing_if = "Option::is_none")]
    pub throw_on_error: Option<bool>,
    /// CSS color for fallback error text. Default: `#ff0000`.
    #[serde(alias = "error_color", skip_serializing_if = "Option::is_none")]
    pub error_color: Option<String>,
    /// Extra delimiters, appended after the built-ins.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiters: Option<Vec<Delimiter>>,
    /// Engine-specific options passed through untouched.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl MathConfig {
    /// Load options from a TOML file and validate them.
    ///
    /// # Errors
    ///
    /// Returns error if the file doesn't exist, can't be parsed, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse options from a TOML string and validate them.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate option values.
    ///
    /// Empty delimiter markers would match at every position, and an empty
    /// error color produces invalid CSS.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(color) = &self.error_color {
            require_non_empty(color, "errorColor")?;
        }
        for (i, delimiter) in self.delimiters.iter().flatten().enumerate() {
            require_non_empty(&delimiter.left, &format!("delimiters[{i}].left"))?;
            require_non_empty(&delimiter.right, &format!("delimiters[{i}].right"))?;
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_camel_case() {
        let toml = r##"
displayMode = false
throwOnError = true
errorColor = "#cc0000"
"##;
        let config = MathConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.display_mode, Some(false));
        assert_eq!(config.throw_on_error, Some(true));
        assert_eq!(config.error_color.as_deref(), Some("#cc0000"));
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_parse_snake_case_aliases() {
        let toml = r#"
display_mode = false
throw_on_error = true
"#;
        let config = MathConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.display_mode, Some(false));
        assert_eq!(config.throw_on_error, Some(true));
    }

    #[test]
    fn test_parse_delimiters() {
        let toml = r#"
[[delimiters]]
left = "$"
right = "$"

[[delimiters]]
left = "@@"
right = "@@"
display = true
asciimath = true
"#;
        let config = MathConfig::from_toml_str(toml).unwrap();

        assert_eq!(
            config.delimiters,
            Some(vec![
                Delimiter::new("$", "$", false),
                Delimiter::new("@@", "@@", true).ascii_math(),
            ])
        );
    }

    #[test]
    fn test_unknown_keys_become_options() {
        let toml = r#"
strict = "ignore"
minRuleThickness = 0.05

[macros]
"\\RR" = "\\mathbb{R}"
"#;
        let config = MathConfig::from_toml_str(toml).unwrap();

        assert_eq!(config.options.get("strict"), Some(&json!("ignore")));
        assert_eq!(config.options.get("minRuleThickness"), Some(&json!(0.05)));
        assert_eq!(
            config.options.get("macros"),
            Some(&json!({ r"\RR": r"\mathbb{R}" }))
        );
    }

    #[test]
    fn test_empty_delimiter_rejected() {
        let toml = r#"
[[delimiters]]
left = ""
right = "$"
"#;
        let err = MathConfig::from_toml_str(toml).unwrap_err();

        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        assert!(err.to_string().contains("delimiters[0].left"));
    }

    #[test]
    fn test_empty_error_color_rejected() {
        let err = MathConfig::from_toml_str(r#"errorColor = """#).unwrap_err();
        assert!(err.to_string().contains("errorColor"));
    }

    #[test]
    fn test_invalid_toml() {
        let err = MathConfig::from_toml_str("displayMode = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mdmath.toml");
        std::fs::write(&path, "throwOnError = true\n").unwrap();

        let config = MathConfig::load(&path).unwrap();

        assert_eq!(config.throw_on_error, Some(true));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = MathConfig::load(&path).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(p) if p == path));
    }

    #[test]
    fn test_loaded_config_merges() {
        let config = MathConfig::from_toml_str(
            r#"
errorColor = "blue"

[[delimiters]]
left = "$"
right = "$"
"#,
        )
        .unwrap();

        let effective = merge_config(Some(&config));

        assert_eq!(effective.error_color, "blue");
        assert_eq!(effective.delimiters.len(), 6);
        assert!(effective.display_mode);
    }
}
