//! Merging user options with built-in defaults.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::MathConfig;
use crate::delimiter::{Delimiter, builtin_delimiters};

/// Default `errorColor` for failed renders.
pub const DEFAULT_ERROR_COLOR: &str = "#ff0000";

/// Keys owned by named fields; never copied from pass-through options.
const NAMED_KEYS: [&str; 4] = ["displayMode", "throwOnError", "errorColor", "delimiters"];

/// Options handed to the math engine for one filter invocation.
///
/// Built by [`merge_config`] and discarded after the call. Serializes with
/// camelCase keys and pass-through options flattened in, which is the shape
/// KaTeX-style engines accept as their options object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectiveConfig {
    /// Render in display (block) mode.
    pub display_mode: bool,
    /// Surface engine failures instead of rendering a fallback.
    pub throw_on_error: bool,
    /// CSS color for fallback error text.
    pub error_color: String,
    /// Built-in delimiters followed by user delimiters.
    pub delimiters: Vec<Delimiter>,
    /// Engine-specific options passed through untouched.
    #[serde(flatten)]
    pub options: Map<String, Value>,
}

impl EffectiveConfig {
    /// Delimiters bounding ASCII-math notation, in list order.
    pub fn ascii_math_delimiters(&self) -> impl Iterator<Item = &Delimiter> {
        self.delimiters.iter().filter(|d| d.asciimath)
    }

    /// Look up a pass-through option.
    #[must_use]
    pub fn option(&self, key: &str) -> Option<&Value> {
        self.options.get(key)
    }

    /// Copy of this config with `display_mode` replaced.
    ///
    /// Used when a matched delimiter decides between block and inline output.
    #[must_use]
    pub fn with_display_mode(&self, display_mode: bool) -> Self {
        Self {
            display_mode,
            ..self.clone()
        }
    }
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        merge_config(None)
    }
}

impl From<&EffectiveConfig> for MathConfig {
    fn from(config: &EffectiveConfig) -> Self {
        Self {
            display_mode: Some(config.display_mode),
            throw_on_error: Some(config.throw_on_error),
            error_color: Some(config.error_color.clone()),
            delimiters: Some(config.delimiters.clone()),
            options: config.options.clone(),
        }
    }
}

/// Merge user options with the built-in defaults.
///
/// Defaults are `displayMode = true`, `throwOnError = false` and
/// `errorColor = "#ff0000"`; every user value wins over its default. User
/// delimiters are appended to the five built-ins rather than replacing them,
/// and are not de-duplicated against them.
#[must_use]
pub fn merge_config(user: Option<&MathConfig>) -> EffectiveConfig {
    let mut delimiters = builtin_delimiters();

    let Some(user) = user else {
        return EffectiveConfig {
            display_mode: true,
            throw_on_error: false,
            error_color: DEFAULT_ERROR_COLOR.to_owned(),
            delimiters,
            options: Map::new(),
        };
    };

    if let Some(extra) = &user.delimiters {
        delimiters.extend(extra.iter().cloned());
    }

    let options = user
        .options
        .iter()
        .filter(|(key, _)| !NAMED_KEYS.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    EffectiveConfig {
        display_mode: user.display_mode.unwrap_or(true),
        throw_on_error: user.throw_on_error.unwrap_or(false),
        error_color: user
            .error_color
            .clone()
            .unwrap_or_else(|| DEFAULT_ERROR_COLOR.to_owned()),
        delimiters,
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let config = merge_config(None);

        assert!(config.display_mode);
        assert!(!config.throw_on_error);
        assert_eq!(config.error_color, "#ff0000");
        assert_eq!(config.delimiters, builtin_delimiters());
        assert!(config.options.is_empty());
    }

    #[test]
    fn test_empty_user_config_matches_defaults() {
        assert_eq!(merge_config(Some(&MathConfig::default())), merge_config(None));
    }

    #[test]
    fn test_user_delimiter_appended() {
        let extra = Delimiter::new("$", "$", false);
        let user = MathConfig {
            delimiters: Some(vec![extra.clone()]),
            ..Default::default()
        };

        let config = merge_config(Some(&user));

        assert_eq!(config.delimiters.len(), 6);
        assert_eq!(config.delimiters[..5], builtin_delimiters()[..]);
        assert_eq!(config.delimiters[5], extra);
    }

    #[test]
    fn test_throw_on_error_override_keeps_other_defaults() {
        let user = MathConfig {
            throw_on_error: Some(true),
            ..Default::default()
        };

        let config = merge_config(Some(&user));

        assert!(config.throw_on_error);
        assert!(config.display_mode);
        assert_eq!(config.error_color, "#ff0000");
    }

    #[test]
    fn test_scalar_overrides() {
        let user = MathConfig {
            display_mode: Some(false),
            error_color: Some("#cc0000".to_owned()),
            ..Default::default()
        };

        let config = merge_config(Some(&user));

        assert!(!config.display_mode);
        assert_eq!(config.error_color, "#cc0000");
    }

    #[test]
    fn test_pass_through_options_kept() {
        let mut user = MathConfig::default();
        user.options.insert("strict".to_owned(), json!("ignore"));
        user.options
            .insert("macros".to_owned(), json!({ r"\RR": r"\mathbb{R}" }));

        let config = merge_config(Some(&user));

        assert_eq!(config.option("strict"), Some(&json!("ignore")));
        assert_eq!(
            config.option("macros"),
            Some(&json!({ r"\RR": r"\mathbb{R}" }))
        );
    }

    #[test]
    fn test_pass_through_cannot_shadow_named_keys() {
        let mut user = MathConfig::default();
        user.options.insert("displayMode".to_owned(), json!(false));

        let config = merge_config(Some(&user));

        assert!(config.display_mode);
        assert!(config.option("displayMode").is_none());
    }

    #[test]
    fn test_remerge_keeps_scalars_and_duplicates_delimiters() {
        let user = MathConfig {
            throw_on_error: Some(true),
            delimiters: Some(vec![Delimiter::new("$", "$", false)]),
            ..Default::default()
        };
        let first = merge_config(Some(&user));

        let second = merge_config(Some(&MathConfig::from(&first)));

        assert_eq!(second.display_mode, first.display_mode);
        assert_eq!(second.throw_on_error, first.throw_on_error);
        assert_eq!(second.error_color, first.error_color);
        assert_eq!(second.options, first.options);
        // Built-ins are appended again rather than de-duplicated.
        assert_eq!(second.delimiters.len(), 5 + first.delimiters.len());
        assert_eq!(second.delimiters[5..], first.delimiters[..]);
    }

    #[test]
    fn test_ascii_math_delimiters() {
        let user = MathConfig {
            delimiters: Some(vec![
                Delimiter::new("$", "$", false),
                Delimiter::new("@@", "@@", true).ascii_math(),
            ]),
            ..Default::default()
        };

        let config = merge_config(Some(&user));
        let lefts: Vec<&str> = config
            .ascii_math_delimiters()
            .map(|d| d.left.as_str())
            .collect();

        assert_eq!(lefts, vec!["~", "&&", "@@"]);
    }

    #[test]
    fn test_with_display_mode() {
        let config = merge_config(None);
        let inline = config.with_display_mode(false);

        assert!(!inline.display_mode);
        assert_eq!(inline.delimiters, config.delimiters);
    }

    #[test]
    fn test_serialize_camel_case_with_options() {
        let mut user = MathConfig::default();
        user.options.insert("trust".to_owned(), json!(true));

        let value = serde_json::to_value(merge_config(Some(&user))).unwrap();

        assert_eq!(value["displayMode"], json!(true));
        assert_eq!(value["throwOnError"], json!(false));
        assert_eq!(value["errorColor"], json!("#ff0000"));
        assert_eq!(value["trust"], json!(true));
        assert_eq!(value["delimiters"][3]["asciimath"], json!(true));
    }
}
