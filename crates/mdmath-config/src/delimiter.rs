//! Delimiter pairs bounding math notation in text.

use serde::{Deserialize, Serialize};

/// Built-in delimiters as `(left, right, display, asciimath)`.
///
/// Order is significant: these always come first in the effective list.
const BUILTINS: [(&str, &str, bool, bool); 5] = [
    ("$$", "$$", true, false),
    (r"\[", r"\]", true, false),
    (r"\(", r"\)", false, false),
    ("~", "~", false, true),
    ("&&", "&&", true, true),
];

/// A left/right marker pair bounding a math span.
///
/// `left` and `right` are literal strings. Anything that scans text for them
/// must escape them first so characters like `(` or `$` are not treated as
/// pattern operators.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Delimiter {
    /// Opening marker.
    pub left: String,
    /// Closing marker.
    pub right: String,
    /// Render in display (block) mode instead of inline.
    #[serde(default)]
    pub display: bool,
    /// The enclosed notation is ASCII-math and must be translated to TeX.
    #[serde(default, skip_serializing_if = "is_false")]
    pub asciimath: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)] // serde's skip_serializing_if passes a reference
fn is_false(value: &bool) -> bool {
    !*value
}

impl Delimiter {
    /// Create a TeX delimiter pair.
    #[must_use]
    pub fn new(left: impl Into<String>, right: impl Into<String>, display: bool) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
            display,
            asciimath: false,
        }
    }

    /// Mark the pair as bounding ASCII-math notation.
    #[must_use]
    pub fn ascii_math(mut self) -> Self {
        self.asciimath = true;
        self
    }
}

/// The five built-in delimiters, in matching order.
///
/// `$$…$$` and `\[…\]` are display TeX, `\(…\)` is inline TeX, `~…~` is
/// inline ASCII-math and `&&…&&` is display ASCII-math.
#[must_use]
pub fn builtin_delimiters() -> Vec<Delimiter> {
    BUILTINS
        .iter()
        .map(|&(left, right, display, asciimath)| Delimiter {
            left: left.to_owned(),
            right: right.to_owned(),
            display,
            asciimath,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_builtin_order() {
        let pairs: Vec<(String, String)> = builtin_delimiters()
            .into_iter()
            .map(|d| (d.left, d.right))
            .collect();

        assert_eq!(
            pairs,
            vec![
                ("$$".to_owned(), "$$".to_owned()),
                (r"\[".to_owned(), r"\]".to_owned()),
                (r"\(".to_owned(), r"\)".to_owned()),
                ("~".to_owned(), "~".to_owned()),
                ("&&".to_owned(), "&&".to_owned()),
            ]
        );
    }

    #[test]
    fn test_builtin_flags() {
        let builtins = builtin_delimiters();

        let display: Vec<bool> = builtins.iter().map(|d| d.display).collect();
        let asciimath: Vec<bool> = builtins.iter().map(|d| d.asciimath).collect();

        assert_eq!(display, vec![true, true, false, false, true]);
        assert_eq!(asciimath, vec![false, false, false, true, true]);
    }

    #[test]
    fn test_ascii_math_builder() {
        let delimiter = Delimiter::new("@@", "@@", false).ascii_math();
        assert!(delimiter.asciimath);
        assert!(!delimiter.display);
    }

    #[test]
    fn test_deserialize_defaults_flags() {
        let delimiter: Delimiter = serde_json::from_str(r#"{"left": "$", "right": "$"}"#).unwrap();
        assert_eq!(delimiter, Delimiter::new("$", "$", false));
    }

    #[test]
    fn test_serialize_omits_false_asciimath() {
        let json = serde_json::to_string(&Delimiter::new("$", "$", false)).unwrap();
        assert_eq!(json, r#"{"left":"$","right":"$","display":false}"#);

        let json = serde_json::to_string(&Delimiter::new("~", "~", false).ascii_math()).unwrap();
        assert_eq!(
            json,
            r#"{"left":"~","right":"~","display":false,"asciimath":true}"#
        );
    }
}
