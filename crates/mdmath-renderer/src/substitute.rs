//! ASCII-math span substitution on raw text.

use mdmath_asciimath::AsciiMathTranslator;
use mdmath_config::{Delimiter, EffectiveConfig};
use regex::Regex;

use crate::error::FilterError;

/// Build the scanning pattern for a delimiter pair.
///
/// Both markers are matched literally. The capture is the shortest span up to
/// the nearest `right` marker and never crosses a line break.
pub fn delimiter_pattern(delimiter: &Delimiter) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        "{}(.*?){}",
        regex::escape(&delimiter.left),
        regex::escape(&delimiter.right)
    ))
}

/// Translate every ASCII-math span in `text` to TeX, keeping its delimiters.
///
/// Each ASCII-math delimiter is applied to the whole text in list order, so a
/// later delimiter scans text already rewritten by earlier ones. Text outside
/// matched spans is left untouched, and a `left` marker with no `right`
/// marker after it is not a match.
pub fn substitute_ascii_math(
    text: &str,
    config: &EffectiveConfig,
    translator: &dyn AsciiMathTranslator,
) -> Result<String, FilterError> {
    let delimiters: Vec<&Delimiter> = config.ascii_math_delimiters().collect();
    if delimiters.is_empty() {
        return Ok(text.to_owned());
    }

    let mut out = text.to_owned();
    for delimiter in delimiters {
        let pattern = delimiter_pattern(delimiter)?;
        let replaced = pattern.replace_all(&out, |caps: &regex::Captures| {
            format!(
                "{}{}{}",
                delimiter.left,
                translator.translate(&caps[1]),
                delimiter.right
            )
        });
        out = replaced.into_owned();
    }
    Ok(out)
}
