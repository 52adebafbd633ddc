//! Normalization of HTML character references before XML parsing.
//!
//! Named HTML entities become their Unicode characters, the XML-predefined
//! ones are kept for the parser to decode, unknown names and bare ampersands
//! are escaped so they survive as literal text.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

/// Ampersand with an optional named or numeric reference after it.
static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:([a-zA-Z][a-zA-Z0-9]*);|#[0-9]+;|#[xX][0-9a-fA-F]+;)?")
        .expect("invalid entity regex")
});

/// References the XML parser understands natively.
const XML_ENTITIES: &[&str] = &["amp", "lt", "gt", "quot", "apos"];

/// Rewrite character references so the input parses as XML.
pub fn normalize_entities(html: &str) -> Cow<'_, str> {
    if !html.contains('&') {
        return Cow::Borrowed(html);
    }
    REFERENCE_PATTERN.replace_all(html, |caps: &regex::Captures| {
        let whole = &caps[0];
        if whole == "&" {
            return "&amp;".to_owned();
        }
        let Some(name) = caps.get(1).map(|m| m.as_str()) else {
            // Numeric reference
            return whole.to_owned();
        };
        if XML_ENTITIES.contains(&name) {
            return whole.to_owned();
        }
        entity_to_unicode(name).map_or_else(|| format!("&amp;{name};"), str::to_owned)
    })
}

/// Map HTML entity name to Unicode character.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{00b0}",
        "sect" => "\u{00a7}",
        "para" => "\u{00b6}",
        "middot" => "\u{00b7}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",

        // Arrows
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "rarr" => "\u{2192}",
        "darr" => "\u{2193}",
        "harr" => "\u{2194}",
        "rArr" => "\u{21d2}",
        "hArr" => "\u{21d4}",

        // Math
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "asymp" => "\u{2248}",
        "equiv" => "\u{2261}",
        "plusmn" => "\u{00b1}",
        "minus" => "\u{2212}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",
        "sdot" => "\u{22c5}",
        "infin" => "\u{221e}",
        "sum" => "\u{2211}",
        "prod" => "\u{220f}",
        "radic" => "\u{221a}",
        "int" => "\u{222b}",
        "part" => "\u{2202}",
        "nabla" => "\u{2207}",
        "forall" => "\u{2200}",
        "exist" => "\u{2203}",
        "isin" => "\u{2208}",
        "notin" => "\u{2209}",
        "sub" => "\u{2282}",
        "sup" => "\u{2283}",
        "cap" => "\u{2229}",
        "cup" => "\u{222a}",
        "empty" => "\u{2205}",
        "and" => "\u{2227}",
        "or" => "\u{2228}",
        "not" => "\u{00ac}",
        "frac12" => "\u{00bd}",
        "sup2" => "\u{00b2}",
        "sup3" => "\u{00b3}",

        // Greek
        "alpha" => "\u{03b1}",
        "beta" => "\u{03b2}",
        "gamma" => "\u{03b3}",
        "delta" => "\u{03b4}",
        "epsilon" => "\u{03b5}",
        "theta" => "\u{03b8}",
        "lambda" => "\u{03bb}",
        "mu" => "\u{03bc}",
        "pi" => "\u{03c0}",
        "sigma" => "\u{03c3}",
        "phi" => "\u{03c6}",
        "omega" => "\u{03c9}",
        "Delta" => "\u{0394}",
        "Sigma" => "\u{03a3}",
        "Omega" => "\u{03a9}",

        _ => return None,
    })
}

/// Decode a reference reported by the XML reader (name without `&` and `;`).
pub(crate) fn decode_reference(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if let Some(hex) = s[1..].strip_prefix(['x', 'X']) {
                u32::from_str_radix(hex, 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => entity_to_unicode(entity).map_or_else(|| format!("&{entity};"), str::to_owned),
    }
}
