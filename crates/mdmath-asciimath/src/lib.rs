//! ASCII-math to TeX translation.
//!
//! The math filters only need something implementing [`AsciiMathTranslator`].
//! [`AsciiMathToTex`] is the built-in implementation; any
//! `Fn(&str) -> String` closure works as well, which lets hosts plug in
//! another translator.
//!
//! # Example
//!
//! ```
//! use mdmath_asciimath::{AsciiMathToTex, AsciiMathTranslator};
//!
//! let tex = AsciiMathToTex.translate("sum_(i=1)^n i^2");
//! assert_eq!(tex, r"\sum_{i=1}^{n}i^{2}");
//! ```

mod lexer;
mod symbols;
mod translate;

/// Converts ASCII-math notation to TeX notation.
///
/// Translation is total: unknown input is passed through rather than
/// rejected, leaving validation to the math engine.
pub trait AsciiMathTranslator: Send + Sync {
    /// Translate `ascii_math` to TeX.
    fn translate(&self, ascii_math: &str) -> String;
}

impl<F> AsciiMathTranslator for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, ascii_math: &str) -> String {
        self(ascii_math)
    }
}

/// Built-in ASCII-math translator.
///
/// Covers greek letters, operators, relations, logic, arrows, number sets,
/// standard functions, brackets, accents, font commands, fractions, roots,
/// sub/superscripts and quoted text. HTML entity references such as `&lt;`
/// pass through unchanged so translated spans stay valid HTML.
#[derive(Debug, Clone, Copy, Default)]
pub struct AsciiMathToTex;

impl AsciiMathTranslator for AsciiMathToTex {
    fn translate(&self, ascii_math: &str) -> String {
        translate::translate(ascii_math)
    }
}

/// Translate ASCII-math to TeX with the built-in translator.
#[must_use]
pub fn asciimath_to_tex(ascii_math: &str) -> String {
    translate::translate(ascii_math)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_translator() {
        assert_eq!(AsciiMathToTex.translate("1/2"), r"\frac{1}{2}");
        assert_eq!(asciimath_to_tex("x^2"), "x^{2}");
    }

    #[test]
    fn test_closure_translator() {
        let upper = |s: &str| s.to_uppercase();
        let translator: &dyn AsciiMathTranslator = &upper;
        assert_eq!(translator.translate("abc"), "ABC");
    }
}
