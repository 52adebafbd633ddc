//! Tokenizer for ASCII-math input.

use crate::symbols::{Symbol, SymbolKind, longest_symbol};

/// A lexical token borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    /// Entry from the symbol table.
    Symbol(&'static Symbol),
    /// Decimal number such as `12` or `3.14`.
    Number(&'a str),
    /// Single-letter identifier.
    Ident(&'a str),
    /// Quoted or `text(...)` content, copied verbatim.
    Text(&'a str),
    /// Passed through unchanged (HTML entity references, punctuation).
    Raw(&'a str),
    /// Character that must be backslash-escaped in TeX.
    Escaped(char),
}

/// Split ASCII-math input into tokens, skipping whitespace.
pub(crate) fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(ch) = input[pos..].chars().next() {
        let rest = &input[pos..];

        if ch.is_whitespace() {
            pos += ch.len_utf8();
            continue;
        }

        if ch == '"' {
            let body = &rest[1..];
            let end = body.find('"').unwrap_or(body.len());
            tokens.push(Token::Text(&body[..end]));
            pos += 1 + end + usize::from(end < body.len());
            continue;
        }

        // Entity references come from HTML-escaped input and must stay intact.
        if ch == '&'
            && let Some(len) = entity_len(rest)
        {
            tokens.push(Token::Raw(&rest[..len]));
            pos += len;
            continue;
        }

        if let Some(symbol) = longest_symbol(rest) {
            pos += symbol.input.len();
            if symbol.kind == SymbolKind::Text {
                if let Some((content, consumed)) = text_argument(&input[pos..]) {
                    tokens.push(Token::Text(content));
                    pos += consumed;
                } else {
                    tokens.push(Token::Raw(symbol.input));
                }
            } else {
                tokens.push(Token::Symbol(symbol));
            }
            continue;
        }

        let len = if ch.is_ascii_digit() {
            let len = number_len(rest);
            tokens.push(Token::Number(&rest[..len]));
            len
        } else if ch.is_alphabetic() {
            tokens.push(Token::Ident(&rest[..ch.len_utf8()]));
            ch.len_utf8()
        } else if matches!(ch, '%' | '#' | '$' | '&') {
            tokens.push(Token::Escaped(ch));
            1
        } else {
            tokens.push(Token::Raw(&rest[..ch.len_utf8()]));
            ch.len_utf8()
        };
        pos += len;
    }

    tokens
}

/// Length of a leading decimal number (`12`, `3.14`).
fn number_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if bytes.get(int_len) == Some(&b'.') {
        let frac_len = bytes[int_len + 1..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count();
        if frac_len > 0 {
            return int_len + 1 + frac_len;
        }
    }
    int_len
}

/// Length of a leading `&name;`, `&#123;` or `&#x1F;` reference.
fn entity_len(s: &str) -> Option<usize> {
    let end = s.find(';')?;
    let name = &s[1..end];
    let valid = match name.strip_prefix('#') {
        Some(code) => match code.strip_prefix(['x', 'X']) {
            Some(hex) => !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()),
            None => !code.is_empty() && code.chars().all(|c| c.is_ascii_digit()),
        },
        None => !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric()),
    };
    valid.then_some(end + 1)
}

/// Parenthesized argument of `text`, returned with the bytes consumed.
fn text_argument(s: &str) -> Option<(&str, usize)> {
    let trimmed = s.trim_start();
    let skipped = s.len() - trimmed.len();
    let body = trimmed.strip_prefix('(')?;
    let end = body.find(')')?;
    Some((&body[..end], skipped + 1 + end + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn describe(input: &str) -> Vec<String> {
        tokenize(input)
            .into_iter()
            .map(|token| match token {
                Token::Symbol(symbol) => format!("sym:{}", symbol.input),
                Token::Number(s) => format!("num:{s}"),
                Token::Ident(s) => format!("id:{s}"),
                Token::Text(s) => format!("text:{s}"),
                Token::Raw(s) => format!("raw:{s}"),
                Token::Escaped(c) => format!("esc:{c}"),
            })
            .collect()
    }

    #[test]
    fn test_numbers_and_identifiers() {
        assert_eq!(
            describe("3.14 x 12."),
            vec!["num:3.14", "id:x", "num:12", "raw:."]
        );
    }

    #[test]
    fn test_symbols_longest_match() {
        assert_eq!(describe("a<=b"), vec!["id:a", "sym:<=", "id:b"]);
        assert_eq!(describe("sin x"), vec!["sym:sin", "id:x"]);
    }

    #[test]
    fn test_quoted_text() {
        assert_eq!(
            describe(r#"x "for all" y"#),
            vec!["id:x", "text:for all", "id:y"]
        );
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(describe(r#""abc"#), vec!["text:abc"]);
    }

    #[test]
    fn test_text_function() {
        assert_eq!(describe("text (if ) x"), vec!["text:if ", "id:x"]);
        assert_eq!(describe("text"), vec!["raw:text"]);
    }

    #[test]
    fn test_entities_pass_through() {
        assert_eq!(
            describe("a &lt; b &#955; &#x3bb;"),
            vec!["id:a", "raw:&lt;", "id:b", "raw:&#955;", "raw:&#x3bb;"]
        );
    }

    #[test]
    fn test_bare_ampersand_escaped() {
        assert_eq!(describe("a & b"), vec!["id:a", "esc:&", "id:b"]);
        assert_eq!(describe("50%"), vec!["num:50", "esc:%"]);
    }

    #[test]
    fn test_unicode_identifier() {
        assert_eq!(describe("é+1"), vec!["id:é", "sym:+", "num:1"]);
    }
}
