//! Recursive-descent translation from ASCII-math tokens to TeX.
//!
//! Grammar, loosely following the ASCII-math reference:
//!
//! ```text
//! expression   ::= ( intermediate ( "/" intermediate )? )*
//! intermediate ::= simple ( "_" simple )? ( "^" simple )?
//! simple       ::= constant | left expression right | unary simple
//!                | binary simple simple | text
//! ```
//!
//! Operands of `/`, `_`, `^`, unary and binary commands drop their outer
//! brackets, so `(a+b)/2` becomes `\frac{a+b}{2}`.

use crate::lexer::{Token, tokenize};
use crate::symbols::{INVISIBLE, Symbol, SymbolKind};

/// Maximum nesting of groups and command arguments.
///
/// Openers below this depth are emitted as their source text.
const MAX_DEPTH: usize = 64;

/// A translated fragment.
#[derive(Debug)]
struct Piece {
    tex: String,
    /// Content between the outer brackets, when the piece is a group.
    inner: Option<String>,
}

impl Piece {
    fn plain(tex: String) -> Self {
        Self { tex, inner: None }
    }

    fn operand(&self) -> &str {
        self.inner.as_deref().unwrap_or(&self.tex)
    }
}

struct Parser<'a> {
    tokens: Vec<Token<'a>>,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<Token<'a>> {
        self.tokens.get(self.pos).copied()
    }

    fn peek_kind(&self) -> Option<SymbolKind> {
        match self.peek() {
            Some(Token::Symbol(symbol)) => Some(symbol.kind),
            _ => None,
        }
    }

    /// Parse until the end of input, or until a closing bracket when `nested`.
    ///
    /// Returns the TeX and the closing bracket that ended the group, if any.
    fn expression(&mut self, nested: bool) -> (String, Option<&'static Symbol>) {
        let mut out = String::new();

        while let Some(token) = self.peek() {
            if let Token::Symbol(symbol) = token
                && symbol.kind == SymbolKind::RightBracket
            {
                self.pos += 1;
                if nested {
                    return (out, Some(symbol));
                }
                // Unmatched closing bracket at top level
                if symbol.tex != INVISIBLE {
                    push_tex(&mut out, symbol.tex);
                }
                continue;
            }

            let Some(piece) = self.intermediate() else {
                break;
            };

            if self.peek_kind() == Some(SymbolKind::Frac) {
                self.pos += 1;
                if let Some(denominator) = self.intermediate() {
                    push_tex(
                        &mut out,
                        &format!(r"\frac{{{}}}{{{}}}", piece.operand(), denominator.operand()),
                    );
                } else {
                    push_tex(&mut out, &piece.tex);
                    push_tex(&mut out, "/");
                }
            } else {
                push_tex(&mut out, &piece.tex);
            }
        }

        (out, None)
    }

    fn intermediate(&mut self) -> Option<Piece> {
        let mut piece = self.simple()?;
        let mut seen_sub = false;
        let mut seen_sup = false;

        loop {
            let marker = match self.peek_kind() {
                Some(SymbolKind::Sub) if !seen_sub => {
                    seen_sub = true;
                    '_'
                }
                Some(SymbolKind::Sup) if !seen_sup => {
                    seen_sup = true;
                    '^'
                }
                _ => break,
            };
            self.pos += 1;
            let script = self.operand();
            piece = Piece::plain(format!("{}{marker}{{{script}}}", piece.tex));
        }

        Some(piece)
    }

    /// Parse a simple expression and return it stripped of outer brackets.
    fn operand(&mut self) -> String {
        self.simple()
            .map(|piece| piece.operand().to_owned())
            .unwrap_or_default()
    }

    fn simple(&mut self) -> Option<Piece> {
        let token = self.peek()?;
        if let Token::Symbol(symbol) = token
            && symbol.kind == SymbolKind::RightBracket
        {
            return None;
        }
        self.pos += 1;

        let piece = match token {
            Token::Symbol(symbol) if symbol.kind.is_opener() && self.depth >= MAX_DEPTH => {
                Piece::plain(symbol.input.to_owned())
            }
            Token::Symbol(symbol) => {
                self.depth += 1;
                let piece = self.symbol(symbol);
                self.depth -= 1;
                piece
            }
            Token::Number(s) | Token::Ident(s) | Token::Raw(s) => Piece::plain(s.to_owned()),
            Token::Text(s) => Piece::plain(format!(r"\text{{{s}}}")),
            Token::Escaped(c) => Piece::plain(format!(r"\{c}")),
        };

        Some(piece)
    }

    fn symbol(&mut self, symbol: &'static Symbol) -> Piece {
        match symbol.kind {
            SymbolKind::LeftBracket => {
                let (inner, close) = self.expression(true);
                Piece {
                    tex: bracketed(symbol, &inner, close),
                    inner: Some(inner),
                }
            }
            SymbolKind::Unary { close } => {
                let argument = self.operand();
                Piece::plain(join(&[symbol.tex, &argument, close]))
            }
            SymbolKind::Binary { mid, close } => {
                let first = self.operand();
                let second = self.operand();
                Piece::plain(join(&[symbol.tex, &first, mid, &second, close]))
            }
            _ => Piece::plain(symbol.tex.to_owned()),
        }
    }
}

/// Render a bracketed group with `\left`/`\right` sizing.
fn bracketed(open: &Symbol, inner: &str, close: Option<&Symbol>) -> String {
    let close = close.map_or(INVISIBLE, |symbol| symbol.tex);
    if open.tex == INVISIBLE && close == INVISIBLE {
        return format!("{{{inner}}}");
    }
    join(&[
        &format!(r"\left{}", open.tex),
        inner,
        &format!(r"\right{close}"),
    ])
}

fn join(parts: &[&str]) -> String {
    let mut out = String::new();
    for part in parts {
        push_tex(&mut out, part);
    }
    out
}

/// Append TeX, separating a trailing control word from a following letter.
fn push_tex(out: &mut String, tex: &str) {
    if tex.starts_with(|c: char| c.is_ascii_alphabetic()) && ends_with_control_word(out) {
        out.push(' ');
    }
    out.push_str(tex);
}

fn ends_with_control_word(s: &str) -> bool {
    let before = s.trim_end_matches(|c: char| c.is_ascii_alphabetic());
    if before.len() == s.len() {
        return false;
    }
    let slashes = before.len() - before.trim_end_matches('\\').len();
    slashes % 2 == 1
}

/// Translate ASCII-math notation to TeX.
pub(crate) fn translate(input: &str) -> String {
    let mut parser = Parser {
        tokens: tokenize(input),
        pos: 0,
        depth: 0,
    };
    parser.expression(false).0
}
