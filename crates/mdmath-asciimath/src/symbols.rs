//! ASCII-math symbol table.
//!
//! Maps ASCII-math input tokens to their TeX output and grammatical role.

use std::collections::HashMap;
use std::sync::LazyLock;

/// TeX placeholder for an invisible bracket (`{:` and `:}`).
pub(crate) const INVISIBLE: &str = ".";

/// Grammatical role of a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SymbolKind {
    /// Emitted as its TeX form.
    Const,
    /// Opens a group.
    LeftBracket,
    /// Closes a group.
    RightBracket,
    /// Takes one argument: `tex` + argument + `close`.
    Unary { close: &'static str },
    /// Takes two arguments: `tex` + first + `mid` + second + `close`.
    Binary {
        mid: &'static str,
        close: &'static str,
    },
    /// `text(...)`: the parenthesized argument is copied verbatim.
    Text,
    /// Subscript marker `_`.
    Sub,
    /// Superscript marker `^`.
    Sup,
    /// Fraction infix `/`.
    Frac,
}

impl SymbolKind {
    /// Whether the symbol starts a nested group or takes arguments.
    pub(crate) fn is_opener(self) -> bool {
        matches!(self, Self::LeftBracket | Self::Unary { .. } | Self::Binary { .. })
    }
}

/// One entry of the symbol table.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Symbol {
    pub input: &'static str,
    pub tex: &'static str,
    pub kind: SymbolKind,
}

const fn constant(input: &'static str, tex: &'static str) -> Symbol {
    Symbol {
        input,
        tex,
        kind: SymbolKind::Const,
    }
}

const fn left(input: &'static str, tex: &'static str) -> Symbol {
    Symbol {
        input,
        tex,
        kind: SymbolKind::LeftBracket,
    }
}

const fn right(input: &'static str, tex: &'static str) -> Symbol {
    Symbol {
        input,
        tex,
        kind: SymbolKind::RightBracket,
    }
}

const fn unary(input: &'static str, open: &'static str, close: &'static str) -> Symbol {
    Symbol {
        input,
        tex: open,
        kind: SymbolKind::Unary { close },
    }
}

const fn binary(
    input: &'static str,
    open: &'static str,
    mid: &'static str,
    close: &'static str,
) -> Symbol {
    Symbol {
        input,
        tex: open,
        kind: SymbolKind::Binary { mid, close },
    }
}

static SYMBOLS: &[Symbol] = &[
    // Greek letters
    constant("alpha", r"\alpha"),
    constant("beta", r"\beta"),
    constant("gamma", r"\gamma"),
    constant("Gamma", r"\Gamma"),
    constant("delta", r"\delta"),
    constant("Delta", r"\Delta"),
    constant("epsilon", r"\epsilon"),
    constant("varepsilon", r"\varepsilon"),
    constant("zeta", r"\zeta"),
    constant("eta", r"\eta"),
    constant("theta", r"\theta"),
    constant("Theta", r"\Theta"),
    constant("vartheta", r"\vartheta"),
    constant("iota", r"\iota"),
    constant("kappa", r"\kappa"),
    constant("lambda", r"\lambda"),
    constant("Lambda", r"\Lambda"),
    constant("mu", r"\mu"),
    constant("nu", r"\nu"),
    constant("xi", r"\xi"),
    constant("Xi", r"\Xi"),
    constant("pi", r"\pi"),
    constant("Pi", r"\Pi"),
    constant("rho", r"\rho"),
    constant("sigma", r"\sigma"),
    constant("Sigma", r"\Sigma"),
    constant("tau", r"\tau"),
    constant("upsilon", r"\upsilon"),
    constant("phi", r"\phi"),
    constant("Phi", r"\Phi"),
    constant("varphi", r"\varphi"),
    constant("chi", r"\chi"),
    constant("psi", r"\psi"),
    constant("Psi", r"\Psi"),
    constant("omega", r"\omega"),
    constant("Omega", r"\Omega"),
    // Operators
    constant("+", "+"),
    constant("-", "-"),
    constant("*", r"\cdot"),
    constant("**", r"\ast"),
    constant("***", r"\star"),
    constant("//", "/"),
    constant(r"\\", r"\backslash"),
    constant("setminus", r"\setminus"),
    constant("xx", r"\times"),
    constant("|><", r"\ltimes"),
    constant("><|", r"\rtimes"),
    constant("|><|", r"\bowtie"),
    constant("-:", r"\div"),
    constant("divide", r"\div"),
    constant("@", r"\circ"),
    constant("o+", r"\oplus"),
    constant("ox", r"\otimes"),
    constant("o.", r"\odot"),
    constant("sum", r"\sum"),
    constant("prod", r"\prod"),
    constant("^^", r"\wedge"),
    constant("^^^", r"\bigwedge"),
    constant("vv", r"\vee"),
    constant("vvv", r"\bigvee"),
    constant("nn", r"\cap"),
    constant("nnn", r"\bigcap"),
    constant("uu", r"\cup"),
    constant("uuu", r"\bigcup"),
    // Relations
    constant("=", "="),
    constant("!=", r"\ne"),
    constant("ne", r"\ne"),
    constant(":=", ":="),
    constant("<", "<"),
    constant("lt", "<"),
    constant(">", ">"),
    constant("gt", ">"),
    constant("<=", r"\le"),
    constant("le", r"\le"),
    constant(">=", r"\ge"),
    constant("ge", r"\ge"),
    constant("-<", r"\prec"),
    constant("-<=", r"\preceq"),
    constant(">-", r"\succ"),
    constant(">-=", r"\succeq"),
    constant("in", r"\in"),
    constant("!in", r"\notin"),
    constant("sub", r"\subset"),
    constant("sup", r"\supset"),
    constant("sube", r"\subseteq"),
    constant("supe", r"\supseteq"),
    constant("-=", r"\equiv"),
    constant("~=", r"\cong"),
    constant("~~", r"\approx"),
    constant("~", r"\sim"),
    constant("prop", r"\propto"),
    // Logic
    constant("and", r"\text{ and }"),
    constant("or", r"\text{ or }"),
    constant("not", r"\neg"),
    constant("=>", r"\Rightarrow"),
    constant("if", r"\text{ if }"),
    constant("iff", r"\Leftrightarrow"),
    constant("<=>", r"\Leftrightarrow"),
    constant("AA", r"\forall"),
    constant("EE", r"\exists"),
    constant("_|_", r"\bot"),
    constant("TT", r"\top"),
    constant("|--", r"\vdash"),
    constant("|==", r"\models"),
    // Miscellaneous
    constant("int", r"\int"),
    constant("oint", r"\oint"),
    constant("del", r"\partial"),
    constant("grad", r"\nabla"),
    constant("+-", r"\pm"),
    constant("-+", r"\mp"),
    constant("O/", r"\emptyset"),
    constant("oo", r"\infty"),
    constant("aleph", r"\aleph"),
    constant("...", r"\ldots"),
    constant(":.", r"\therefore"),
    constant(":'", r"\because"),
    constant("/_", r"\angle"),
    constant(r"/_\", r"\triangle"),
    constant("'", "'"),
    constant("cdots", r"\cdots"),
    constant("vdots", r"\vdots"),
    constant("ddots", r"\ddots"),
    constant("diamond", r"\diamond"),
    constant("square", r"\square"),
    constant("|__", r"\lfloor"),
    constant("__|", r"\rfloor"),
    constant("|~", r"\lceil"),
    constant("~|", r"\rceil"),
    constant("CC", r"\mathbb{C}"),
    constant("NN", r"\mathbb{N}"),
    constant("QQ", r"\mathbb{Q}"),
    constant("RR", r"\mathbb{R}"),
    constant("ZZ", r"\mathbb{Z}"),
    // Functions
    constant("sin", r"\sin"),
    constant("cos", r"\cos"),
    constant("tan", r"\tan"),
    constant("sec", r"\sec"),
    constant("csc", r"\csc"),
    constant("cot", r"\cot"),
    constant("arcsin", r"\arcsin"),
    constant("arccos", r"\arccos"),
    constant("arctan", r"\arctan"),
    constant("sinh", r"\sinh"),
    constant("cosh", r"\cosh"),
    constant("tanh", r"\tanh"),
    constant("sech", r"\operatorname{sech}"),
    constant("csch", r"\operatorname{csch}"),
    constant("coth", r"\coth"),
    constant("exp", r"\exp"),
    constant("log", r"\log"),
    constant("ln", r"\ln"),
    constant("det", r"\det"),
    constant("dim", r"\dim"),
    constant("mod", r"\bmod"),
    constant("gcd", r"\gcd"),
    constant("lcm", r"\operatorname{lcm}"),
    constant("lim", r"\lim"),
    constant("Lim", r"\operatorname{Lim}"),
    constant("min", r"\min"),
    constant("max", r"\max"),
    constant("inf", r"\inf"),
    // Arrows
    constant("uarr", r"\uparrow"),
    constant("darr", r"\downarrow"),
    constant("rarr", r"\rightarrow"),
    constant("->", r"\to"),
    constant(">->", r"\rightarrowtail"),
    constant("->>", r"\twoheadrightarrow"),
    constant("|->", r"\mapsto"),
    constant("larr", r"\leftarrow"),
    constant("harr", r"\leftrightarrow"),
    constant("rArr", r"\Rightarrow"),
    constant("lArr", r"\Leftarrow"),
    constant("hArr", r"\Leftrightarrow"),
    // Brackets
    left("(", "("),
    left("[", "["),
    left("{", r"\{"),
    left("(:", r"\langle"),
    left("<<", r"\langle"),
    left("{:", INVISIBLE),
    right(")", ")"),
    right("]", "]"),
    right("}", r"\}"),
    right(":)", r"\rangle"),
    right(">>", r"\rangle"),
    right(":}", INVISIBLE),
    // Accents and fonts
    unary("sqrt", r"\sqrt{", "}"),
    unary("hat", r"\hat{", "}"),
    unary("bar", r"\overline{", "}"),
    unary("overline", r"\overline{", "}"),
    unary("ul", r"\underline{", "}"),
    unary("underline", r"\underline{", "}"),
    unary("vec", r"\vec{", "}"),
    unary("dot", r"\dot{", "}"),
    unary("ddot", r"\ddot{", "}"),
    unary("tilde", r"\tilde{", "}"),
    unary("ubrace", r"\underbrace{", "}"),
    unary("obrace", r"\overbrace{", "}"),
    unary("cancel", r"\cancel{", "}"),
    unary("abs", r"\left|", r"\right|"),
    unary("norm", r"\left\|", r"\right\|"),
    unary("floor", r"\left\lfloor", r"\right\rfloor"),
    unary("ceil", r"\left\lceil", r"\right\rceil"),
    unary("bb", r"\mathbf{", "}"),
    unary("bbb", r"\mathbb{", "}"),
    unary("cc", r"\mathcal{", "}"),
    unary("tt", r"\mathtt{", "}"),
    unary("fr", r"\mathfrak{", "}"),
    unary("sf", r"\mathsf{", "}"),
    // Two-argument commands
    binary("frac", r"\frac{", "}{", "}"),
    binary("root", r"\sqrt[", "]{", "}"),
    binary("stackrel", r"\stackrel{", "}{", "}"),
    binary("overset", r"\overset{", "}{", "}"),
    binary("underset", r"\underset{", "}{", "}"),
    // Text
    Symbol {
        input: "text",
        tex: "text",
        kind: SymbolKind::Text,
    },
    Symbol {
        input: "mbox",
        tex: "mbox",
        kind: SymbolKind::Text,
    },
    // Scripts and fractions
    Symbol {
        input: "_",
        tex: r"\_",
        kind: SymbolKind::Sub,
    },
    Symbol {
        input: "^",
        tex: r"\hat{}",
        kind: SymbolKind::Sup,
    },
    Symbol {
        input: "/",
        tex: "/",
        kind: SymbolKind::Frac,
    },
];

struct SymbolTable {
    by_input: HashMap<&'static str, &'static Symbol>,
    max_len: usize,
}

static TABLE: LazyLock<SymbolTable> = LazyLock::new(|| SymbolTable {
    by_input: SYMBOLS.iter().map(|s| (s.input, s)).collect(),
    max_len: SYMBOLS.iter().map(|s| s.input.len()).max().unwrap_or(0),
});

/// Find the longest symbol that prefixes `rest`.
pub(crate) fn longest_symbol(rest: &str) -> Option<&'static Symbol> {
    let table = &*TABLE;
    let max = table.max_len.min(rest.len());
    (1..=max)
        .rev()
        .filter(|&len| rest.is_char_boundary(len))
        .find_map(|len| table.by_input.get(&rest[..len]).copied())
}
