//! Math rendering filters for markdown HTML output.
//!
//! Two ordered output filters turn math notation in rendered markdown into
//! engine-rendered markup:
//!
//! 1. [`AsciiMathFilter`] rewrites text between ASCII-math delimiters
//!    (`~...~`, `&&...&&` and user delimiters flagged `asciimath`) to TeX.
//! 2. [`MathRenderFilter`] parses the HTML, replaces every
//!    `code.latex.language-latex` and `code.asciimath.language-asciimath`
//!    element with `<span title="{source}">{rendered}</span>`, and optionally
//!    runs a [`MathInElement`] renderer such as [`AutoRender`] over the tree.
//!
//! Both stages merge the user [`MathConfig`](mdmath_config::MathConfig) with
//! the defaults on every call and keep no state between documents.
//!
//! # Collaborators
//!
//! - [`MathEngine`]: renders TeX to HTML. Closures work too.
//! - [`AsciiMathTranslator`]: ASCII-math to TeX, [`AsciiMathToTex`] by default.
//! - [`MathInElement`]: optional whole-document pass.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use mdmath_config::EffectiveConfig;
//! use mdmath_renderer::{MathError, MathExtension};
//!
//! let engine = |tex: &str, _: &EffectiveConfig| -> Result<String, MathError> {
//!     Ok(format!("<math>{tex}</math>"))
//! };
//! let [asciimath, render] = MathExtension::new(Arc::new(engine)).filters();
//!
//! let html = r#"<pre><code class="asciimath language-asciimath">x^2</code></pre>"#;
//! let out = render.filter(&asciimath.filter(html).unwrap()).unwrap();
//! assert_eq!(out, r#"<span title="x^2"><math>x^{2}</math></span>"#);
//! ```
//!
//! # Features
//!
//! - `mock`: enables [`MockEngine`] for tests in dependent crates

mod auto_render;
pub mod dom;
mod engine;
mod error;
mod filter;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod render;
mod substitute;

pub use auto_render::{AutoRender, MathInElement};
pub use engine::MathEngine;
pub use error::{FilterError, MathError};
pub use filter::{AsciiMathFilter, MathExtension, MathRenderFilter, OutputFilter};
pub use mdmath_asciimath::{AsciiMathToTex, AsciiMathTranslator};
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockEngine, RenderCall};
pub use render::{MathCodeKind, MathRenderer};
pub use substitute::{delimiter_pattern, substitute_ascii_math};
