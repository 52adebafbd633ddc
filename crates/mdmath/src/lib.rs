//! Markdown to HTML with TeX and ASCII-math support.
//!
//! This crate hosts the math output filters from `mdmath-renderer` in a
//! pulldown-cmark pipeline:
//!
//! - ```` ```latex ````, ```` ```math ```` and ```` ```asciimath ```` fences
//!   become rendered math
//! - `~...~` spans are translated from ASCII-math to TeX
//! - with [`MathExtension::auto_render`], `$$...$$`, `\[...\]`, `\(...\)`
//!   and `~...~` in running text are rendered too
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use mdmath::{MarkdownPipeline, MathCoreEngine, MathExtension};
//!
//! let engine = Arc::new(MathCoreEngine::new()?);
//! let pipeline = MarkdownPipeline::new()
//!     .with_extension(MathExtension::new(engine).auto_render());
//!
//! let html = pipeline.render("Euler: $$e^{i\\pi} + 1 = 0$$")?;
//! ```
//!
//! # Architecture
//!
//! - [`MarkdownPipeline`]: markdown rendering followed by output filters
//! - [`MathFences`]: iterator adapter marking math fences
//! - [`MathExtension`]: factory for the two math output filters
//! - [`MathCoreEngine`]: TeX to MathML engine (feature `math-core`)

mod fences;
#[cfg(feature = "math-core")]
mod math_core;
mod pipeline;

pub use fences::MathFences;
#[cfg(feature = "math-core")]
pub use math_core::MathCoreEngine;
pub use mdmath_asciimath::{AsciiMathToTex, AsciiMathTranslator, asciimath_to_tex};
pub use mdmath_config::{ConfigError, Delimiter, EffectiveConfig, MathConfig, merge_config};
pub use mdmath_renderer::{
    AutoRender, FilterError, MathCodeKind, MathEngine, MathError, MathExtension,
    MathInElement, OutputFilter,
};
pub use pipeline::{MarkdownPipeline, PipelineError};
