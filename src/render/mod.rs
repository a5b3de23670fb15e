// src/render/mod.rs
// =============================================================================
// Presentation of loaded snippets.
//
// - highlight: syntect-based tokenizer producing styled lines and tokens
// - output: ANSI, plain, HTML and JSON renderings of a HighlightResult
// - layout: the standalone page with the consent banner
// =============================================================================

mod highlight;
mod layout;
mod output;

pub use highlight::{
    HighlightLine, HighlightMode, HighlightResult, HighlightSpan, HighlightStyle, Highlighter,
    RgbColor,
};
pub use layout::{ConsentBanner, Layout, CONSENT_MESSAGE};
pub use output::{render, to_ansi, to_html, OutputFormat};
