// src/render/output.rs
// =============================================================================
// Turns a HighlightResult into something to print:
// - ansi:  24-bit terminal colours, one escape per token
// - plain: the text as is
// - html:  <pre> with one <div> per line and one <span> per token
// - json:  the HighlightResult itself
// =============================================================================

use std::fmt::Write as _;

use anyhow::Result;
use clap::ValueEnum;
use maud::html;

use super::highlight::{HighlightResult, HighlightStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Ansi,
    Plain,
    Html,
    Json,
}

pub fn render(result: &HighlightResult, format: OutputFormat) -> Result<String> {
    Ok(match format {
        OutputFormat::Ansi => to_ansi(result),
        OutputFormat::Plain => result.text(),
        OutputFormat::Html => to_html(result),
        OutputFormat::Json => serde_json::to_string_pretty(result)?,
    })
}

pub fn to_ansi(result: &HighlightResult) -> String {
    let mut out = String::new();
    for (i, line) in result.lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for span in &line.spans {
            let _ = write!(out, "{}{}", ansi_prefix(&span.style), span.content);
        }
        out.push_str("\x1b[0m");
    }
    out
}

fn ansi_prefix(style: &HighlightStyle) -> String {
    let mut codes = vec!["0".to_string()];
    if style.bold {
        codes.push("1".to_string());
    }
    if style.italic {
        codes.push("3".to_string());
    }
    if style.underline {
        codes.push("4".to_string());
    }
    if let Some(fg) = style.foreground {
        codes.push(format!("38;2;{};{};{}", fg.r, fg.g, fg.b));
    }
    format!("\x1b[{}m", codes.join(";"))
}

/// Renders the prism-style markup: `<pre>` holding a `<div>` per line, each
/// holding a `<span>` per token. maud escapes the token text.
pub fn to_html(result: &HighlightResult) -> String {
    let background = result
        .background
        .map(|bg| format!("background-color:{}", bg.to_hex()));

    html! {
        pre class="github-snippet" data-theme=(result.theme) style=[background] {
            @for line in &result.lines {
                div class="token-line" {
                    @for span in &line.spans {
                        span class="token" style=[span_css(&span.style)] { (span.content) }
                    }
                    // keep empty lines one line tall
                    @if line.spans.is_empty() {
                        "\n"
                    }
                }
            }
        }
    }
    .into_string()
}

fn span_css(style: &HighlightStyle) -> Option<String> {
    let mut css = Vec::new();
    if let Some(fg) = style.foreground {
        css.push(format!("color:{}", fg.to_hex()));
    }
    if style.bold {
        css.push("font-weight:bold".to_string());
    }
    if style.italic {
        css.push("font-style:italic".to_string());
    }
    if style.underline {
        css.push("text-decoration:underline".to_string());
    }
    if css.is_empty() {
        None
    } else {
        Some(css.join(";"))
    }
}
