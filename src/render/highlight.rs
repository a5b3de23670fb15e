// src/render/highlight.rs
// =============================================================================
// Syntax highlighting built on syntect.
//
// The output mirrors what a presentation layer needs: one entry per source
// line, each an ordered list of styled tokens. Syntax and theme sets are
// loaded once per process and shared between highlighters.
// =============================================================================

use std::sync::{Arc, OnceLock};

use serde::Serialize;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Style as SyntectStyle, Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::config::DEFAULT_THEME;

static DEFAULT_ASSETS: OnceLock<(Arc<SyntaxSet>, Arc<ThemeSet>)> = OnceLock::new();

fn default_assets() -> &'static (Arc<SyntaxSet>, Arc<ThemeSet>) {
    DEFAULT_ASSETS.get_or_init(|| {
        (
            Arc::new(SyntaxSet::load_defaults_newlines()),
            Arc::new(ThemeSet::load_defaults()),
        )
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct HighlightStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground: Option<RgbColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<RgbColor>,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    pub content: String,
    pub style: HighlightStyle,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightLine {
    pub spans: Vec<HighlightSpan>,
}

impl HighlightLine {
    /// The line's text without styling.
    pub fn text(&self) -> String {
        self.spans.iter().map(|span| span.content.as_str()).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HighlightMode {
    Highlighted,
    Plain,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightResult {
    pub lines: Vec<HighlightLine>,
    /// Grammar name actually used, `None` when the text was left plain.
    pub language: Option<String>,
    pub theme: String,
    /// Page background of the theme, for the `<pre>` block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<RgbColor>,
    pub mode: HighlightMode,
}

impl HighlightResult {
    fn plain(text: &str, theme: String, background: Option<RgbColor>) -> Self {
        HighlightResult {
            lines: text
                .split('\n')
                .map(|line| HighlightLine {
                    spans: vec![HighlightSpan {
                        content: line.to_string(),
                        style: HighlightStyle::default(),
                    }],
                })
                .collect(),
            language: None,
            theme,
            background,
            mode: HighlightMode::Plain,
        }
    }

    /// The text back, lines joined with `'\n'`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(HighlightLine::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Highlights text with one fixed theme.
#[derive(Debug, Clone)]
pub struct Highlighter {
    syntax_set: Arc<SyntaxSet>,
    theme_set: Arc<ThemeSet>,
    theme: String,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new(DEFAULT_THEME)
    }
}

impl Highlighter {
    /// Unknown theme names fall back to the default theme with a warning.
    pub fn new(theme: &str) -> Self {
        let (syntax_set, theme_set) = default_assets();
        let theme = resolve_theme_name(theme_set, theme);
        Self {
            syntax_set: Arc::clone(syntax_set),
            theme_set: Arc::clone(theme_set),
            theme,
        }
    }

    pub fn theme_name(&self) -> &str {
        &self.theme
    }

    pub fn available_themes(&self) -> Vec<String> {
        let mut themes: Vec<_> = self.theme_set.themes.keys().cloned().collect();
        themes.sort();
        themes
    }

    /// Highlights `text` as `language` (a grammar name or file extension).
    ///
    /// The result has exactly one line per `'\n'`-separated line of `text`.
    /// Unknown languages produce plain, unstyled lines.
    pub fn highlight(&self, text: &str, language: &str) -> HighlightResult {
        let theme = self.theme();
        let background = theme.settings.background.and_then(convert_color);

        let Some(syntax) = self.syntax_for_language(language) else {
            tracing::debug!(language, "no grammar for language, rendering plain");
            return HighlightResult::plain(text, self.theme.clone(), background);
        };

        match self.highlight_with_syntax(text, theme, syntax) {
            Ok(lines) => HighlightResult {
                lines,
                language: Some(syntax.name.clone()),
                theme: self.theme.clone(),
                background,
                mode: HighlightMode::Highlighted,
            },
            Err(err) => {
                tracing::warn!(error = %err, language, "highlight failed");
                HighlightResult::plain(text, self.theme.clone(), background)
            }
        }
    }

    fn highlight_with_syntax(
        &self,
        text: &str,
        theme: &Theme,
        syntax: &SyntaxReference,
    ) -> Result<Vec<HighlightLine>, syntect::Error> {
        let mut highlighter = HighlightLines::new(syntax, theme);
        let mut result = Vec::new();
        // the newline grammars expect each line to end with '\n'
        let mut buf = String::new();
        for line in text.split('\n') {
            buf.clear();
            buf.push_str(line);
            buf.push('\n');
            let segments = highlighter.highlight_line(&buf, &self.syntax_set)?;
            let spans = segments
                .into_iter()
                .filter_map(|(style, piece)| {
                    let content = piece.strip_suffix('\n').unwrap_or(piece);
                    (!content.is_empty()).then(|| HighlightSpan {
                        content: content.to_string(),
                        style: convert_style(style),
                    })
                })
                .collect();
            result.push(HighlightLine { spans });
        }
        Ok(result)
    }

    fn syntax_for_language(&self, language: &str) -> Option<&SyntaxReference> {
        let language = language.trim();
        if language.is_empty() {
            return None;
        }
        self.syntax_set
            .find_syntax_by_token(language)
            .or_else(|| self.syntax_set.find_syntax_by_name(language))
    }

    fn theme(&self) -> &Theme {
        // resolve_theme_name only returns keys present in the set
        &self.theme_set.themes[&self.theme]
    }
}

fn resolve_theme_name(theme_set: &ThemeSet, requested: &str) -> String {
    if theme_set.themes.contains_key(requested) {
        return requested.to_string();
    }
    if let Some(name) = theme_set
        .themes
        .keys()
        .find(|name| name.eq_ignore_ascii_case(requested))
    {
        return name.clone();
    }

    let fallback = if theme_set.themes.contains_key(DEFAULT_THEME) {
        DEFAULT_THEME.to_string()
    } else {
        // ThemeSet::load_defaults always ships InspiredGitHub; this is for
        // hand-built sets
        theme_set
            .themes
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| DEFAULT_THEME.to_string())
    };
    tracing::warn!(requested, fallback = %fallback, "theme not found");
    fallback
}

fn convert_style(style: SyntectStyle) -> HighlightStyle {
    HighlightStyle {
        foreground: convert_color(style.foreground),
        background: None,
        bold: style.font_style.contains(FontStyle::BOLD),
        italic: style.font_style.contains(FontStyle::ITALIC),
        underline: style.font_style.contains(FontStyle::UNDERLINE),
    }
}

fn convert_color(color: Color) -> Option<RgbColor> {
    if color.a == 0 {
        None
    } else {
        Some(RgbColor {
            r: color.r,
            g: color.g,
            b: color.b,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_theme_is_github_like() {
        let highlighter = Highlighter::default();
        assert_eq!(highlighter.theme_name(), "InspiredGitHub");
        assert!(highlighter
            .available_themes()
            .iter()
            .any(|theme| theme == "InspiredGitHub"));
    }

    #[test]
    fn test_highlight_rust_produces_tokens() {
        let highlighter = Highlighter::default();
        let result = highlighter.highlight("fn main() {\n    println!(\"hi\");\n}", "rust");

        assert_eq!(result.mode, HighlightMode::Highlighted);
        assert_eq!(result.language.as_deref(), Some("Rust"));
        assert_eq!(result.lines.len(), 3);
        assert!(result.lines[0].spans.len() > 1);
        assert_eq!(result.text(), "fn main() {\n    println!(\"hi\");\n}");
    }

    #[test]
    fn test_extension_token_resolves() {
        let highlighter = Highlighter::default();
        let result = highlighter.highlight("x = 1", "py");
        assert_eq!(result.language.as_deref(), Some("Python"));
    }

    #[test]
    fn test_unknown_language_is_plain() {
        let highlighter = Highlighter::default();
        let result = highlighter.highlight("a\nb", "no-such-language");
        assert_eq!(result.mode, HighlightMode::Plain);
        assert_eq!(result.lines.len(), 2);
        assert_eq!(result.text(), "a\nb");
    }

    #[test]
    fn test_empty_lines_are_kept() {
        let highlighter = Highlighter::default();
        let result = highlighter.highlight("let a = 1;\n\nlet b = 2;\n", "rust");
        assert_eq!(result.lines.len(), 4);
        assert!(result.lines[1].spans.is_empty());
        assert!(result.lines[3].spans.is_empty());
    }

    #[test]
    fn test_unknown_theme_falls_back() {
        let highlighter = Highlighter::new("not-a-theme");
        assert_eq!(highlighter.theme_name(), DEFAULT_THEME);
    }

    #[test]
    fn test_theme_lookup_ignores_case() {
        let highlighter = Highlighter::new("inspiredgithub");
        assert_eq!(highlighter.theme_name(), "InspiredGitHub");
    }
}
