//! Syntax highlighting with a light and a dark theme.
//!
//! Each highlighted block is emitted twice, once per theme, inside
//! `highlight-light` / `highlight-dark` wrappers. The page stylesheet shows
//! the one matching the `dark` class on `<html>`.

use std::fmt::Write;
use std::sync::LazyLock;

use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::state::escape_html;

/// Light theme used when none is configured.
pub const DEFAULT_LIGHT_THEME: &str = "InspiredGitHub";
/// Dark theme used when none is configured.
pub const DEFAULT_DARK_THEME: &str = "base16-ocean.dark";

static SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

/// Error raised when a highlighter cannot be built.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The theme name is not one of the bundled themes.
    #[error("Unknown code theme '{name}' (available: {available})")]
    UnknownTheme {
        /// Theme name from configuration.
        name: String,
        /// Bundled theme names, comma-separated.
        available: String,
    },
}

/// Highlights fenced code in both color schemes.
#[derive(Clone, Debug)]
pub struct CodeHighlighter {
    light: Theme,
    dark: Theme,
}

impl CodeHighlighter {
    /// Create a highlighter from bundled theme names.
    ///
    /// # Errors
    ///
    /// Returns [`HighlightError::UnknownTheme`] naming the first theme that
    /// is not bundled.
    pub fn new(light: &str, dark: &str) -> Result<Self, HighlightError> {
        Ok(Self {
            light: bundled_theme(light)?,
            dark: bundled_theme(dark)?,
        })
    }

    /// Bundled theme names in sorted order.
    pub fn theme_names() -> impl Iterator<Item = &'static str> {
        THEMES.themes.keys().map(String::as_str)
    }

    /// Highlight `code` as `lang`.
    ///
    /// Returns `None` when no bundled syntax matches the language, so the
    /// caller can fall back to a plain code block.
    #[must_use]
    pub fn highlight(&self, lang: &str, code: &str) -> Option<String> {
        let syntax = SYNTAXES.find_syntax_by_token(lang)?;
        let light = highlighted_html_for_string(code, &SYNTAXES, syntax, &self.light).ok()?;
        let dark = highlighted_html_for_string(code, &SYNTAXES, syntax, &self.dark).ok()?;

        let mut html = String::with_capacity(light.len() + dark.len() + 128);
        let _ = write!(
            html,
            r#"<div class="language-{} highlight"><div class="highlight-light">{light}</div><div class="highlight-dark">{dark}</div></div>"#,
            escape_html(lang)
        );
        Some(html)
    }
}

impl Default for CodeHighlighter {
    fn default() -> Self {
        Self {
            light: THEMES.themes[DEFAULT_LIGHT_THEME].clone(),
            dark: THEMES.themes[DEFAULT_DARK_THEME].clone(),
        }
    }
}

fn bundled_theme(name: &str) -> Result<Theme, HighlightError> {
    THEMES
        .themes
        .get(name)
        .cloned()
        .ok_or_else(|| HighlightError::UnknownTheme {
            name: name.to_owned(),
            available: CodeHighlighter::theme_names().collect::<Vec<_>>().join(", "),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_emits_both_themes() {
        let html = CodeHighlighter::default()
            .highlight("rust", "fn main() {}\n")
            .unwrap();
        assert!(html.starts_with(r#"<div class="language-rust highlight"><div class="highlight-light">"#));
        assert!(html.contains("background-color:#ffffff"));
        assert!(html.contains("background-color:#2b303b"));
        assert!(html.contains("<span style="));
        assert_eq!(html.matches("main").count(), 2);
    }

    #[test]
    fn test_highlight_escapes_source() {
        let html = CodeHighlighter::default()
            .highlight("rust", "let ok = 1 < 2;\n")
            .unwrap();
        assert!(html.contains("&lt;"));
        assert!(!html.contains("1 < 2"));
    }

    #[test]
    fn test_unknown_language_is_none() {
        assert_eq!(
            CodeHighlighter::default().highlight("not-a-language", "x"),
            None
        );
    }

    #[test]
    fn test_configured_themes() {
        let highlighter = CodeHighlighter::new("Solarized (light)", "Solarized (dark)").unwrap();
        let html = highlighter.highlight("python", "def a():\n    pass\n").unwrap();
        assert!(html.contains("highlight-dark"));
        assert!(!html.contains("background-color:#ffffff"));
    }

    #[test]
    fn test_unknown_theme_lists_available() {
        let err = CodeHighlighter::new("github-light", DEFAULT_DARK_THEME).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("'github-light'"));
        assert!(message.contains("InspiredGitHub"));
    }

    #[test]
    fn test_default_themes_are_bundled() {
        let names: Vec<_> = CodeHighlighter::theme_names().collect();
        assert!(names.contains(&DEFAULT_LIGHT_THEME));
        assert!(names.contains(&DEFAULT_DARK_THEME));
    }
}
