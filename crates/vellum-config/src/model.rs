//! Resolved configuration types.

use serde::Deserialize;
use vellum_renderer::{DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME};

/// A navigation link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavItem {
    /// Link label. Need not be unique.
    pub text: String,
    /// Site path or absolute URL.
    pub link: String,
}

/// A named group of sidebar links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SidebarSection {
    /// Section heading.
    pub text: String,
    /// Links in declaration order.
    pub items: Vec<NavItem>,
    /// Whether the section starts collapsed.
    pub collapsed: bool,
}

/// Search provider selection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchConfig {
    /// Index built at build time and queried in the browser.
    #[default]
    Local,
    /// Queries sent to a hosted search service.
    External {
        /// Service endpoint (`http://` or `https://`).
        endpoint: String,
    },
}

impl SearchConfig {
    /// Provider identifier as written in configuration.
    #[must_use]
    pub fn provider(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::External { .. } => "external",
        }
    }
}

/// Markdown pipeline settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownConfig {
    /// Extension identifiers in application order.
    pub extensions: Vec<String>,
    /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists, alerts).
    pub gfm: bool,
    /// Syntax highlighting themes.
    pub theme: CodeTheme,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            gfm: true,
            theme: CodeTheme::default(),
        }
    }
}

/// Bundled syntax highlighting theme per color scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTheme {
    /// Theme shown without the `dark` class.
    pub light: String,
    /// Theme shown under `html.dark`.
    pub dark: String,
}

impl Default for CodeTheme {
    fn default() -> Self {
        Self {
            light: DEFAULT_LIGHT_THEME.to_owned(),
            dark: DEFAULT_DARK_THEME.to_owned(),
        }
    }
}

/// Icon link rendered in the page header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SocialLink {
    /// Icon name (`github`, `discord`, ...).
    pub icon: String,
    /// Target URL.
    pub link: String,
}

/// Color scheme of rendered pages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Appearance {
    /// Always light.
    Light,
    /// Always dark.
    Dark,
    /// Follow the reader's `prefers-color-scheme`.
    #[default]
    Auto,
}
