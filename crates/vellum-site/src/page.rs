//! Rendered page data shared by the template, search index and build stats.

use vellum_renderer::TocEntry;

/// A document after markdown rendering, before layout.
#[derive(Clone, Debug)]
pub struct RenderedPage {
    /// URL path relative to the site root (e.g. "", "guide/setup").
    pub url_path: String,
    /// Absolute page URL including the site base (e.g. "/docs/guide/setup/").
    pub url: String,
    /// Title from frontmatter, first H1, or the site title.
    pub title: String,
    /// Description from frontmatter.
    pub description: Option<String>,
    /// Rendered article HTML.
    pub content: String,
    /// Table of contents.
    pub toc: Vec<TocEntry>,
    /// Render warnings.
    pub warnings: Vec<String>,
    /// Code blocks taken over by extensions (e.g. diagrams).
    pub extracted_blocks: usize,
}

/// Page URL for a URL path under `base`.
///
/// `""` maps to `base` itself; other paths get a trailing slash.
#[must_use]
pub fn page_url(base: &str, url_path: &str) -> String {
    if url_path.is_empty() {
        base.to_owned()
    } else {
        format!("{base}{url_path}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_url() {
        assert_eq!(page_url("/", ""), "/");
        assert_eq!(page_url("/", "guide/setup"), "/guide/setup/");
        assert_eq!(page_url("/docs/", "api"), "/docs/api/");
    }
}
