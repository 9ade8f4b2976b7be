//! Navigation link normalization against the site base.

use crate::{NavItem, SidebarSection, SiteConfig};

/// Resolve a configured link against the site base.
///
/// - `https://…`, `mailto:…`, `//host/…` and `#fragment` are returned unchanged
/// - `/guide/` becomes `{base}guide/`
/// - `guide/`, `./guide/` become `{base}guide/`, with `..` popping segments
/// - relative links climbing above the site root are returned unchanged
///
/// Query strings and fragments are preserved.
#[must_use]
pub fn normalize_link(link: &str, base: &str) -> String {
    if is_external(link) || link.starts_with('#') {
        return link.to_owned();
    }

    let split = link.find(['?', '#']).unwrap_or(link.len());
    let (path, suffix) = link.split_at(split);
    let trailing_slash = path.ends_with('/') || path.is_empty();

    let mut segments: Vec<&str> = Vec::new();
    for component in path.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() && !path.starts_with('/') {
                    return link.to_owned();
                }
            }
            _ => segments.push(component),
        }
    }

    let base = base.trim_end_matches('/');
    let mut out = format!("{base}/{}", segments.join("/"));
    if trailing_slash && !segments.is_empty() {
        out.push('/');
    }
    out.push_str(suffix);
    out
}

/// Whether a link points outside the site (`scheme:` or `//`).
fn is_external(link: &str) -> bool {
    if link.starts_with("//") {
        return true;
    }
    match link.find(':') {
        Some(pos) => {
            let scheme = &link[..pos];
            !scheme.is_empty()
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

/// Read-only view of navigation and sidebar with resolved links.
///
/// Entries are exposed in declaration order.
pub struct LinkResolver<'a> {
    config: &'a SiteConfig,
}

impl<'a> LinkResolver<'a> {
    /// Create a resolver over a loaded configuration.
    #[must_use]
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Top-level navigation with resolved links.
    #[must_use]
    pub fn nav(&self) -> Vec<NavItem> {
        self.config.nav.iter().map(|item| self.resolve(item)).collect()
    }

    /// Sidebar sections with resolved item links.
    #[must_use]
    pub fn sidebar(&self) -> Vec<SidebarSection> {
        self.config
            .sidebar
            .iter()
            .map(|section| SidebarSection {
                text: section.text.clone(),
                collapsed: section.collapsed,
                items: section.items.iter().map(|item| self.resolve(item)).collect(),
            })
            .collect()
    }

    /// Resolve one link against the configured base.
    #[must_use]
    pub fn link(&self, link: &str) -> String {
        normalize_link(link, &self.config.base)
    }

    fn resolve(&self, item: &NavItem) -> NavItem {
        NavItem {
            text: item.text.clone(),
            link: self.link(&item.link),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_external_links_unchanged() {
        for link in [
            "https://github.com/acme/handbook",
            "http://example.com",
            "mailto:docs@example.com",
            "//cdn.example.com/a.js",
            "#install",
        ] {
            assert_eq!(normalize_link(link, "/docs/"), link);
        }
    }

    #[test]
    fn test_root_relative_with_base() {
        assert_eq!(normalize_link("/", "/"), "/");
        assert_eq!(normalize_link("/", "/docs/"), "/docs/");
        assert_eq!(normalize_link("/guide/", "/docs/"), "/docs/guide/");
        assert_eq!(normalize_link("/guide/setup", "/"), "/guide/setup");
    }

    #[test]
    fn test_relative_links() {
        assert_eq!(normalize_link("guide/setup", "/"), "/guide/setup");
        assert_eq!(normalize_link("./guide/", "/docs/"), "/docs/guide/");
        assert_eq!(normalize_link("guide/../api", "/"), "/api");
    }

    #[test]
    fn test_relative_above_root_unchanged() {
        assert_eq!(normalize_link("../outside", "/docs/"), "../outside");
    }

    #[test]
    fn test_query_and_fragment_preserved() {
        assert_eq!(
            normalize_link("/guide/setup#requirements", "/docs/"),
            "/docs/guide/setup#requirements"
        );
        assert_eq!(normalize_link("/search?q=a", "/"), "/search?q=a");
    }

    #[test]
    fn test_colon_in_path_is_not_scheme() {
        assert!(!is_external("guide/a:b"));
        assert!(is_external("tel:+123"));
    }
}
