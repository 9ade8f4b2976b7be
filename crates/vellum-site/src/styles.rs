//! Generated stylesheet: theme tokens followed by the base styles.

use vellum_config::ThemeTokens;

/// Stylesheet location relative to the output directory.
pub const STYLESHEET_PATH: &str = "assets/style.css";

/// Layout and typography. Colors come from the theme custom properties.
const BASE_CSS: &str = r"
*, *::before, *::after { box-sizing: border-box; }

html {
  color-scheme: light;
  font-family: Inter, ui-sans-serif, system-ui, -apple-system, sans-serif;
  line-height: 1.6;
}

html.dark { color-scheme: dark; }

body {
  margin: 0;
  background: var(--c-bg);
  color: var(--c-text-1);
}

html.dark body {
  background: var(--c-bg-dark);
  color: var(--c-text-dark-1);
}

a { color: var(--c-brand-1); text-decoration: none; }
a:hover { color: var(--c-brand-2); }

.nav-bar {
  display: flex;
  align-items: center;
  gap: 24px;
  height: 64px;
  padding: 0 32px;
  border-bottom: 1px solid var(--c-divider);
}

.nav-bar-title {
  font-weight: 600;
  font-size: 16px;
  color: var(--home-hero-name-color);
  background-color: var(--home-hero-name-color);
  background-image: var(--home-hero-name-background);
  -webkit-background-clip: text;
  background-clip: text;
  -webkit-text-fill-color: transparent;
}

.nav-bar-links { display: flex; gap: 20px; margin-left: auto; }
.nav-bar-links a { color: inherit; font-size: 14px; font-weight: 500; }
.nav-bar-links a.active, .sidebar a.active { color: var(--c-brand-1); }

.social-links { display: flex; gap: 12px; }
.social-link { color: inherit; font-size: 13px; }

.layout { display: flex; max-width: 1440px; margin: 0 auto; }

.sidebar {
  flex: 0 0 272px;
  padding: 24px 32px;
  border-right: 1px solid var(--c-divider);
}

.sidebar summary { font-weight: 700; font-size: 14px; cursor: pointer; padding: 4px 0; }
.sidebar ul { list-style: none; margin: 0 0 16px; padding: 0; }
.sidebar li a { display: block; padding: 4px 0; color: inherit; font-size: 14px; }

.content { flex: 1; min-width: 0; padding: 32px 48px; }

.aside { flex: 0 0 224px; padding: 32px 16px; font-size: 13px; }
.aside ul { list-style: none; margin: 0; padding: 0; }
.aside li.level-3 { padding-left: 12px; }
.aside-title { font-weight: 600; margin: 0 0 8px; }

.vp-doc h1, .vp-doc h2, .vp-doc h3 { position: relative; line-height: 1.3; }
.vp-doc h2 { margin-top: 48px; padding-top: 24px; border-top: 1px solid var(--c-divider); }
.header-anchor { opacity: 0; margin-left: 6px; }
h1:hover .header-anchor, h2:hover .header-anchor, h3:hover .header-anchor { opacity: 1; }

.vp-doc pre {
  overflow-x: auto;
  padding: 16px 20px;
  border-radius: 8px;
  background: rgba(142, 150, 170, 0.14);
}

.vp-doc table { border-collapse: collapse; display: block; overflow-x: auto; }
.vp-doc th, .vp-doc td { border: 1px solid var(--c-divider); padding: 8px 16px; }

.custom-block { border-radius: 8px; padding: 16px 16px 8px; margin: 16px 0; border: 1px solid transparent; }
.custom-block-title { font-weight: 600; margin: 0; }
.custom-block.info { border-color: var(--c-divider); }
.custom-block.tip { border-color: var(--c-brand-3); }
.custom-block.warning { border-color: #e2c04a; }
.custom-block.danger { border-color: #f43f5e; }

pre.mermaid { background: transparent; text-align: center; }

.highlight pre { overflow-x: auto; padding: 16px 20px; border-radius: 8px; }
.highlight-dark { display: none; }
html.dark .highlight-light { display: none; }
html.dark .highlight-dark { display: block; }
";

/// Build the site stylesheet for the given theme.
#[must_use]
pub fn stylesheet(theme: &ThemeTokens) -> String {
    let block = theme.css_block();
    let mut css = String::with_capacity(block.len() + BASE_CSS.len());
    css.push_str(&block);
    css.push_str(BASE_CSS);
    css
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn test_stylesheet_starts_with_theme_block() {
        let css = stylesheet(&ThemeTokens::default());
        assert!(css.starts_with(":root {\n  --c-bg: #ffffff;"));
        assert!(css.contains(".nav-bar"));
    }

    #[test]
    fn test_nav_title_paints_hero_name_background() {
        let css = stylesheet(&ThemeTokens::default());
        let start = css.find(".nav-bar-title {").unwrap();
        let rule = &css[start..start + css[start..].find('}').unwrap()];
        assert!(rule.contains("background-color: var(--home-hero-name-color);"));
        assert!(rule.contains("background-image: var(--home-hero-name-background);"));
        assert!(rule.contains("background-clip: text;"));
        assert!(rule.contains("-webkit-text-fill-color: transparent;"));
    }

    #[test]
    fn test_highlight_variant_follows_dark_class() {
        let css = stylesheet(&ThemeTokens::default());
        assert!(css.contains(".highlight-dark { display: none; }"));
        assert!(css.contains("html.dark .highlight-light { display: none; }"));
        assert!(css.contains("html.dark .highlight-dark { display: block; }"));
    }

    #[test]
    fn test_stylesheet_uses_overrides() {
        let theme = ThemeTokens::new(BTreeMap::from([(
            "c-brand-1".to_owned(),
            "#e11d48".to_owned(),
        )]));
        let css = stylesheet(&theme);
        assert!(css.contains("--c-brand-1: #e11d48;"));
        assert!(!css.contains("#3451b2"));
    }
}
