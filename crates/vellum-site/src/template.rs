//! HTML page template for static site generation.
//!
//! [`SiteLayout`] holds everything that is the same on every page (head
//! injection list, navigation, sidebar) and is built once per build.

use std::fmt::Write;

use vellum_config::{Appearance, NavItem, SidebarSection, SiteConfig, SocialLink};
use vellum_renderer::{HeadTag, TocEntry, escape_html};

use crate::head::assemble_head;
use crate::page::RenderedPage;
use crate::search::SearchHandle;
use crate::styles::STYLESHEET_PATH;

/// Follows the reader's color scheme preference before first paint.
const APPEARANCE_SCRIPT: &str = "(()=>{const d=document.documentElement;\
if(window.matchMedia('(prefers-color-scheme: dark)').matches){d.classList.add('dark')}})()";

/// Site-wide page chrome.
#[derive(Debug)]
pub struct SiteLayout {
    site_title: String,
    description: String,
    base: String,
    appearance: Appearance,
    search_meta: HeadTag,
    head: Vec<HeadTag>,
    nav: Vec<NavItem>,
    sidebar: Vec<SidebarSection>,
    social_links: Vec<SocialLink>,
}

impl SiteLayout {
    /// Build the layout from configuration.
    ///
    /// `extension_head` holds the head tags required by markdown extensions.
    #[must_use]
    pub fn new(config: &SiteConfig, extension_head: Vec<HeadTag>, search: &SearchHandle) -> Self {
        let links = config.links();
        Self {
            site_title: config.title.clone(),
            description: config.description.clone(),
            base: config.base.clone(),
            appearance: config.appearance,
            search_meta: search.head_tag(&config.base),
            head: assemble_head(&config.head, extension_head),
            nav: links.nav(),
            sidebar: links.sidebar(),
            social_links: config.social_links.clone(),
        }
    }

    /// Head injection list in output order.
    #[must_use]
    pub fn head(&self) -> &[HeadTag] {
        &self.head
    }

    /// Render a complete HTML page.
    #[must_use]
    pub fn render_page(&self, page: &RenderedPage) -> String {
        let mut html = String::with_capacity(8192 + page.content.len());

        let html_class = match self.appearance {
            Appearance::Dark => " class=\"dark\"",
            Appearance::Light | Appearance::Auto => "",
        };
        let _ = writeln!(html, "<!DOCTYPE html>\n<html lang=\"en\"{html_class}>\n<head>");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str(
            "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        );
        let _ = writeln!(html, "<title>{}</title>", escape_html(&self.document_title(page)));
        let description = page.description.as_deref().unwrap_or(&self.description);
        if !description.is_empty() {
            let _ = writeln!(
                html,
                "<meta name=\"description\" content=\"{}\">",
                escape_html(description)
            );
        }
        let _ = writeln!(
            html,
            "<link rel=\"stylesheet\" href=\"{}{STYLESHEET_PATH}\">",
            self.base
        );
        if self.appearance == Appearance::Auto {
            let _ = writeln!(html, "<script>{APPEARANCE_SCRIPT}</script>");
        }
        self.search_meta.render(&mut html);
        html.push('\n');
        for tag in &self.head {
            tag.render(&mut html);
            html.push('\n');
        }
        html.push_str("</head>\n<body>\n");

        self.render_nav_bar(&mut html, &page.url);

        html.push_str("<div class=\"layout\">\n");
        self.render_sidebar(&mut html, &page.url);
        html.push_str("<main class=\"content\">\n<article class=\"vp-doc\">\n");
        html.push_str(&page.content);
        html.push_str("\n</article>\n</main>\n");
        render_toc(&mut html, &page.toc);
        html.push_str("</div>\n</body>\n</html>\n");
        html
    }

    fn document_title(&self, page: &RenderedPage) -> String {
        if page.title.is_empty() || page.title == self.site_title {
            self.site_title.clone()
        } else {
            format!("{} | {}", page.title, self.site_title)
        }
    }

    fn render_nav_bar(&self, html: &mut String, current_url: &str) {
        html.push_str("<header class=\"nav-bar\">\n");
        let _ = writeln!(
            html,
            "<a class=\"nav-bar-title\" href=\"{}\">{}</a>",
            escape_html(&self.base),
            escape_html(&self.site_title)
        );

        html.push_str("<nav class=\"nav-bar-links\">\n");
        for item in &self.nav {
            render_link(html, item, current_url);
        }
        html.push_str("</nav>\n");

        if !self.social_links.is_empty() {
            html.push_str("<div class=\"social-links\">\n");
            for social in &self.social_links {
                let icon = escape_html(&social.icon);
                let _ = writeln!(
                    html,
                    "<a class=\"social-link\" href=\"{}\" aria-label=\"{icon}\" data-icon=\"{icon}\" \
                     target=\"_blank\" rel=\"noopener\">{icon}</a>",
                    escape_html(&social.link),
                );
            }
            html.push_str("</div>\n");
        }
        html.push_str("</header>\n");
    }

    fn render_sidebar(&self, html: &mut String, current_url: &str) {
        if self.sidebar.is_empty() {
            return;
        }
        html.push_str("<aside class=\"sidebar\">\n<nav>\n");
        for section in &self.sidebar {
            let open = if section.collapsed { "" } else { " open" };
            let _ = writeln!(
                html,
                "<details class=\"sidebar-section\"{open}>\n<summary>{}</summary>\n<ul>",
                escape_html(&section.text)
            );
            for item in &section.items {
                html.push_str("<li>");
                render_link(html, item, current_url);
                html.push_str("</li>\n");
            }
            html.push_str("</ul>\n</details>\n");
        }
        html.push_str("</nav>\n</aside>\n");
    }
}

/// Render a navigation link, marking it active when it targets the current page.
fn render_link(html: &mut String, item: &NavItem, current_url: &str) {
    let class = if is_active(&item.link, current_url) {
        " class=\"active\""
    } else {
        ""
    };
    let _ = writeln!(
        html,
        "<a href=\"{}\"{class}>{}</a>",
        escape_html(&item.link),
        escape_html(&item.text)
    );
}

fn is_active(link: &str, current_url: &str) -> bool {
    let path = link.split(['#', '?']).next().unwrap_or(link);
    path.starts_with('/') && path.trim_end_matches('/') == current_url.trim_end_matches('/')
}

/// Render the table of contents aside.
fn render_toc(html: &mut String, toc: &[TocEntry]) {
    if toc.is_empty() {
        return;
    }
    html.push_str("<aside class=\"aside\">\n<p class=\"aside-title\">On this page</p>\n<ul>\n");
    for entry in toc {
        let _ = writeln!(
            html,
            "<li class=\"level-{}\"><a href=\"#{}\">{}</a></li>",
            entry.level,
            escape_html(&entry.id),
            escape_html(&entry.title),
        );
    }
    html.push_str("</ul>\n</aside>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
title = "Bounty Handbook"
description = "Operator docs"
base = "/docs/"
nav = [{ text = "Guide", link = "/guide/" }, { text = "GitHub", link = "https://github.com/acme" }]

[[sidebar]]
text = "Introduction"
items = [{ text = "Setup", link = "/guide/setup" }]

[[sidebar]]
text = "Reference"
collapsed = true
items = [{ text = "API", link = "/api" }]

[[head]]
tag = "link"
attrs = { rel = "icon", href = "/favicon.svg" }

[[social_links]]
icon = "github"
link = "https://github.com/acme"
"#;

    fn layout(source: &str) -> SiteLayout {
        let config = SiteConfig::from_toml_str(source).unwrap();
        SiteLayout::new(
            &config,
            vec![HeadTag::new("script").with_attr("src", "https://cdn.example.com/m.js")],
            &SearchHandle::Local,
        )
    }

    fn page(url: &str, title: &str) -> RenderedPage {
        RenderedPage {
            url_path: url.trim_matches('/').to_owned(),
            url: url.to_owned(),
            title: title.to_owned(),
            description: None,
            content: "<p>Hello world</p>".to_owned(),
            toc: vec![TocEntry {
                level: 2,
                title: "Install".to_owned(),
                id: "install".to_owned(),
            }],
            warnings: Vec::new(),
            extracted_blocks: 0,
        }
    }

    #[test]
    fn test_render_page_contains_content_and_title() {
        let html = layout(CONFIG).render_page(&page("/docs/guide/setup/", "Setup"));
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"en\">\n"));
        assert!(html.contains("<title>Setup | Bounty Handbook</title>"));
        assert!(html.contains("<p>Hello world</p>"));
        assert!(html.contains(r#"<meta name="description" content="Operator docs">"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="/docs/assets/style.css">"#));
    }

    #[test]
    fn test_head_order() {
        let html = layout(CONFIG).render_page(&page("/docs/", "Bounty Handbook"));
        let search = html.find("vellum-search-index").unwrap();
        let icon = html.find("favicon.svg").unwrap();
        let script = html.find("cdn.example.com/m.js").unwrap();
        assert!(search < icon);
        assert!(icon < script);
        assert!(script < html.find("</head>").unwrap());
        assert!(html.contains("<title>Bounty Handbook</title>"));
    }

    #[test]
    fn test_nav_links_resolved_and_active() {
        let html = layout(CONFIG).render_page(&page("/docs/guide/", "Guide"));
        assert!(html.contains(r#"<a href="/docs/guide/" class="active">Guide</a>"#));
        assert!(html.contains(r#"<a href="https://github.com/acme">GitHub</a>"#));
    }

    #[test]
    fn test_sidebar_sections() {
        let html = layout(CONFIG).render_page(&page("/docs/guide/setup/", "Setup"));
        assert!(html.contains(
            "<details class=\"sidebar-section\" open>\n<summary>Introduction</summary>"
        ));
        assert!(html.contains("<details class=\"sidebar-section\">\n<summary>Reference</summary>"));
        assert!(html.contains(r#"<a href="/docs/guide/setup" class="active">Setup</a>"#));
        let intro = html.find("Introduction").unwrap();
        let reference = html.find("Reference").unwrap();
        assert!(intro < reference);
    }

    #[test]
    fn test_empty_sidebar_omitted() {
        let html = layout(
            r#"title = "T"
nav = [{ text = "Home", link = "/" }]"#,
        )
        .render_page(&page("/", "T"));
        assert!(!html.contains("class=\"sidebar\""));
    }

    #[test]
    fn test_social_links() {
        let html = layout(CONFIG).render_page(&page("/docs/", "Home"));
        assert!(html.contains(r#"data-icon="github""#));
    }

    #[test]
    fn test_toc_rendered() {
        let html = layout(CONFIG).render_page(&page("/docs/", "Home"));
        assert!(html.contains(r##"<li class="level-2"><a href="#install">Install</a></li>"##));
    }

    #[test]
    fn test_appearance() {
        let auto = layout(CONFIG).render_page(&page("/docs/", "Home"));
        assert!(auto.contains("prefers-color-scheme: dark"));

        let dark = layout(
            r#"title = "T"
appearance = "dark"
nav = []"#,
        )
        .render_page(&page("/", "T"));
        assert!(dark.contains("<html lang=\"en\" class=\"dark\">"));
        assert!(!dark.contains("prefers-color-scheme"));
    }

    #[test]
    fn test_page_description_overrides_site() {
        let mut page = page("/docs/", "Home");
        page.description = Some("Page \"quoted\"".to_owned());
        let html = layout(CONFIG).render_page(&page);
        assert!(html.contains(r#"<meta name="description" content="Page &quot;quoted&quot;">"#));
    }

    #[test]
    fn test_is_active() {
        assert!(is_active("/guide/", "/guide/"));
        assert!(is_active("/guide", "/guide/"));
        assert!(is_active("/guide/#intro", "/guide/"));
        assert!(!is_active("https://example.com/guide/", "/guide/"));
        assert!(!is_active("/api", "/guide/"));
    }
}
