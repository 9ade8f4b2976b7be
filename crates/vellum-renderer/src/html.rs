//! HTML markup for the elements whose output is not a plain tag pair.
//!
//! Produces semantic HTML5: `<pre><code>` for unhighlighted code,
//! `custom-block` containers for alerts, `<img>` for images, and clean URLs
//! for relative `.md` links.

use std::fmt::Write;

use pulldown_cmark::BlockQuoteKind;

use crate::state::escape_html;

/// GitHub-style alert kind (`> [!NOTE]`, `> [!TIP]`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Note,
    Tip,
    Important,
    Warning,
    Caution,
}

impl AlertKind {
    /// CSS class suffix and default title for this alert.
    #[must_use]
    pub fn class_and_title(self) -> (&'static str, &'static str) {
        match self {
            Self::Note => ("info", "NOTE"),
            Self::Tip => ("tip", "TIP"),
            Self::Important => ("important", "IMPORTANT"),
            Self::Warning => ("warning", "WARNING"),
            Self::Caution => ("danger", "CAUTION"),
        }
    }
}

impl From<BlockQuoteKind> for AlertKind {
    fn from(kind: BlockQuoteKind) -> Self {
        match kind {
            BlockQuoteKind::Note => Self::Note,
            BlockQuoteKind::Tip => Self::Tip,
            BlockQuoteKind::Important => Self::Important,
            BlockQuoteKind::Warning => Self::Warning,
            BlockQuoteKind::Caution => Self::Caution,
        }
    }
}

/// Code block without highlighting.
pub(crate) fn code_block(lang: Option<&str>, content: &str, out: &mut String) {
    match lang {
        Some(lang) => {
            let _ = write!(
                out,
                r#"<div class="language-{lang}"><pre><code class="language-{lang}">{}</code></pre></div>"#,
                escape_html(content),
                lang = escape_html(lang),
            );
        }
        None => {
            let _ = write!(out, "<pre><code>{}</code></pre>", escape_html(content));
        }
    }
}

pub(crate) fn alert_start(kind: AlertKind, out: &mut String) {
    let (class, title) = kind.class_and_title();
    let _ = write!(
        out,
        r#"<div class="custom-block {class}"><p class="custom-block-title">{title}</p>"#
    );
}

pub(crate) fn image(src: &str, alt: &str, title: &str, out: &mut String) {
    let title_attr = if title.is_empty() {
        String::new()
    } else {
        format!(r#" title="{}""#, escape_html(title))
    };
    let _ = write!(
        out,
        r#"<img src="{}"{title_attr} alt="{}">"#,
        escape_html(src),
        escape_html(alt)
    );
}

pub(crate) fn task_list_marker(checked: bool, out: &mut String) {
    if checked {
        out.push_str(r#"<input type="checkbox" checked disabled> "#);
    } else {
        out.push_str(r#"<input type="checkbox" disabled> "#);
    }
}

/// Resolve a markdown link to a clean site URL.
///
/// `base` is the directory of the current page relative to the site root:
/// - `./sibling.md` → `/base/sibling`
/// - `../guide/index.md` → `/guide`
/// - `/api.md#errors` → `/api#errors`
///
/// Returns `None` for links that are not local `.md` links.
#[allow(clippy::case_sensitive_file_extension_comparisons)]
pub(crate) fn resolve_md_link(url: &str, base: &str) -> Option<String> {
    if url.contains("://") || url.starts_with("//") || url.starts_with('#') {
        return None;
    }
    if url.starts_with("mailto:") || url.starts_with("tel:") {
        return None;
    }

    let (path_part, fragment) = match url.find('#') {
        Some(pos) => url.split_at(pos),
        None => (url, ""),
    };
    if !path_part.ends_with(".md") {
        return None;
    }

    let mut segments: Vec<&str> = if path_part.starts_with('/') {
        Vec::new()
    } else {
        base.split('/').filter(|s| !s.is_empty()).collect()
    };
    for component in path_part.split('/') {
        match component {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(component),
        }
    }

    let joined = segments.join("/");
    let clean = joined.strip_suffix(".md").unwrap_or(&joined);
    let clean = if clean == "index" {
        ""
    } else {
        clean.strip_suffix("/index").unwrap_or(clean)
    };
    Some(format!("/{clean}{fragment}"))
}

/// Prefix a site-root-relative URL (`/path`) with the site base.
///
/// Protocol-relative (`//host`) and all other URLs are returned unchanged.
pub(crate) fn with_site_base(url: String, site_base: &str) -> String {
    if site_base == "/" || !url.starts_with('/') || url.starts_with("//") {
        return url;
    }
    format!("{site_base}{}", &url[1..])
}
