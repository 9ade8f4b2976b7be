//! Configuration as parsed from TOML, before defaulting and validation.
//!
//! Every field is optional here so that a missing required field is reported
//! as [`ConfigError::MissingField`] with its dotted path instead of a generic
//! TOML error.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use vellum_renderer::{CodeHighlighter, HeadTag};

use crate::expand::expand_env;
use crate::model::{
    Appearance, CodeTheme, MarkdownConfig, NavItem, SearchConfig, SidebarSection, SocialLink,
};
use crate::theme::ThemeTokens;
use crate::{ConfigError, SiteConfig, normalize_base, require_http_url, require_non_empty};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawConfig {
    title: Option<String>,
    description: Option<String>,
    nav: Option<Vec<RawNavItem>>,
    sidebar: Option<Vec<RawSidebarSection>>,
    search: Option<RawSearch>,
    theme: Option<BTreeMap<String, String>>,
    markdown: Option<RawMarkdown>,
    head: Option<Vec<RawHeadTag>>,
    social_links: Option<Vec<RawSocialLink>>,
    appearance: Option<Appearance>,
    base: Option<String>,
    source_dir: Option<String>,
    out_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawNavItem {
    text: Option<String>,
    link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSidebarSection {
    text: Option<String>,
    items: Option<Vec<RawNavItem>>,
    collapsed: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSearch {
    provider: Option<String>,
    endpoint: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMarkdown {
    extensions: Option<Vec<String>>,
    gfm: Option<bool>,
    theme: Option<RawCodeTheme>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawCodeTheme {
    light: Option<String>,
    dark: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawHeadTag {
    tag: Option<String>,
    attrs: BTreeMap<String, String>,
    content: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSocialLink {
    icon: Option<String>,
    link: Option<String>,
}

fn missing(field: impl Into<String>) -> ConfigError {
    ConfigError::MissingField {
        field: field.into(),
    }
}

/// Resolve every element of an optional list, naming failures `{field}[i]`.
fn resolve_list<R, T>(
    items: Option<Vec<R>>,
    field: &str,
    resolve: impl Fn(R, &str) -> Result<T, ConfigError>,
) -> Result<Vec<T>, ConfigError> {
    items
        .unwrap_or_default()
        .into_iter()
        .enumerate()
        .map(|(i, item)| resolve(item, &format!("{field}[{i}]")))
        .collect()
}

impl RawNavItem {
    fn resolve(self, path: &str) -> Result<NavItem, ConfigError> {
        Ok(NavItem {
            text: self.text.ok_or_else(|| missing(format!("{path}.text")))?,
            link: self.link.ok_or_else(|| missing(format!("{path}.link")))?,
        })
    }
}

impl RawSidebarSection {
    fn resolve(self, path: &str) -> Result<SidebarSection, ConfigError> {
        let text = self.text.ok_or_else(|| missing(format!("{path}.text")))?;
        let items = resolve_list(self.items, &format!("{path}.items"), RawNavItem::resolve)?;
        Ok(SidebarSection {
            text,
            items,
            collapsed: self.collapsed.unwrap_or(false),
        })
    }
}

impl RawHeadTag {
    fn resolve(self, path: &str) -> Result<HeadTag, ConfigError> {
        let tag = self.tag.ok_or_else(|| missing(format!("{path}.tag")))?;
        require_non_empty(&tag, &format!("{path}.tag"))?;
        let mut head = self
            .attrs
            .into_iter()
            .fold(HeadTag::new(tag), |head, (name, value)| {
                head.with_attr(name, value)
            });
        head.content = self.content;
        Ok(head)
    }
}

impl RawSocialLink {
    fn resolve(self, path: &str) -> Result<SocialLink, ConfigError> {
        Ok(SocialLink {
            icon: self.icon.ok_or_else(|| missing(format!("{path}.icon")))?,
            link: self.link.ok_or_else(|| missing(format!("{path}.link")))?,
        })
    }
}

impl RawSearch {
    fn resolve(self) -> Result<SearchConfig, ConfigError> {
        match self.provider.as_deref() {
            None | Some("local") => Ok(SearchConfig::Local),
            Some("external") => {
                let endpoint = self.endpoint.ok_or_else(|| {
                    ConfigError::Validation(
                        "search.provider \"external\" requires search.endpoint".to_owned(),
                    )
                })?;
                let endpoint = expand_env(&endpoint, "search.endpoint")?;
                require_non_empty(&endpoint, "search.endpoint")?;
                require_http_url(&endpoint, "search.endpoint")?;
                Ok(SearchConfig::External { endpoint })
            }
            Some(other) => Err(ConfigError::Validation(format!(
                "search.provider must be \"local\" or \"external\", got \"{other}\""
            ))),
        }
    }
}

impl RawMarkdown {
    fn resolve(self) -> Result<MarkdownConfig, ConfigError> {
        let extensions = self.extensions.unwrap_or_default();
        for (i, name) in extensions.iter().enumerate() {
            require_non_empty(name, &format!("markdown.extensions[{i}]"))?;
        }
        let defaults = CodeTheme::default();
        let raw_theme = self.theme.unwrap_or_default();
        let theme = CodeTheme {
            light: bundled_theme(raw_theme.light, defaults.light, "markdown.theme.light")?,
            dark: bundled_theme(raw_theme.dark, defaults.dark, "markdown.theme.dark")?,
        };
        Ok(MarkdownConfig {
            extensions,
            gfm: self.gfm.unwrap_or(true),
            theme,
        })
    }
}

/// Validate a highlighting theme name against the bundled themes.
fn bundled_theme(
    value: Option<String>,
    default: String,
    field: &str,
) -> Result<String, ConfigError> {
    let Some(name) = value else {
        return Ok(default);
    };
    require_non_empty(&name, field)?;
    if !CodeHighlighter::theme_names().any(|bundled| bundled == name) {
        return Err(ConfigError::Validation(format!(
            "{field}: unknown code theme \"{name}\" (available: {})",
            CodeHighlighter::theme_names().collect::<Vec<_>>().join(", ")
        )));
    }
    Ok(name)
}

impl RawConfig {
    /// Apply defaults, expand variables and validate.
    ///
    /// Relative paths resolve against `config_dir`.
    pub(crate) fn resolve(self, config_dir: &Path) -> Result<SiteConfig, ConfigError> {
        let title = self.title.ok_or_else(|| missing("title"))?;
        if self.nav.is_none() {
            return Err(missing("nav"));
        }
        let nav = resolve_list(self.nav, "nav", RawNavItem::resolve)?;
        let sidebar = resolve_list(self.sidebar, "sidebar", RawSidebarSection::resolve)?;
        let head = resolve_list(self.head, "head", RawHeadTag::resolve)?;
        let social_links = resolve_list(self.social_links, "social_links", RawSocialLink::resolve)?;

        require_non_empty(title.trim(), "title")?;

        let search = self.search.unwrap_or_default().resolve()?;
        let markdown = self.markdown.unwrap_or_default().resolve()?;

        let base = match self.base {
            Some(base) => normalize_base(&expand_env(&base, "base")?)?,
            None => "/".to_owned(),
        };

        Ok(SiteConfig {
            title,
            description: self.description.unwrap_or_default(),
            nav,
            sidebar,
            search,
            theme: ThemeTokens::new(self.theme.unwrap_or_default()),
            markdown,
            head,
            social_links,
            appearance: self.appearance.unwrap_or_default(),
            base,
            source_dir: config_dir.join(self.source_dir.as_deref().unwrap_or("docs")),
            out_dir: config_dir.join(self.out_dir.as_deref().unwrap_or(".vellum/dist")),
            config_path: None,
        })
    }
}
