//! Entries of the page head injection list.

use std::fmt::Write;

use crate::state::escape_html;

/// Elements rendered without a closing tag.
const VOID_TAGS: &[&str] = &["base", "link", "meta"];

/// A single `<tag attr="...">content</tag>` appended to every page head.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadTag {
    /// Element name (`script`, `link`, `meta`, `style`, ...).
    pub tag: String,
    /// Attributes in output order.
    pub attrs: Vec<(String, String)>,
    /// Raw inner content (inline scripts and styles). Not escaped.
    pub content: Option<String>,
}

impl HeadTag {
    /// Create a tag with no attributes or content.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            content: None,
        }
    }

    /// Append an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Set inner content.
    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Render the tag as HTML.
    pub fn render(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        for (name, value) in &self.attrs {
            let _ = write!(out, r#" {name}="{}""#, escape_html(value));
        }
        out.push('>');
        if VOID_TAGS.contains(&self.tag.as_str()) {
            return;
        }
        if let Some(content) = &self.content {
            out.push_str(content);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}
