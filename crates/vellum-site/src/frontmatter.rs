//! Page metadata from YAML frontmatter.

use serde::Deserialize;

/// Metadata declared at the top of a markdown document.
///
/// All fields are optional. Unknown keys are ignored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct PageMeta {
    /// Page title (overrides H1 extraction).
    #[serde(default)]
    pub title: Option<String>,
    /// Page description for `<meta name="description">`.
    #[serde(default)]
    pub description: Option<String>,
}

impl PageMeta {
    /// Parse metadata from YAML content.
    ///
    /// Empty content returns a default instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(trimmed)
    }
}
