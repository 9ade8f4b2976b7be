//! Diagram languages rendered in the browser.

/// Supported diagram languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagramLanguage {
    Mermaid,
}

impl DiagramLanguage {
    /// Parse language from code fence info string.
    ///
    /// Accepts both direct language names (`mermaid`) and `kroki-` prefixed
    /// names (`kroki-mermaid`) so documents written for Kroki render unchanged.
    ///
    /// Returns None if the language is not a supported diagram type.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let lang = s.strip_prefix("kroki-").unwrap_or(s);

        match lang {
            "mermaid" => Some(Self::Mermaid),
            _ => None,
        }
    }

    /// Name used in the `class` and `data-diagram` attributes.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mermaid => "mermaid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mermaid() {
        assert_eq!(DiagramLanguage::parse("mermaid"), Some(DiagramLanguage::Mermaid));
    }

    #[test]
    fn test_parse_kroki_prefix() {
        assert_eq!(
            DiagramLanguage::parse("kroki-mermaid"),
            Some(DiagramLanguage::Mermaid)
        );
    }

    #[test]
    fn test_parse_unsupported() {
        assert_eq!(DiagramLanguage::parse("rust"), None);
        assert_eq!(DiagramLanguage::parse("Mermaid"), None);
        assert_eq!(DiagramLanguage::parse("kroki-"), None);
        assert_eq!(DiagramLanguage::parse(""), None);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(DiagramLanguage::Mermaid.as_str(), "mermaid");
    }
}
