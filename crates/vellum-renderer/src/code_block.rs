//! Code block processor trait for extensible code block handling.
//!
//! Processors are registered with the renderer (usually by a
//! [`MarkdownExtension`](crate::MarkdownExtension)) and consulted in order
//! when a fenced code block ends. The first processor returning something
//! other than [`ProcessResult::PassThrough`] wins.

use std::collections::HashMap;

/// Result of processing a code block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessResult {
    /// Replace the code block with HTML at its position in the output.
    Inline(String),

    /// Render as a regular code block.
    PassThrough,
}

/// Metadata recorded for a code block a processor handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractedCodeBlock {
    /// Zero-based index of this code block in the document.
    pub index: usize,
    /// Language identifier from fence (e.g., "mermaid").
    pub language: String,
    /// Raw source content of the code block.
    pub source: String,
    /// Attributes parsed from fence (e.g., `theme=dark` → {"theme": "dark"}).
    pub attrs: HashMap<String, String>,
}

/// Trait for processing special code blocks.
///
/// Processors hold per-document state (extracted blocks, warnings), so a
/// fresh processor is created for every renderer instance.
pub trait CodeBlockProcessor {
    /// Process a code block and return the result.
    ///
    /// * `language` - Language identifier from fence info string
    /// * `attrs` - Attributes parsed from fence (key=value pairs)
    /// * `source` - Raw content of the code block
    /// * `index` - Zero-based index of the block within the document
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> ProcessResult;

    /// Blocks this processor handled, in document order.
    fn extracted(&self) -> &[ExtractedCodeBlock] {
        &[]
    }

    /// Warnings generated during processing.
    fn warnings(&self) -> &[String] {
        &[]
    }
}

/// Parse fence info string into language and attributes.
///
/// Format: `language [key=value ...]`. Bare words after the language are ignored.
#[must_use]
pub(crate) fn parse_fence_info(info: &str) -> (String, HashMap<String, String>) {
    let mut parts = info.split_whitespace();
    let language = parts.next().unwrap_or("").to_owned();

    let attrs = parts
        .filter_map(|part| part.split_once('='))
        .map(|(key, value)| {
            let value = value.trim_matches('"').trim_matches('\'');
            (key.to_owned(), value.to_owned())
        })
        .collect();

    (language, attrs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fence_info_language_only() {
        let (lang, attrs) = parse_fence_info("mermaid");
        assert_eq!(lang, "mermaid");
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_parse_fence_info_with_attrs() {
        let (lang, attrs) = parse_fence_info("mermaid theme=dark");
        assert_eq!(lang, "mermaid");
        assert_eq!(attrs.get("theme"), Some(&"dark".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_quoted_values() {
        let (lang, attrs) = parse_fence_info("ts title='config.ts'");
        assert_eq!(lang, "ts");
        assert_eq!(attrs.get("title"), Some(&"config.ts".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_ignores_bare_words() {
        let (lang, attrs) = parse_fence_info("rust ignore edition=2024");
        assert_eq!(lang, "rust");
        assert_eq!(attrs.len(), 1);
        assert_eq!(attrs.get("edition"), Some(&"2024".to_owned()));
    }

    #[test]
    fn test_parse_fence_info_empty() {
        let (lang, attrs) = parse_fence_info("");
        assert!(lang.is_empty());
        assert!(attrs.is_empty());
    }
}
