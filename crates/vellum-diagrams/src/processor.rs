//! Code block processor for diagram languages.
//!
//! [`DiagramProcessor`] replaces each diagram code block with a container the
//! client-side script draws into. The raw
//! source travels in the `data-diagram-source` attribute, HTML-escaped, so the
//! browser decodes it back to exactly what the author wrote.

use std::collections::HashMap;
use std::fmt::Write;

use vellum_renderer::{CodeBlockProcessor, ExtractedCodeBlock, ProcessResult, escape_html};

use crate::language::DiagramLanguage;

/// Code block processor for diagram languages.
///
/// Containers are emitted inline as each block is processed. Every diagram
/// is still recorded in [`extracted`](CodeBlockProcessor::extracted) so
/// callers can count and inspect them.
///
/// # Example
///
/// ```
/// use vellum_diagrams::DiagramProcessor;
/// use vellum_renderer::MarkdownRenderer;
///
/// let mut renderer = MarkdownRenderer::new()
///     .with_processor(DiagramProcessor::new());
/// let result = renderer.render_markdown("```mermaid\ngraph TD; A-->B\n```");
/// assert!(result.html.starts_with(r#"<pre class="mermaid""#));
/// ```
#[derive(Default)]
pub struct DiagramProcessor {
    extracted: Vec<ExtractedCodeBlock>,
    warnings: Vec<String>,
}

impl DiagramProcessor {
    /// Create a processor with no extracted diagrams.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Render the client-side container for one diagram.
#[must_use]
pub fn diagram_container(language: DiagramLanguage, source: &str) -> String {
    let name = language.as_str();
    let escaped = escape_html(source);
    let mut html = String::with_capacity(escaped.len() * 2 + 96);
    let _ = write!(
        html,
        r#"<pre class="{name}" data-diagram="{name}" data-diagram-source="{escaped}">{escaped}</pre>"#
    );
    html
}

impl CodeBlockProcessor for DiagramProcessor {
    fn process(
        &mut self,
        language: &str,
        attrs: &HashMap<String, String>,
        source: &str,
        index: usize,
    ) -> ProcessResult {
        let Some(diagram_language) = DiagramLanguage::parse(language) else {
            return ProcessResult::PassThrough;
        };

        let mut keys: Vec<&String> = attrs.keys().collect();
        keys.sort_unstable();
        for key in keys {
            self.warnings
                .push(format!("diagram {index}: unknown attribute '{key}' ignored"));
        }

        self.extracted.push(ExtractedCodeBlock {
            index,
            language: diagram_language.as_str().to_owned(),
            source: source.to_owned(),
            attrs: attrs.clone(),
        });

        ProcessResult::Inline(diagram_container(diagram_language, source))
    }

    fn extracted(&self) -> &[ExtractedCodeBlock] {
        &self.extracted
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use vellum_renderer::MarkdownRenderer;

    use super::*;

    fn render(markdown: &str) -> vellum_renderer::RenderResult {
        MarkdownRenderer::new()
            .with_processor(DiagramProcessor::new())
            .render_markdown(markdown)
    }

    #[test]
    fn test_mermaid_block_becomes_container() {
        let result = render("```mermaid\ngraph TD\n  A-->B\n```");
        assert_eq!(
            result.html,
            r#"<pre class="mermaid" data-diagram="mermaid" data-diagram-source="graph TD
  A--&gt;B
">graph TD
  A--&gt;B
</pre>"#
        );
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_kroki_prefixed_fence() {
        let result = render("```kroki-mermaid\nsequenceDiagram\n```");
        assert!(result.html.contains(r#"data-diagram="mermaid""#));
    }

    #[test]
    fn test_source_with_quotes_and_ampersands_escaped() {
        let source = "flowchart LR\n  A[\"Alice & Bob\"] --> B<br>\n";
        let html = diagram_container(DiagramLanguage::Mermaid, source);
        assert!(html.contains("data-diagram-source=\"flowchart LR\n  A[&quot;Alice &amp; Bob&quot;] --&gt; B&lt;br&gt;\n\""));
    }

    #[test]
    fn test_non_diagram_blocks_pass_through() {
        let result = render("```rust\nfn main() {}\n```");
        assert!(result.html.contains(r#"<code class="language-rust">"#));
        assert!(!result.html.contains("mermaid"));
    }

    #[test]
    fn test_multiple_diagrams_keep_order() {
        let result = render("```mermaid\nfirst\n```\n\ntext\n\n```mermaid\nsecond\n```");
        let first = result.html.find("first").unwrap();
        let second = result.html.find("second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_literal_marker_text_is_left_alone() {
        let result = render("Literal `{{DIAGRAM_0}}` text.\n\n```mermaid\ngraph TD\n```");
        assert!(result.html.starts_with("<p>Literal <code>{{DIAGRAM_0}}</code> text.</p>"));
        assert!(result.html.ends_with(r#"<pre class="mermaid" data-diagram="mermaid" data-diagram-source="graph TD
">graph TD
</pre>"#));
    }

    #[test]
    fn test_unknown_attribute_warns() {
        let result = render("```mermaid theme=dark\ngraph TD\n```");
        assert_eq!(
            result.warnings,
            vec!["diagram 0: unknown attribute 'theme' ignored".to_owned()]
        );
        assert!(result.html.contains(r#"class="mermaid""#));
    }

    #[test]
    fn test_extracted_blocks_recorded() {
        let mut processor = DiagramProcessor::new();
        let result = processor.process("mermaid", &HashMap::new(), "graph TD\n", 3);
        assert_eq!(
            result,
            ProcessResult::Inline(diagram_container(DiagramLanguage::Mermaid, "graph TD\n"))
        );
        assert_eq!(processor.extracted().len(), 1);
        assert_eq!(processor.extracted()[0].source, "graph TD\n");
    }
}
