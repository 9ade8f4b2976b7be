//! The `mermaid` markdown extension.

use vellum_renderer::{ExtensionSetup, HeadTag, MarkdownExtension};

use crate::consts::{MERMAID_INIT_SCRIPT, MERMAID_SCRIPT_URL};
use crate::processor::DiagramProcessor;

/// Renders ```` ```mermaid ```` blocks as containers drawn by the Mermaid
/// script in the browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct MermaidExtension;

impl MermaidExtension {
    /// Identifier used in `markdown.extensions`.
    pub const NAME: &'static str = "mermaid";
}

impl MarkdownExtension for MermaidExtension {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn configure(&self, setup: &mut ExtensionSetup) {
        setup.add_processor(DiagramProcessor::new);
    }

    fn head_tags(&self) -> Vec<HeadTag> {
        vec![
            HeadTag::new("script").with_attr("src", MERMAID_SCRIPT_URL),
            HeadTag::new("script").with_content(MERMAID_INIT_SCRIPT),
        ]
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use vellum_renderer::{ExtensionLoadError, MarkdownRenderer, RendererTemplate};

    use super::*;

    #[test]
    fn test_applied_renderer_handles_mermaid() {
        let mut renderer = MarkdownRenderer::new()
            .apply_extension(&MermaidExtension)
            .unwrap();
        let result = renderer.render_markdown("```mermaid\ngraph LR\n```");
        assert!(result.html.contains(r#"data-diagram-source="graph LR"#));
    }

    #[test]
    fn test_applying_twice_fails() {
        let renderer = MarkdownRenderer::new()
            .apply_extension(&MermaidExtension)
            .unwrap();
        let err = renderer.apply_extension(&MermaidExtension).err().unwrap();
        assert!(matches!(err, ExtensionLoadError::AlreadyApplied { ref name } if name == "mermaid"));
    }

    #[test]
    fn test_head_tags_load_and_start_script() {
        let tags = MermaidExtension.head_tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].attr("src"), Some(MERMAID_SCRIPT_URL));
        assert_eq!(tags[1].content.as_deref(), Some(MERMAID_INIT_SCRIPT));
    }

    #[test]
    fn test_template_renders_each_document_independently() {
        let template = RendererTemplate::new()
            .configure([Arc::new(MermaidExtension) as Arc<dyn MarkdownExtension>])
            .unwrap();
        for _ in 0..2 {
            let result = template
                .renderer(None)
                .render_markdown("```mermaid\ngraph TD\n```");
            assert_eq!(result.html.matches("<pre class=\"mermaid\"").count(), 1);
        }
    }
}
