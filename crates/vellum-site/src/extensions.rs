//! Extensions available to `markdown.extensions`.

use std::sync::Arc;

use vellum_diagrams::MermaidExtension;
use vellum_renderer::ExtensionRegistry;

/// Registry of every extension shipped with Vellum.
#[must_use]
pub fn builtin_registry() -> ExtensionRegistry {
    ExtensionRegistry::new().with(MermaidExtension::NAME, || Arc::new(MermaidExtension))
}

#[cfg(test)]
mod tests {
    use vellum_renderer::ExtensionLoadError;

    use super::*;

    #[test]
    fn test_builtins() {
        let registry = builtin_registry();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["mermaid"]);
    }

    #[test]
    fn test_unknown_extension_named_in_error() {
        let err = builtin_registry()
            .resolve(&["mermaid", "vitepress-plugin-katex"])
            .err()
            .unwrap();
        assert!(
            matches!(err, ExtensionLoadError::Unknown { ref name } if name == "vitepress-plugin-katex")
        );
    }
}
