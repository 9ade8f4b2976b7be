//! Markdown extensions and their once-per-build registration.
//!
//! An extension is a named registration that adds behavior to the renderer
//! (usually a [`CodeBlockProcessor`]) and may declare head tags its output
//! needs on the client.
//!
//! Extensions are referenced by identifier in site configuration. An
//! [`ExtensionRegistry`] maps identifiers to constructors; resolving an
//! unknown identifier is an [`ExtensionLoadError`], which is fatal to a build.
//!
//! [`RendererTemplate::configure`] is the build hook: it calls
//! [`MarkdownExtension::configure`] exactly once per extension, in
//! declaration order, before any document renders. Extensions register
//! processor factories there; per-document renderers only instantiate them.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::code_block::CodeBlockProcessor;
use crate::head::HeadTag;
use crate::highlight::CodeHighlighter;
use crate::renderer::MarkdownRenderer;

/// Creates a fresh processor for one document.
pub(crate) type ProcessorFactory = Arc<dyn Fn() -> Box<dyn CodeBlockProcessor> + Send + Sync>;

/// A markdown rendering extension.
pub trait MarkdownExtension: Send + Sync {
    /// Identifier used in configuration (e.g. `mermaid`).
    fn name(&self) -> &str;

    /// Register this extension's behavior.
    ///
    /// Called once per renderer template, never per document.
    fn configure(&self, setup: &mut ExtensionSetup);

    /// Tags that must be injected into every page head for the output to work.
    fn head_tags(&self) -> Vec<HeadTag> {
        Vec::new()
    }
}

/// Registrations collected from [`MarkdownExtension::configure`].
#[derive(Default)]
pub struct ExtensionSetup {
    processors: Vec<ProcessorFactory>,
}

impl ExtensionSetup {
    /// Register a code block processor.
    ///
    /// Processors keep per-document state, so `factory` runs once for every
    /// renderer created afterwards.
    pub fn add_processor<F, P>(&mut self, factory: F)
    where
        F: Fn() -> P + Send + Sync + 'static,
        P: CodeBlockProcessor + 'static,
    {
        self.processors.push(Arc::new(move || Box::new(factory())));
    }

    pub(crate) fn into_processors(self) -> Vec<ProcessorFactory> {
        self.processors
    }
}

/// Error raised when an extension cannot be loaded or applied.
#[derive(Debug, thiserror::Error)]
pub enum ExtensionLoadError {
    /// No extension is registered under this identifier.
    #[error("Unknown markdown extension: {name}")]
    Unknown {
        /// Identifier from configuration.
        name: String,
    },
    /// The extension was already applied to the renderer.
    #[error("Markdown extension '{name}' applied more than once")]
    AlreadyApplied {
        /// Extension identifier.
        name: String,
    },
}

type ExtensionFactory = Box<dyn Fn() -> Arc<dyn MarkdownExtension> + Send + Sync>;

/// Explicit mapping from extension identifiers to constructors.
#[derive(Default)]
pub struct ExtensionRegistry {
    factories: BTreeMap<String, ExtensionFactory>,
}

impl ExtensionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a constructor under an identifier, replacing any previous one.
    #[must_use]
    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Arc<dyn MarkdownExtension> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
        self
    }

    /// Whether an identifier is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered identifiers in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Resolve identifiers to extensions, preserving declaration order.
    ///
    /// Fails on the first unknown identifier.
    pub fn resolve<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<Arc<dyn MarkdownExtension>>, ExtensionLoadError> {
        names
            .iter()
            .map(|name| {
                let name = name.as_ref();
                self.factories
                    .get(name)
                    .map(|factory| factory())
                    .ok_or_else(|| ExtensionLoadError::Unknown {
                        name: name.to_owned(),
                    })
            })
            .collect()
    }
}

/// Build-wide renderer configuration.
///
/// Immutable once configured and shared across render workers; each document
/// gets a fresh [`MarkdownRenderer`] from [`renderer`](Self::renderer).
#[derive(Clone)]
pub struct RendererTemplate {
    gfm: bool,
    extract_title: bool,
    site_base: String,
    highlighter: Option<Arc<CodeHighlighter>>,
    extensions: Vec<Arc<dyn MarkdownExtension>>,
    processors: Vec<ProcessorFactory>,
}

impl RendererTemplate {
    /// Create a template with GFM and title extraction enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            extract_title: true,
            site_base: "/".to_owned(),
            highlighter: None,
            extensions: Vec::new(),
            processors: Vec::new(),
        }
    }

    /// Enable or disable GitHub Flavored Markdown.
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable title extraction from the first H1.
    #[must_use]
    pub fn with_title_extraction(mut self, enabled: bool) -> Self {
        self.extract_title = enabled;
        self
    }

    /// Set the URL prefix the site is served under.
    #[must_use]
    pub fn with_site_base(mut self, base: impl Into<String>) -> Self {
        self.site_base = base.into();
        self
    }

    /// Highlight fenced code with the given highlighter.
    #[must_use]
    pub fn with_highlighter(mut self, highlighter: CodeHighlighter) -> Self {
        self.highlighter = Some(Arc::new(highlighter));
        self
    }

    /// Apply extensions, in order.
    ///
    /// Each extension's [`configure`](MarkdownExtension::configure) runs
    /// exactly once here. An extension listed twice fails with
    /// [`ExtensionLoadError::AlreadyApplied`].
    pub fn configure(
        mut self,
        extensions: impl IntoIterator<Item = Arc<dyn MarkdownExtension>>,
    ) -> Result<Self, ExtensionLoadError> {
        for extension in extensions {
            if self.has_extension(extension.name()) {
                return Err(ExtensionLoadError::AlreadyApplied {
                    name: extension.name().to_owned(),
                });
            }
            let mut setup = ExtensionSetup::default();
            extension.configure(&mut setup);
            self.processors.extend(setup.into_processors());
            self.extensions.push(extension);
        }
        Ok(self)
    }

    /// Whether an extension with this name has been applied.
    #[must_use]
    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|extension| extension.name() == name)
    }

    /// Configured extensions in application order.
    #[must_use]
    pub fn extensions(&self) -> &[Arc<dyn MarkdownExtension>] {
        &self.extensions
    }

    /// Head tags required by all extensions, in extension order.
    #[must_use]
    pub fn head_tags(&self) -> Vec<HeadTag> {
        self.extensions
            .iter()
            .flat_map(|extension| extension.head_tags())
            .collect()
    }

    /// Create a renderer for one document.
    ///
    /// `base_path` is the page's directory relative to the site root.
    #[must_use]
    pub fn renderer(&self, base_path: Option<&str>) -> MarkdownRenderer {
        let mut renderer = MarkdownRenderer::new()
            .with_gfm(self.gfm)
            .with_site_base(self.site_base.as_str());
        if self.extract_title {
            renderer = renderer.with_title_extraction();
        }
        if let Some(base) = base_path {
            renderer = renderer.with_base_path(base);
        }
        if let Some(highlighter) = &self.highlighter {
            renderer = renderer.with_shared_highlighter(Arc::clone(highlighter));
        }
        for factory in &self.processors {
            renderer.push_processor(factory());
        }
        for extension in &self.extensions {
            renderer.mark_applied(extension.name());
        }
        renderer
    }
}

impl Default for RendererTemplate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::ProcessResult;

    struct ShoutProcessor;

    impl CodeBlockProcessor for ShoutProcessor {
        fn process(
            &mut self,
            language: &str,
            _attrs: &HashMap<String, String>,
            source: &str,
            _index: usize,
        ) -> ProcessResult {
            if language == "shout" {
                ProcessResult::Inline(format!("<p>{}</p>", source.trim().to_uppercase()))
            } else {
                ProcessResult::PassThrough
            }
        }
    }

    #[derive(Default)]
    struct ShoutExtension {
        configured: AtomicUsize,
    }

    impl MarkdownExtension for ShoutExtension {
        fn name(&self) -> &str {
            "shout"
        }

        fn configure(&self, setup: &mut ExtensionSetup) {
            self.configured.fetch_add(1, Ordering::SeqCst);
            setup.add_processor(|| ShoutProcessor);
        }

        fn head_tags(&self) -> Vec<HeadTag> {
            vec![HeadTag::new("script").with_attr("src", "/shout.js")]
        }
    }

    fn registry() -> ExtensionRegistry {
        ExtensionRegistry::new().with("shout", || Arc::new(ShoutExtension::default()))
    }

    #[test]
    fn test_apply_extension_once() {
        let mut renderer = MarkdownRenderer::new()
            .apply_extension(&ShoutExtension::default())
            .unwrap();
        assert!(renderer.has_extension("shout"));

        let result = renderer.render_markdown("```shout\nhello\n```");
        assert_eq!(result.html, "<p>HELLO</p>");
    }

    #[test]
    fn test_apply_extension_twice_fails() {
        let extension = ShoutExtension::default();
        let renderer = MarkdownRenderer::new().apply_extension(&extension).unwrap();
        let err = renderer.apply_extension(&extension).err().unwrap();
        assert!(matches!(err, ExtensionLoadError::AlreadyApplied { ref name } if name == "shout"));
        assert_eq!(extension.configured.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_registry_resolves_in_order() {
        let resolved = registry().resolve(&["shout"]).unwrap();
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].name(), "shout");
    }

    #[test]
    fn test_registry_unknown_extension() {
        let err = registry().resolve(&["shout", "katex"]).err().unwrap();
        assert!(matches!(err, ExtensionLoadError::Unknown { ref name } if name == "katex"));
        assert!(err.to_string().contains("katex"));
    }

    #[test]
    fn test_registry_names() {
        let registry = registry().with("other", || Arc::new(ShoutExtension::default()));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["other", "shout"]);
        assert!(registry.contains("shout"));
        assert!(!registry.contains("mermaid"));
    }

    #[test]
    fn test_template_rejects_duplicate_extensions() {
        let extensions = registry().resolve(&["shout", "shout"]).unwrap();
        let err = RendererTemplate::new().configure(extensions).err().unwrap();
        assert!(matches!(err, ExtensionLoadError::AlreadyApplied { .. }));
    }

    #[test]
    fn test_template_configures_each_extension_once() {
        let extension = Arc::new(ShoutExtension::default());
        let template = RendererTemplate::new()
            .configure([Arc::clone(&extension) as Arc<dyn MarkdownExtension>])
            .unwrap();

        for _ in 0..3 {
            let html = template.renderer(None).render_markdown("```shout\na\n```").html;
            assert_eq!(html, "<p>A</p>");
        }
        assert_eq!(extension.configured.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_template_creates_independent_renderers() {
        let template = RendererTemplate::new()
            .configure(registry().resolve(&["shout"]).unwrap())
            .unwrap();

        let mut first = template.renderer(Some("guide"));
        let mut second = template.renderer(None);
        assert_eq!(first.applied_extensions(), ["shout".to_owned()]);
        assert_eq!(
            first.render_markdown("```shout\na\n```").html,
            second.render_markdown("```shout\na\n```").html
        );
    }

    #[test]
    fn test_template_renderer_rejects_reapplying() {
        let template = RendererTemplate::new()
            .configure(registry().resolve(&["shout"]).unwrap())
            .unwrap();
        let err = template
            .renderer(None)
            .apply_extension(&ShoutExtension::default())
            .err()
            .unwrap();
        assert!(matches!(err, ExtensionLoadError::AlreadyApplied { .. }));
    }

    #[test]
    fn test_template_head_tags() {
        let template = RendererTemplate::new()
            .configure(registry().resolve(&["shout"]).unwrap())
            .unwrap();
        let tags = template.head_tags();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].attr("src"), Some("/shout.js"));
    }

    #[test]
    fn test_template_title_extraction_toggle() {
        let template = RendererTemplate::new().with_title_extraction(false);
        let result = template.renderer(None).render_markdown("# Title");
        assert_eq!(result.title, None);
    }

    #[test]
    fn test_template_highlighter_applies_to_renderers() {
        let template = RendererTemplate::new().with_highlighter(CodeHighlighter::default());
        let html = template
            .renderer(None)
            .render_markdown("```rust\nfn main() {}\n```")
            .html;
        assert!(html.contains("highlight-light"));
        assert!(html.contains("highlight-dark"));
    }
}
