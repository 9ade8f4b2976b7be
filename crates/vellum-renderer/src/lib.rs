//! Markdown rendering with pluggable extensions.
//!
//! This crate provides a [`MarkdownRenderer`] that produces HTML from a
//! pulldown-cmark event stream, plus the extension machinery documentation
//! builds use to add custom syntax:
//!
//! - [`CodeBlockProcessor`]: claims fenced code blocks by language
//! - [`MarkdownExtension`]: named registration of processors and head tags
//! - [`ExtensionRegistry`]: identifier → extension constructor mapping
//! - [`RendererTemplate`]: build-wide configuration, one renderer per document
//! - [`CodeHighlighter`]: syntect highlighting in a light and a dark theme
//!
//! # Example
//!
//! ```
//! use vellum_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new()
//!     .with_title_extraction()
//!     .render_markdown("# Hello\n\n**Bold** text");
//! assert_eq!(result.title.as_deref(), Some("Hello"));
//! ```

mod code_block;
mod extension;
mod head;
mod highlight;
mod html;
mod renderer;
mod state;
mod util;

pub use code_block::{CodeBlockProcessor, ExtractedCodeBlock, ProcessResult};
pub use extension::{
    ExtensionLoadError, ExtensionRegistry, ExtensionSetup, MarkdownExtension, RendererTemplate,
};
pub use head::HeadTag;
pub use highlight::{CodeHighlighter, DEFAULT_DARK_THEME, DEFAULT_LIGHT_THEME, HighlightError};
pub use html::AlertKind;
pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
