//! Client-side diagram support for Vellum.
//!
//! Diagram code blocks are not rendered at build time. They are replaced with
//! containers carrying the raw source, and a script loaded through the page
//! head draws them in the browser:
//!
//! - [`DiagramProcessor`] implements `CodeBlockProcessor` for diagram fences
//! - [`MermaidExtension`] registers the processor and its head tags
//!
//! # Example
//!
//! ```
//! use vellum_diagrams::MermaidExtension;
//! use vellum_renderer::MarkdownRenderer;
//!
//! let mut renderer = MarkdownRenderer::new()
//!     .apply_extension(&MermaidExtension)
//!     .unwrap();
//! let result = renderer.render_markdown("```mermaid\ngraph TD; A-->B\n```");
//! assert!(result.html.contains(r#"data-diagram="mermaid""#));
//! ```

mod consts;
mod extension;
mod language;
mod processor;

pub use consts::{MERMAID_INIT_SCRIPT, MERMAID_SCRIPT_URL};
pub use extension::MermaidExtension;
pub use language::DiagramLanguage;
pub use processor::{DiagramProcessor, diagram_container};
