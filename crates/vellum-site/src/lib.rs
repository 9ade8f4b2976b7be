//! Static documentation site building for Vellum.
//!
//! Turns a loaded [`SiteConfig`](vellum_config::SiteConfig) and a directory of
//! markdown documents into static HTML:
//!
//! - [`scanner`]: source discovery (`guide/setup.md` → `guide/setup/index.html`)
//! - [`SiteLayout`]: page chrome with head injection, navigation and sidebar
//! - [`stylesheet`]: theme custom properties followed by base styles
//! - [`SearchSelector`]: search provider state machine and local index
//! - [`SiteBuilder`]: once-per-build setup, then parallel rendering
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use vellum_config::SiteConfig;
//! use vellum_site::{SiteBuilder, builtin_registry};
//!
//! let config = Arc::new(SiteConfig::load(None, None)?);
//! let builder = SiteBuilder::new(config, &builtin_registry())?;
//! let stats = builder.build()?;
//! println!("{} pages", stats.pages);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
mod extensions;
mod frontmatter;
mod head;
mod page;
pub mod scanner;
pub mod search;
mod styles;
mod template;

pub use builder::{BuildError, BuildStats, SiteBuilder};
pub use extensions::builtin_registry;
pub use frontmatter::PageMeta;
pub use head::assemble_head;
pub use page::{RenderedPage, page_url};
pub use search::{SearchEntry, SearchError, SearchHandle, SearchIndex, SearchSelector};
pub use styles::{STYLESHEET_PATH, stylesheet};
pub use template::SiteLayout;
