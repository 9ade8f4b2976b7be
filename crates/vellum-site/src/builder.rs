//! Static site builder.
//!
//! Setup happens once and sequentially in [`SiteBuilder::new`]: markdown
//! extensions are resolved and applied to a [`RendererTemplate`] before any
//! document renders. [`SiteBuilder::build`] then renders documents in
//! parallel with rayon, sharing the configuration and template read-only.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use rayon::prelude::*;
use vellum_config::{ConfigError, SiteConfig};
use vellum_renderer::{
    CodeHighlighter, ExtensionLoadError, ExtensionRegistry, HighlightError, RendererTemplate,
};

use crate::frontmatter::PageMeta;
use crate::page::{RenderedPage, page_url};
use crate::scanner::{SourceDocument, scan};
use crate::search::{SEARCH_INDEX_PATH, SearchError, SearchSelector};
use crate::styles::{STYLESHEET_PATH, stylesheet};
use crate::template::SiteLayout;

/// Error returned by the site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Markdown extension could not be loaded.
    #[error(transparent)]
    Extension(#[from] ExtensionLoadError),
    /// Code highlighting theme could not be loaded.
    #[error(transparent)]
    Highlight(#[from] HighlightError),
    /// Search indexing failed.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// Reading a source or writing output failed.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
}

impl BuildError {
    fn io(path: &Path) -> impl FnOnce(std::io::Error) -> Self + '_ {
        move |source| Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Summary of a completed build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildStats {
    /// Pages written.
    pub pages: usize,
    /// Code blocks taken over by extensions.
    pub extracted_blocks: usize,
    /// Render warnings, prefixed with the page they came from.
    pub warnings: Vec<String>,
    /// Entries in `search-index.json`, if the local provider is selected.
    pub search_entries: Option<usize>,
}

/// Builds a static site from a markdown source directory.
pub struct SiteBuilder {
    config: Arc<SiteConfig>,
    template: Arc<RendererTemplate>,
}

impl SiteBuilder {
    /// Resolve extensions and configure the renderer template.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Extension`] if an extension identifier is unknown
    /// or listed twice, and [`BuildError::Highlight`] if a code theme is not
    /// bundled.
    pub fn new(config: Arc<SiteConfig>, registry: &ExtensionRegistry) -> Result<Self, BuildError> {
        let extensions = registry.resolve(&config.markdown.extensions)?;
        let code_theme = &config.markdown.theme;
        let highlighter = CodeHighlighter::new(&code_theme.light, &code_theme.dark)?;
        let template = RendererTemplate::new()
            .with_gfm(config.markdown.gfm)
            .with_site_base(config.base.as_str())
            .with_highlighter(highlighter)
            .configure(extensions)?;

        tracing::debug!(
            extensions = ?config.markdown.extensions,
            gfm = config.markdown.gfm,
            light = %code_theme.light,
            dark = %code_theme.dark,
            "Configured markdown renderer"
        );

        Ok(Self {
            config,
            template: Arc::new(template),
        })
    }

    /// Site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Configured renderer template.
    #[must_use]
    pub fn template(&self) -> &RendererTemplate {
        &self.template
    }

    /// Render every document and write the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing or any file
    /// operation fails. Render warnings do not fail the build.
    pub fn build(&self) -> Result<BuildStats, BuildError> {
        let source_dir = &self.config.source_dir;
        if !source_dir.is_dir() {
            return Err(BuildError::SourceNotFound(source_dir.clone()));
        }

        let mut selector = SearchSelector::new();
        let search = selector.select(&self.config.search)?;
        let layout = SiteLayout::new(&self.config, self.template.head_tags(), &search);

        let documents = scan(source_dir);
        tracing::info!(
            source_dir = %source_dir.display(),
            documents = documents.len(),
            "Building site"
        );

        let pages = documents
            .par_iter()
            .map(|doc| self.render_document(doc))
            .collect::<Result<Vec<_>, _>>()?;

        let out_dir = &self.config.out_dir;
        pages.par_iter().try_for_each(|page| {
            let dir = out_dir.join(&page.url_path);
            fs::create_dir_all(&dir).map_err(BuildError::io(&dir))?;
            let path = dir.join("index.html");
            fs::write(&path, layout.render_page(page)).map_err(BuildError::io(&path))
        })?;

        write_file(&out_dir.join(STYLESHEET_PATH), &stylesheet(&self.config.theme))?;

        let search_entries = match selector.index(&pages)? {
            Some(index) => {
                write_file(&out_dir.join(SEARCH_INDEX_PATH), &index.to_json()?)?;
                Some(index.entries().len())
            }
            None => None,
        };

        let stats = BuildStats {
            pages: pages.len(),
            extracted_blocks: pages.iter().map(|page| page.extracted_blocks).sum(),
            warnings: pages
                .iter()
                .flat_map(|page| {
                    page.warnings
                        .iter()
                        .map(move |warning| format!("{}: {warning}", display_path(&page.url_path)))
                })
                .collect(),
            search_entries,
        };
        tracing::info!(
            pages = stats.pages,
            warnings = stats.warnings.len(),
            out_dir = %out_dir.display(),
            "Build complete"
        );
        Ok(stats)
    }

    /// Render one document to a page.
    fn render_document(&self, doc: &SourceDocument) -> Result<RenderedPage, BuildError> {
        let markdown =
            fs::read_to_string(&doc.source_path).map_err(BuildError::io(&doc.source_path))?;

        let mut renderer = self.template.renderer(Some(&doc.dir));
        let result = renderer.render_markdown(&markdown);
        let extracted_blocks = renderer.extracted_code_blocks().count();

        let mut warnings = result.warnings;
        let meta = match result.frontmatter.as_deref().map(PageMeta::from_yaml) {
            Some(Ok(meta)) => meta,
            Some(Err(e)) => {
                warnings.push(format!("invalid frontmatter: {e}"));
                PageMeta::default()
            }
            None => PageMeta::default(),
        };

        for warning in &warnings {
            tracing::warn!(page = %display_path(&doc.url_path), "{warning}");
        }
        tracing::debug!(page = %display_path(&doc.url_path), "Rendered page");

        Ok(RenderedPage {
            url: page_url(&self.config.base, &doc.url_path),
            url_path: doc.url_path.clone(),
            title: meta
                .title
                .or(result.title)
                .unwrap_or_else(|| self.config.title.clone()),
            description: meta.description,
            content: result.html,
            toc: result.toc,
            warnings,
            extracted_blocks,
        })
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(BuildError::io(parent))?;
    }
    fs::write(path, content).map_err(BuildError::io(path))
}

fn display_path(url_path: &str) -> String {
    format!("/{url_path}")
}
