//! Search provider selection and the local full-text index.
//!
//! A build selects exactly one provider through [`SearchSelector`]:
//!
//! ```text
//! Unconfigured --select--> Selected --index--> Indexed
//! ```
//!
//! The `local` provider produces a [`SearchIndex`] written as
//! `search-index.json` after every page has rendered. The `external` provider
//! produces no index; pages carry the endpoint in a meta tag instead.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use vellum_config::{ConfigError, HeadTag, SearchConfig};
use vellum_renderer::TocEntry;

use crate::page::RenderedPage;

/// Index file location relative to the output directory.
pub const SEARCH_INDEX_PATH: &str = "search-index.json";

static DARK_VARIANT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<div class="highlight-dark">.*?</div>"#).expect("valid variant pattern")
});
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag pattern"));
static SPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

/// Error from the search selector.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// Operation not allowed in the selector's current state.
    #[error("Search selector is {actual}, expected {expected}")]
    InvalidState {
        /// State the operation requires.
        expected: &'static str,
        /// State the selector was in.
        actual: &'static str,
    },
    /// Index serialization failed.
    #[error("Failed to serialize search index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// The provider chosen for a build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchHandle {
    /// Build a local index.
    Local,
    /// Delegate to a hosted service.
    External {
        /// Service endpoint.
        endpoint: String,
    },
}

impl SearchHandle {
    /// Meta tag telling the client where to search.
    ///
    /// `base` is the site URL prefix.
    #[must_use]
    pub fn head_tag(&self, base: &str) -> HeadTag {
        match self {
            Self::Local => HeadTag::new("meta")
                .with_attr("name", "vellum-search-index")
                .with_attr("content", format!("{base}{SEARCH_INDEX_PATH}")),
            Self::External { endpoint } => HeadTag::new("meta")
                .with_attr("name", "vellum-search-endpoint")
                .with_attr("content", endpoint.as_str()),
        }
    }

    /// Build the index for rendered pages.
    ///
    /// Returns `None` for providers that do not index locally.
    #[must_use]
    pub fn index(&self, pages: &[RenderedPage]) -> Option<SearchIndex> {
        match self {
            Self::Local => Some(build_search_index(pages)),
            Self::External { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
enum SelectorState {
    #[default]
    Unconfigured,
    Selected(SearchHandle),
    Indexed,
}

impl SelectorState {
    fn name(&self) -> &'static str {
        match self {
            Self::Unconfigured => "unconfigured",
            Self::Selected(_) => "selected",
            Self::Indexed => "indexed",
        }
    }
}

/// Per-build search provider state machine.
#[derive(Debug, Default)]
pub struct SearchSelector {
    state: SelectorState,
}

impl SearchSelector {
    /// Create an unconfigured selector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the provider for this build.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateProvider`] if a provider was already
    /// selected.
    pub fn select(&mut self, config: &SearchConfig) -> Result<SearchHandle, ConfigError> {
        if !matches!(self.state, SelectorState::Unconfigured) {
            return Err(ConfigError::DuplicateProvider);
        }
        let handle = match config {
            SearchConfig::Local => SearchHandle::Local,
            SearchConfig::External { endpoint } => SearchHandle::External {
                endpoint: endpoint.clone(),
            },
        };
        tracing::debug!(provider = config.provider(), "Selected search provider");
        self.state = SelectorState::Selected(handle.clone());
        Ok(handle)
    }

    /// The selected provider, if any.
    #[must_use]
    pub fn handle(&self) -> Option<&SearchHandle> {
        match &self.state {
            SelectorState::Selected(handle) => Some(handle),
            _ => None,
        }
    }

    /// Build the index for the selected provider and mark the selector indexed.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidState`] if no provider is selected or
    /// indexing already happened.
    pub fn index(&mut self, pages: &[RenderedPage]) -> Result<Option<SearchIndex>, SearchError> {
        let SelectorState::Selected(handle) = &self.state else {
            return Err(self.invalid("selected"));
        };
        let index = handle.index(pages);
        self.mark_indexed()?;
        Ok(index)
    }

    /// Transition from `Selected` to `Indexed`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidState`] from any other state.
    pub fn mark_indexed(&mut self) -> Result<(), SearchError> {
        if !matches!(self.state, SelectorState::Selected(_)) {
            return Err(self.invalid("selected"));
        }
        self.state = SelectorState::Indexed;
        Ok(())
    }

    /// Whether the index step has completed.
    #[must_use]
    pub fn is_indexed(&self) -> bool {
        matches!(self.state, SelectorState::Indexed)
    }

    fn invalid(&self, expected: &'static str) -> SearchError {
        SearchError::InvalidState {
            expected,
            actual: self.state.name(),
        }
    }
}

/// One searchable page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchEntry {
    /// Page URL including the site base.
    pub url: String,
    /// Page title.
    pub title: String,
    /// Section headings in document order, with anchor ids for deep links.
    pub headings: Vec<TocEntry>,
    /// Plain text content.
    pub text: String,
}

/// Local full-text index, serialized as a JSON array of entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SearchIndex {
    entries: Vec<SearchEntry>,
}

impl SearchIndex {
    /// Indexed entries in page order.
    #[must_use]
    pub fn entries(&self) -> &[SearchEntry] {
        &self.entries
    }

    /// Serialize to JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, SearchError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Build a search index with one entry per page.
#[must_use]
pub fn build_search_index(pages: &[RenderedPage]) -> SearchIndex {
    let entries = pages
        .iter()
        .map(|page| SearchEntry {
            url: page.url.clone(),
            title: page.title.clone(),
            headings: page.toc.clone(),
            text: plain_text(&page.content),
        })
        .collect();
    SearchIndex { entries }
}

/// Strip tags from rendered HTML and collapse whitespace.
///
/// Highlighted code carries a second copy for the dark scheme; only the
/// light copy is indexed.
#[must_use]
pub fn plain_text(html: &str) -> String {
    let single_variant = DARK_VARIANT_RE.replace_all(html, "");
    let without_tags = TAG_RE.replace_all(&single_variant, " ");
    let collapsed = SPACE_RE.replace_all(&without_tags, " ");
    decode_entities(collapsed.trim())
}

/// Decode the entities produced by the renderer's HTML escaping.
fn decode_entities(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#x27;", "'")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
