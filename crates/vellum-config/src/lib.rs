//! Site configuration for Vellum.
//!
//! Parses `vellum.toml` with serde into a raw shape where every field is
//! optional, then resolves it into a fully defaulted [`SiteConfig`]. Missing
//! required fields are reported with their dotted path
//! (e.g. `sidebar[0].items[2].link`).
//!
//! The config file is auto-discovered in the current directory and its parents.
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `base`
//! - `search.endpoint`

mod expand;
pub mod links;
mod model;
mod raw;
pub mod theme;

use std::path::{Path, PathBuf};

pub use links::{LinkResolver, normalize_link};
pub use model::{
    Appearance, CodeTheme, MarkdownConfig, NavItem, SearchConfig, SidebarSection, SocialLink,
};
pub use theme::ThemeTokens;
pub use vellum_renderer::HeadTag;

use raw::RawConfig;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "vellum.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override output directory.
    pub out_dir: Option<PathBuf>,
    /// Override URL base.
    pub base: Option<String>,
}

/// Resolved site configuration.
///
/// Created once per build and never mutated afterwards.
#[derive(Clone, Debug)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Default page description.
    pub description: String,
    /// Top-level navigation.
    pub nav: Vec<NavItem>,
    /// Sidebar sections.
    pub sidebar: Vec<SidebarSection>,
    /// Search provider.
    pub search: SearchConfig,
    /// Theme token overrides.
    pub theme: ThemeTokens,
    /// Markdown pipeline settings.
    pub markdown: MarkdownConfig,
    /// Tags appended to every page head, in order.
    pub head: Vec<HeadTag>,
    /// Header icon links.
    pub social_links: Vec<SocialLink>,
    /// Color scheme.
    pub appearance: Appearance,
    /// URL prefix, always starting and ending with `/`.
    pub base: String,
    /// Markdown source directory.
    pub source_dir: PathBuf,
    /// Output directory for the rendered site.
    pub out_dir: PathBuf,
    /// Path to the config file, if loaded from disk.
    pub config_path: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Required field absent.
    #[error("Missing required field: {field}")]
    MissingField {
        /// Dotted path of the field (e.g. "`sidebar[0].items[2].link`").
        field: String,
    },
    /// A search provider was selected more than once in one build.
    #[error("Search provider already selected for this build")]
    DuplicateProvider,
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`search.endpoint`").
        field: String,
        /// Error message (e.g., "${`SEARCH_HOST`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
pub(crate) fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
pub(crate) fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Normalize a URL base to `/prefix/` form.
pub(crate) fn normalize_base(base: &str) -> Result<String, ConfigError> {
    if !base.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "base must start with /, got \"{base}\""
        )));
    }
    if base.ends_with('/') {
        Ok(base.to_owned())
    } else {
        Ok(format!("{base}/"))
    }
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `vellum.toml` in current directory and parents.
    ///
    /// CLI settings are applied after resolution and take precedence over
    /// config file values.
    ///
    /// # Errors
    ///
    /// Returns error if no config file is found, or parsing or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let path = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Some(path) => path.to_path_buf(),
            None => Self::discover_config().ok_or_else(|| {
                let cwd = std::env::current_dir().unwrap_or_default();
                ConfigError::NotFound(cwd.join(CONFIG_FILENAME))
            })?,
        };

        let mut config = Self::load_from_file(&path)?;
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings)?;
        }

        tracing::debug!(
            path = %path.display(),
            source_dir = %config.source_dir.display(),
            out_dir = %config.out_dir.display(),
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// Relative paths resolve against the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, Path::new("."))
    }

    /// Navigation and sidebar with links resolved against `base`.
    #[must_use]
    pub fn links(&self) -> LinkResolver<'_> {
        LinkResolver::new(self)
    }

    fn parse(content: &str, config_dir: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content)?;
        raw.resolve(config_dir)
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::parse(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) -> Result<(), ConfigError> {
        if let Some(source_dir) = &settings.source_dir {
            self.source_dir.clone_from(source_dir);
        }
        if let Some(out_dir) = &settings.out_dir {
            self.out_dir.clone_from(out_dir);
        }
        if let Some(base) = &settings.base {
            self.base = normalize_base(base)?;
        }
        Ok(())
    }
}
