//! `vellum check` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use vellum_config::SiteConfig;
use vellum_site::{SiteBuilder, assemble_head, builtin_registry, scanner};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover vellum.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Loads the configuration and resolves extensions exactly as a build
    /// would, then reports what a build would render.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or an extension is unknown.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = SiteConfig::load(self.config.as_deref(), None)?;
        let builder = SiteBuilder::new(Arc::new(config), &builtin_registry())?;
        let config = builder.config();

        output.heading(&config.title);
        if let Some(path) = &config.config_path {
            output.field("Config", &path.display().to_string());
        }
        output.field("Base", &config.base);
        output.field("Navigation", &format!("{} link(s)", config.nav.len()));
        output.field(
            "Sidebar",
            &format!(
                "{} section(s), {} link(s)",
                config.sidebar.len(),
                config.sidebar.iter().map(|s| s.items.len()).sum::<usize>()
            ),
        );
        output.field("Search", config.search.provider());
        output.field(
            "Code theme",
            &format!(
                "{} / {}",
                config.markdown.theme.light, config.markdown.theme.dark
            ),
        );
        let extensions = if config.markdown.extensions.is_empty() {
            "none".to_owned()
        } else {
            config.markdown.extensions.join(", ")
        };
        output.field("Extensions", &extensions);
        let head = assemble_head(&config.head, builder.template().head_tags());
        output.field("Head tags", &head.len().to_string());

        if config.source_dir.is_dir() {
            let documents = scanner::scan(&config.source_dir);
            output.field(
                "Documents",
                &format!("{} in {}", documents.len(), config.source_dir.display()),
            );
        } else {
            output.warning(&format!(
                "Source directory not found: {}",
                config.source_dir.display()
            ));
        }

        output.success("Configuration is valid");
        Ok(())
    }
}
