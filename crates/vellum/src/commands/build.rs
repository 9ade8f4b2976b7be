//! `vellum build` command implementation.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use vellum_config::{CliSettings, SiteConfig};
use vellum_site::{SiteBuilder, builtin_registry};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover vellum.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Markdown source directory (overrides config).
    #[arg(short, long)]
    source_dir: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// URL prefix the site is served under (overrides config).
    #[arg(long, env = "VELLUM_BASE")]
    base: Option<String>,

    /// Enable verbose output (per-page logs and render warnings).
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, extension setup or the build fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            source_dir: self.source_dir,
            out_dir: self.out_dir,
            base: self.base,
        };
        let config = SiteConfig::load(self.config.as_deref(), Some(&cli_settings))?;

        output.field("Source", &config.source_dir.display().to_string());
        output.field("Output", &config.out_dir.display().to_string());

        let out_dir = config.out_dir.clone();
        let builder = SiteBuilder::new(Arc::new(config), &builtin_registry())?;
        let stats = builder.build()?;

        if !stats.warnings.is_empty() {
            output.warning(&format!("{} warning(s):", stats.warnings.len()));
            for warning in &stats.warnings {
                output.warning(&format!("  {warning}"));
            }
        }

        output.success(&format!(
            "Built {} page(s) to {}",
            stats.pages,
            out_dir.display()
        ));
        Ok(())
    }
}
