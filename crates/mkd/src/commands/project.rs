//! Options shared by every command: where the project lives.

use std::path::PathBuf;

use clap::Args;
use mkd_config::{CONFIG_PATH_ENV, CliSettings, Config, DOCS_PATH_ENV};

use crate::error::CliError;

/// Project location arguments.
#[derive(Args)]
pub(crate) struct ProjectArgs {
    /// Path to configuration file (default: auto-discover mkd.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation directory (overrides config).
    #[arg(short, long, env = DOCS_PATH_ENV)]
    pub docs_dir: Option<PathBuf>,

    /// Site configuration file, usually mkdocs.yml (overrides config).
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    pub site_config: Option<PathBuf>,

    /// Enable verbose output (log every file mutation).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProjectArgs {
    /// Load configuration with these arguments applied on top.
    pub(crate) fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            docs_dir: self.docs_dir.clone(),
            site_config: self.site_config.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        tracing::debug!(
            docs_dir = %config.docs_resolved.docs_dir.display(),
            site_config = %config.docs_resolved.site_config.display(),
            "Loaded configuration"
        );
        Ok(config)
    }
}
