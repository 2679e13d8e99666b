//! `mkd nav` command implementation.

use clap::Args;
use mkd_site::outline;
use mkd_tools::Toolbox;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the nav command.
#[derive(Args)]
pub(crate) struct NavArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

impl NavArgs {
    /// Execute the nav command.
    ///
    /// # Errors
    ///
    /// Returns an error if the site configuration is missing or unparsable.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let config = self.project.load_config()?;
        let toolbox = Toolbox::from_config(&config);

        let summary = toolbox.get_navigation()?;
        let tree = toolbox.navigation_tree()?;

        output.highlight(summary.site_name.as_deref().unwrap_or("(unnamed site)"));
        if let Some(theme) = &summary.theme {
            output.info(&format!("Theme: {theme}"));
        }
        output.separator();
        if tree.is_empty() {
            output.warning("No navigation entries");
        } else {
            output.text(&outline(&tree))?;
        }
        Ok(())
    }
}
