//! `mkd tools` command implementation.

use clap::Args;
use mkd_tools::{ToolDescriptor, descriptors};
use serde::Serialize;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the tools command.
#[derive(Args)]
pub(crate) struct ToolsArgs {
    #[command(flatten)]
    pub project: ProjectArgs,
}

/// Server identity plus descriptors.
#[derive(Serialize)]
struct ToolsListing<'a> {
    name: &'a str,
    version: &'a str,
    tools: Vec<ToolDescriptor>,
}

impl ToolsArgs {
    /// Execute the tools command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let config = self.project.load_config()?;
        let listing = ToolsListing {
            name: &config.server.name,
            version: &config.server.version,
            tools: descriptors(),
        };
        Output::new().json(&listing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_shape() {
        let listing = ToolsListing {
            name: "mkdocs-mcp",
            version: "1.0.0",
            tools: descriptors(),
        };

        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["name"], "mkdocs-mcp");
        assert_eq!(json["tools"][0]["name"], "list_docs");
    }
}
