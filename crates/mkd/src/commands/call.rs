//! `mkd call` command implementation.

use clap::Args;
use mkd_tools::Toolbox;
use serde_json::Value;

use super::ProjectArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the call command.
#[derive(Args)]
pub(crate) struct CallArgs {
    /// Operation name (see `mkd tools`).
    pub name: String,

    /// Operation arguments as a JSON object.
    #[arg(short, long, value_name = "JSON")]
    args: Option<String>,

    #[command(flatten)]
    pub project: ProjectArgs,
}

impl CallArgs {
    /// Execute the call command.
    ///
    /// The payload is printed to stdout for failures too.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or the JSON arguments cannot be
    /// loaded, or if the operation reports a failure.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let arguments = parse_arguments(self.args.as_deref())?;
        let config = self.project.load_config()?;
        let toolbox = Toolbox::from_config(&config);

        let outcome = toolbox.call(&self.name, arguments);
        let failure = outcome.error().cloned();
        output.json(&outcome.into_payload())?;

        match failure {
            Some(err) => Err(CliError::Tool(err)),
            None => Ok(()),
        }
    }
}

/// Parse `--args`, treating an absent value as no arguments.
fn parse_arguments(raw: Option<&str>) -> Result<Value, CliError> {
    match raw {
        None => Ok(Value::Null),
        Some(raw) => serde_json::from_str(raw).map_err(CliError::Arguments),
    }
}
