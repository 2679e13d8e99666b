//! CLI error types.

use mkd_config::ConfigError;
use mkd_tools::ToolError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Tool(#[from] ToolError),

    #[error("Invalid --args JSON: {0}")]
    Arguments(#[source] serde_json::Error),

    #[error("Failed to render output: {0}")]
    Render(#[source] serde_json::Error),
}
