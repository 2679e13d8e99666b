//! mkd CLI - MkDocs documentation manager.
//!
//! Provides commands for:
//! - `call`: Run one named operation and print its JSON payload
//! - `tools`: Print the operation descriptors
//! - `nav`: Print the navigation tree as an outline

mod commands;
mod error;
mod output;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CallArgs, NavArgs, ProjectArgs, ToolsArgs};
use output::Output;

/// mkd - MkDocs documentation manager.
#[derive(Parser)]
#[command(name = "mkd", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a named operation with JSON arguments.
    Call(CallArgs),
    /// List available operations with their input schemas.
    Tools(ToolsArgs),
    /// Show the navigation tree from the site configuration.
    Nav(NavArgs),
}

impl Commands {
    fn project(&self) -> &ProjectArgs {
        match self {
            Self::Call(args) => &args.project,
            Self::Tools(args) => &args.project,
            Self::Nav(args) => &args.project,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.project().verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Call(args) => args.execute(),
        Commands::Tools(args) => args.execute(),
        Commands::Nav(args) => args.execute(),
    };

    if let Err(err) = result {
        output.error(&format!("Error: {err}"));
        std::process::exit(1);
    }
}
