//! Operation dispatcher.
//!
//! [`Toolbox`] owns the resolved root paths and routes named calls with JSON
//! arguments to the typed operations in [`crate::documents`] and
//! [`crate::navigation`].

use mkd_config::{Config, DocsConfig};
use mkd_site::SiteConfigFile;
use mkd_storage::FsStorage;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ErrorKind, ToolError};
use crate::outcome::ToolOutcome;

/// Entry point for the named documentation operations.
///
/// Holds only the configured paths. Each operation checks that its root
/// exists and opens it afresh, so files created or removed between calls are
/// always observed.
#[derive(Debug, Clone)]
pub struct Toolbox {
    docs: DocsConfig,
}

#[derive(Deserialize)]
struct ListArgs {
    #[serde(default)]
    pattern: Option<String>,
}

#[derive(Deserialize)]
struct PathArgs {
    file_path: String,
}

#[derive(Deserialize)]
struct WriteArgs {
    file_path: String,
    content: String,
    #[serde(default)]
    frontmatter: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    case_sensitive: bool,
}

#[derive(Deserialize)]
struct NavigationArgs {
    navigation: Value,
}

impl Toolbox {
    /// Create a toolbox over explicit roots.
    #[must_use]
    pub fn new(docs: DocsConfig) -> Self {
        Self { docs }
    }

    /// Create a toolbox from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.docs_resolved.clone())
    }

    /// Storage over the docs root, failing if the directory is missing.
    pub(crate) fn storage(&self) -> Result<FsStorage, ToolError> {
        let docs_dir = self.docs.require_docs_dir()?;
        Ok(FsStorage::new(docs_dir.to_path_buf()))
    }

    /// Site configuration file, failing if it is missing.
    pub(crate) fn site_config(&self) -> Result<SiteConfigFile, ToolError> {
        let path = self.docs.require_site_config()?;
        Ok(SiteConfigFile::new(path))
    }

    /// Run the operation `name` with JSON `arguments`.
    ///
    /// `arguments` may be `null` for operations without required inputs.
    /// Never panics on caller input: unknown names and malformed arguments
    /// come back as [`ToolOutcome::Failure`].
    pub fn call(&self, name: &str, arguments: Value) -> ToolOutcome {
        tracing::debug!(tool = name, "Calling tool");
        let arguments = match arguments {
            Value::Null => Value::Object(Map::new()),
            other => other,
        };

        let outcome = match name {
            "list_docs" => ToolOutcome::from_result(
                decode::<ListArgs>(name, arguments)
                    .and_then(|args| self.list_docs(args.pattern.as_deref())),
            ),
            "read_doc" => ToolOutcome::from_result(
                decode::<PathArgs>(name, arguments).and_then(|args| self.read_doc(&args.file_path)),
            ),
            "create_doc" => ToolOutcome::from_result(
                decode::<WriteArgs>(name, arguments).and_then(|args| {
                    self.create_doc(&args.file_path, &args.content, args.frontmatter.as_ref())
                }),
            ),
            "update_doc" => ToolOutcome::from_result(
                decode::<WriteArgs>(name, arguments).and_then(|args| {
                    self.update_doc(&args.file_path, &args.content, args.frontmatter.as_ref())
                }),
            ),
            "delete_doc" => ToolOutcome::from_result(
                decode::<PathArgs>(name, arguments)
                    .and_then(|args| self.delete_doc(&args.file_path)),
            ),
            "search_docs" => ToolOutcome::from_result(
                decode::<SearchArgs>(name, arguments)
                    .and_then(|args| self.search_docs(&args.query, args.case_sensitive)),
            ),
            "get_navigation" => ToolOutcome::from_result(self.get_navigation()),
            "update_navigation" => ToolOutcome::from_result(
                decode::<NavigationArgs>(name, arguments)
                    .and_then(|args| self.update_navigation(&args.navigation)),
            ),
            _ => ToolOutcome::Failure(ToolError::new(
                ErrorKind::UnknownOperation,
                format!("Unknown tool: {name}"),
            )),
        };

        if let Some(err) = outcome.error() {
            tracing::debug!(tool = name, kind = ?err.kind, error = %err, "Tool failed");
        }
        outcome
    }
}

fn decode<T: DeserializeOwned>(name: &str, arguments: Value) -> Result<T, ToolError> {
    serde_json::from_value(arguments)
        .map_err(|e| ToolError::invalid_arguments(format!("Invalid arguments for {name}: {e}")))
}
